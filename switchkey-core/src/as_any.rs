use std::any::Any;

// NOTE: Hidden from the docs, backends use it to reach their own handle type behind a
// `dyn InputSourceProvider`.
#[doc(hidden)]
pub trait AsAny: Any {
    #[doc(hidden)]
    fn __as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline(always)]
    fn __as_any(&self) -> &dyn Any {
        self
    }
}

/// Adds `cast_ref` to a backend trait object, so that platform extension traits can recover the
/// concrete backend type.
#[macro_export]
macro_rules! impl_dyn_casting {
    ($trait:ident) => {
        impl dyn $trait + '_ {
            /// Downcast to the backend concrete type.
            ///
            /// Returns `None` if the object was not created by that backend.
            pub fn cast_ref<T: $trait>(&self) -> Option<&T> {
                let this: &dyn std::any::Any = self.__as_any();
                this.downcast_ref::<T>()
            }
        }
    };
}

pub use impl_dyn_casting;

#[cfg(test)]
mod tests {
    use super::AsAny;

    #[derive(Debug)]
    struct Layout(u32);
    #[derive(Debug)]
    struct Method;

    trait Backend: AsAny {}
    impl Backend for Layout {}
    impl Backend for Method {}
    impl_dyn_casting!(Backend);

    #[test]
    fn cast_to_own_backend_only() {
        let layout: Box<dyn Backend> = Box::new(Layout(0x0409));
        assert_eq!(layout.cast_ref::<Layout>().map(|l| l.0), Some(0x0409));
        assert!(layout.cast_ref::<Method>().is_none());

        let method: Box<dyn Backend> = Box::new(Method);
        assert!(method.cast_ref::<Method>().is_some());
        assert!(method.cast_ref::<Layout>().is_none());
    }
}

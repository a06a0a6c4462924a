//! The registry seam.
//!
//! An [`InputSourceRegistry`] is the platform service that knows which input sources exist and
//! which one is active. Backends implement it over the OS API, and callers receive it explicitly
//! instead of reaching for global platform state.
use std::fmt;

use crate::input_source::InputSource;

pub trait InputSourceRegistry: fmt::Debug + Send + Sync {
    /// The input source the platform currently considers active.
    ///
    /// There is always one, so this cannot fail.
    fn current(&self) -> InputSource;

    /// Resolve an identifier to a handle.
    ///
    /// Returns `None` when the registry has no entry with that identifier. An unknown identifier
    /// is an expected outcome, not an error.
    fn lookup(&self, id: &str) -> Option<InputSource>;
}

impl<R: InputSourceRegistry + ?Sized> InputSourceRegistry for Box<R> {
    fn current(&self) -> InputSource {
        (**self).current()
    }

    fn lookup(&self, id: &str) -> Option<InputSource> {
        (**self).lookup(id)
    }
}

impl<R: InputSourceRegistry + ?Sized> InputSourceRegistry for std::sync::Arc<R> {
    fn current(&self) -> InputSource {
        (**self).current()
    }

    fn lookup(&self, id: &str) -> Option<InputSource> {
        (**self).lookup(id)
    }
}

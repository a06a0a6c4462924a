use std::ptr::NonNull;

use objc2_core_foundation::{CFString, CFType, ConcreteType};
use tracing::warn;

use crate::ffi::{self, OSStatus, TISInputSource};

/// `noErr` is success, everything else is handed back to the caller.
#[inline]
pub(crate) fn os_status(status: OSStatus) -> Result<(), OSStatus> {
    if status == 0 { Ok(()) } else { Err(status) }
}

/// Read a property of the input source, checking that it has the expected CF type.
///
/// The returned reference follows the "get" rule: it is only valid while `source` is retained.
pub(crate) fn property<'a, T: ConcreteType>(
    source: &'a TISInputSource,
    key: &CFString,
) -> Option<&'a T> {
    // SAFETY: Both arguments are valid CF objects.
    let value = unsafe { ffi::TISGetInputSourceProperty(source, key) };
    let value = NonNull::new(value)?;
    // SAFETY: TIS properties are CF objects owned by the input source.
    let value: &'a CFType = unsafe { value.cast::<CFType>().as_ref() };
    let typed = value.downcast_ref::<T>();
    if typed.is_none() {
        warn!(%key, "input source property has an unexpected type");
    }
    typed
}

pub(crate) fn string_property(source: &TISInputSource, key: &CFString) -> Option<String> {
    property::<CFString>(source, key).map(|value| value.to_string())
}

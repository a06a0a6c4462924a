//! # Windows
//!
//! Input sources are the keyboard layouts of the session's input language list. Identifiers are
//! the layout's `HKL` formatted as eight upper-case hex digits, e.g. `04090409`.
use std::ffi::c_void;

#[cfg(windows_platform)]
pub use switchkey_win32::Win32Registry;
#[cfg(windows_platform)]
use switchkey_win32::KeyboardLayout;

use crate::InputSource;

/// Additional methods on [`InputSource`] that are specific to Windows.
pub trait InputSourceExtWindows {
    /// Returns the `HKL` of this keyboard layout.
    ///
    /// Returns `None` if the handle was not created by the native registry.
    fn hkl(&self) -> Option<*mut c_void>;
}

impl InputSourceExtWindows for InputSource {
    #[cfg(windows_platform)]
    fn hkl(&self) -> Option<*mut c_void> {
        self.cast_ref::<KeyboardLayout>().map(KeyboardLayout::hkl)
    }

    #[cfg(not(windows_platform))]
    fn hkl(&self) -> Option<*mut c_void> {
        None
    }
}

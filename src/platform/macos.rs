//! # macOS
//!
//! Input sources are entries of the Text Input Source Services registry. Identifiers are the
//! `kTISPropertyInputSourceID` of the entry, e.g. `com.apple.keylayout.US`.
//!
//! By default only input sources enabled in System Settings can be looked up. To find every
//! installed input source, configure the registry yourself:
//!
//! ```no_run
//! use switchkey::platform::macos::TisRegistry;
//! use switchkey::InputSources;
//!
//! let sources =
//!     InputSources::with_registry(TisRegistry::new().with_include_all_installed(true));
//! ```
use std::ffi::c_void;

#[cfg(macos_platform)]
pub use switchkey_appkit::TisRegistry;
#[cfg(macos_platform)]
use switchkey_appkit::TisInputSource;

use crate::InputSource;

/// Additional methods on [`InputSource`] that are specific to macOS.
pub trait InputSourceExtMacOS {
    /// Returns a pointer to the `TISInputSourceRef` backing this handle.
    ///
    /// The pointer is valid for as long as the handle is alive. Returns `None` if the handle was
    /// not created by the native registry, e.g. one from a
    /// [`HeadlessRegistry`](crate::headless::HeadlessRegistry).
    fn tis_input_source(&self) -> Option<*mut c_void>;
}

impl InputSourceExtMacOS for InputSource {
    #[cfg(macos_platform)]
    fn tis_input_source(&self) -> Option<*mut c_void> {
        self.cast_ref::<TisInputSource>().map(TisInputSource::as_ptr)
    }

    #[cfg(not(macos_platform))]
    fn tis_input_source(&self) -> Option<*mut c_void> {
        None
    }
}

//! Contains traits with platform-specific methods in them.
//!
//! Only the modules corresponding to the platform you're compiling to will be available.

#[cfg(any(macos_platform, docsrs))]
pub mod macos;
#[cfg(any(windows_platform, docsrs))]
pub mod windows;

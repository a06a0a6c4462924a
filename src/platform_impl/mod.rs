use switchkey_core::error::NotSupportedError;
use switchkey_core::registry::InputSourceRegistry;

#[cfg(macos_platform)]
use switchkey_appkit::TisRegistry as PlatformRegistry;
#[cfg(windows_platform)]
use switchkey_win32::Win32Registry as PlatformRegistry;

/// The native registry of the platform we were compiled for.
#[cfg(not(headless_only))]
pub(crate) fn registry() -> Result<Box<dyn InputSourceRegistry>, NotSupportedError> {
    Ok(Box::new(PlatformRegistry::new()))
}

#[cfg(headless_only)]
pub(crate) fn registry() -> Result<Box<dyn InputSourceRegistry>, NotSupportedError> {
    tracing::debug!("no native input source registry on this platform");
    Err(NotSupportedError::new())
}

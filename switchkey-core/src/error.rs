//! Common error types.
//!
//! Looking up an unknown identifier is not an error: registries report it as `None`.

use std::{error, fmt};

use crate::input_source::InputSourceId;

/// The error type for when no input source registry is available on this platform.
#[derive(Clone)]
pub struct NotSupportedError {
    _marker: (),
}

impl Default for NotSupportedError {
    fn default() -> Self {
        Self::new()
    }
}

impl NotSupportedError {
    /// Create a new [`NotSupportedError`].
    #[inline]
    pub fn new() -> NotSupportedError {
        NotSupportedError { _marker: () }
    }
}

impl fmt::Debug for NotSupportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("NotSupportedError").finish()
    }
}

impl fmt::Display for NotSupportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad("input source switching is not supported on this platform")
    }
}

impl error::Error for NotSupportedError {}

/// The error type for when the OS cannot perform the requested operation.
///
/// Records where in the backend the failure was observed, see [`os_error!`](crate::os_error).
#[derive(Debug)]
pub struct OsError {
    line: u32,
    file: &'static str,
    error: Box<dyn error::Error + Send + Sync + 'static>,
}

impl OsError {
    pub fn new(
        line: u32,
        file: &'static str,
        error: impl Into<Box<dyn error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self { line, file, error: error.into() }
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&format!("os error at {}:{}: {}", self.file, self.line, self.error))
    }
}

impl error::Error for OsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// Build an [`OsError`] tagged with the current file and line.
#[macro_export]
macro_rules! os_error {
    ($error:expr) => {{
        $crate::error::OsError::new(line!(), file!(), $error)
    }};
}

/// Why an activation request did not go through.
///
/// The request is forwarded once; nothing is retried.
#[derive(Debug)]
pub enum ActivationError {
    /// The registry no longer has an entry for this handle.
    NotFound(InputSourceId),
    /// The registry refused to select the input source, e.g. because it is disabled or the
    /// process lacks the permission to switch.
    Denied(InputSourceId),
    /// The OS call itself failed.
    Os(OsError),
}

impl From<OsError> for ActivationError {
    fn from(value: OsError) -> Self {
        Self::Os(value)
    }
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ActivationError::NotFound(id) => write!(f, "input source `{id}` no longer exists"),
            ActivationError::Denied(id) => write!(f, "activation of input source `{id}` was denied"),
            ActivationError::Os(e) => e.fmt(f),
        }
    }
}

impl error::Error for ActivationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ActivationError::Os(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::redundant_clone)]
mod tests {
    use std::error::Error;
    use std::io;

    use super::*;

    // Eat attributes for testing
    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!("{:?}, {}", NotSupportedError::new(), NotSupportedError::new().clone());
        let _ = format!(
            "{:?}, {}",
            ActivationError::NotFound("com.apple.keylayout.US".into()),
            ActivationError::Denied("com.apple.keylayout.US".into())
        );
    }

    #[test]
    fn os_error_records_call_site() {
        let err = os_error!(io::Error::other("TISSelectInputSource returned -50"));
        let message = err.to_string();
        assert!(message.starts_with("os error at "));
        assert!(message.contains(file!()));
        assert!(message.ends_with("TISSelectInputSource returned -50"));
    }

    #[test]
    fn activation_error_exposes_os_source() {
        let err = ActivationError::from(os_error!("status -25"));
        assert!(err.source().is_some());
        assert!(ActivationError::NotFound("x".into()).source().is_none());
    }
}

//! Handles to the text input sources known to a registry.
//!
//! An [`InputSource`] is obtained from an
//! [`InputSourceRegistry`](crate::registry::InputSourceRegistry), either for the source that is
//! currently active or for a specific [`InputSourceId`]. The handle is a live reference to the
//! registry entry: metadata is read from the registry on each call, and any platform resource the
//! handle keeps alive is released when the last clone is dropped.
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::as_any::{impl_dyn_casting, AsAny};
use crate::error::ActivationError;
use crate::icon::Icon;

/// Identifier of an input source, as known to the platform registry.
///
/// The format is platform-specific and should be treated as opaque, e.g.
/// `com.apple.keylayout.US` on macOS or `00000409` on Windows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InputSourceId(SmolStr);

impl InputSourceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InputSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&str> for InputSourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for InputSourceId {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

impl AsRef<str> for InputSourceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for InputSourceId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for InputSourceId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for InputSourceId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Handle to a text input source: a keyboard layout or an input method.
///
/// Two handles are equal when they refer to the same identifier, even if they were obtained
/// separately.
#[derive(Debug, Clone)]
pub struct InputSource(pub Arc<dyn InputSourceProvider>);

impl InputSource {
    pub fn new(provider: impl InputSourceProvider) -> Self {
        Self(Arc::new(provider))
    }
}

impl Deref for InputSource {
    type Target = dyn InputSourceProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for InputSource {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref().eq(other.0.as_ref())
    }
}

impl Eq for InputSource {}

impl Hash for InputSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Provider of the [`InputSource`], implemented by every registry backend.
pub trait InputSourceProvider: AsAny + fmt::Debug + Send + Sync {
    /// Identifier of this input source.
    ///
    /// Fixed when the handle is created and never changes afterwards.
    fn id(&self) -> &InputSourceId;

    /// The localized, human readable name of this input source, e.g. `U.S.` or `Pinyin - Simplified`.
    ///
    /// Read from the registry, so it follows changes to the underlying entry (such as a change of
    /// the system language).
    fn display_name(&self) -> String;

    /// The icon the platform shows for this input source.
    ///
    /// Returns `None` when the registry has no image for it.
    ///
    /// ## Platform-specific
    ///
    /// - **Windows:** Always returns `None`.
    fn icon(&self) -> Option<Icon>;

    /// Ask the platform to make this the active input source.
    ///
    /// This changes global state: every application sees the new input source. The request is
    /// forwarded as-is, it is neither validated up front nor retried. When several callers activate
    /// concurrently the platform decides which one wins.
    fn activate(&self) -> Result<(), ActivationError>;
}

impl PartialEq for dyn InputSourceProvider + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for dyn InputSourceProvider + '_ {}

impl_dyn_casting!(InputSourceProvider);

use switchkey_core::error::{ActivationError, NotSupportedError};
use switchkey_core::input_source::InputSource;
use switchkey_core::registry::InputSourceRegistry;
use tracing::{debug, trace, warn};

use crate::platform_impl;

/// Access to the input sources of a registry.
///
/// Holds no state of its own between calls: the registry is the source of truth for which input
/// sources exist and which one is current.
#[derive(Debug)]
pub struct InputSources {
    registry: Box<dyn InputSourceRegistry>,
}

impl InputSources {
    /// Use the native registry of this platform.
    ///
    /// ## Platform-specific
    ///
    /// - **macOS:** Only input sources enabled in System Settings can be looked up. Use
    ///   [`with_registry`](Self::with_registry) with a configured
    ///   [`TisRegistry`](crate::platform::macos::TisRegistry) to change that.
    /// - **Other than macOS and Windows:** Always fails with [`NotSupportedError`].
    pub fn new() -> Result<Self, NotSupportedError> {
        platform_impl::registry().map(|registry| Self { registry })
    }

    /// Use the given registry instead of the native one.
    pub fn with_registry(registry: impl InputSourceRegistry + 'static) -> Self {
        Self { registry: Box::new(registry) }
    }

    pub fn registry(&self) -> &dyn InputSourceRegistry {
        self.registry.as_ref()
    }

    /// The input source that is currently active.
    pub fn current(&self) -> InputSource {
        let current = self.registry.current();
        trace!(id = %current.id(), "current input source");
        current
    }

    /// The input source with identifier `id`, or `None` if the registry has no such entry.
    pub fn lookup(&self, id: &str) -> Option<InputSource> {
        let source = self.registry.lookup(id);
        trace!(id, found = source.is_some(), "looked up input source");
        source
    }

    /// Ask the platform to make `source` the active input source.
    ///
    /// Same as [`InputSourceProvider::activate`](crate::InputSourceProvider::activate), with
    /// logging.
    pub fn activate(&self, source: &InputSource) -> Result<(), ActivationError> {
        debug!(id = %source.id(), "activating input source");
        source.activate().inspect_err(|err| warn!(id = %source.id(), %err, "activation failed"))
    }

    /// Look up `id` and activate it.
    ///
    /// Returns the activated handle, or `None` without touching the registry's current input
    /// source when `id` is unknown.
    pub fn activate_id(&self, id: &str) -> Result<Option<InputSource>, ActivationError> {
        let Some(source) = self.lookup(id) else {
            debug!(id, "not activating unknown input source");
            return Ok(None);
        };
        self.activate(&source)?;
        Ok(Some(source))
    }
}

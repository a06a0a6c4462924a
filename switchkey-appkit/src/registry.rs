use std::ptr::NonNull;

use dispatch2::run_on_main;
use objc2_core_foundation::{CFDictionary, CFRetained, CFString};
use switchkey_core::input_source::{InputSource, InputSourceProvider as _};
use switchkey_core::registry::InputSourceRegistry;
use tracing::{debug, error, warn};

use crate::ffi::{self, Boolean};
use crate::input_source::TisInputSource;

/// The Text Input Source registry of the running macOS session.
///
/// Holds no state besides its lookup options: every call queries TIS.
///
/// TIS only works on the main thread. Calls made from other threads are sent to the main
/// dispatch queue and block until it has run them, so the main thread must not be blocked on the
/// calling thread at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TisRegistry {
    include_all_installed: bool,
}

impl TisRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`lookup`](InputSourceRegistry::lookup) also finds input sources that are installed
    /// but not enabled in System Settings.
    ///
    /// Disabled by default, in which case only enabled input sources are found.
    pub fn with_include_all_installed(mut self, include_all_installed: bool) -> Self {
        self.include_all_installed = include_all_installed;
        self
    }

    pub fn include_all_installed(&self) -> bool {
        self.include_all_installed
    }
}

/// The current input source, or the current keyboard layout if TIS has no current source.
fn current_or_layout<T>(
    current: impl FnOnce() -> Option<T>,
    layout: impl FnOnce() -> Option<T>,
) -> Option<T> {
    current().or_else(|| {
        warn!("`TISCopyCurrentKeyboardInputSource` returned null ptr, using the keyboard layout");
        layout()
    })
}

impl InputSourceRegistry for TisRegistry {
    /// # Panics
    ///
    /// If TIS reports neither a current input source nor a current keyboard layout, which only
    /// happens when the session has no keyboard input at all.
    fn current(&self) -> InputSource {
        let source = run_on_main(|mtm| {
            current_or_layout(
                // SAFETY: "Copy" functions return a +1 retain count.
                || unsafe {
                    TisInputSource::from_owned(ffi::TISCopyCurrentKeyboardInputSource(), mtm)
                },
                || unsafe {
                    TisInputSource::from_owned(ffi::TISCopyCurrentKeyboardLayoutInputSource(), mtm)
                },
            )
        });
        match source {
            Some(source) => InputSource::new(source),
            None => {
                error!("`TISCopyCurrentKeyboardLayoutInputSource` returned null ptr");
                panic!("the session has no current keyboard input source");
            },
        }
    }

    fn lookup(&self, id: &str) -> Option<InputSource> {
        let include_all_installed = self.include_all_installed as Boolean;
        let source = run_on_main(|mtm| {
            let value = CFString::from_str(id);
            // SAFETY: The property key is a constant exported by Carbon.
            let key = unsafe { ffi::kTISPropertyInputSourceID };
            let properties = CFDictionary::from_slices(&[key], &[&*value]);

            // SAFETY: "Create" functions return a +1 retain count.
            let list =
                unsafe { ffi::TISCreateInputSourceList(&properties, include_all_installed) };
            let list = unsafe { CFRetained::from_raw(NonNull::new(list)?) };
            list.into_iter()
                .map(|source| TisInputSource::new(source, mtm))
                .find(|source| source.id() == id)
        });
        if source.is_none() {
            debug!(id, "no input source with this identifier");
        }
        source.map(InputSource::new)
    }
}

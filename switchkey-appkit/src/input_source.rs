use std::fmt;
use std::ptr::NonNull;

use dispatch2::run_on_main;
use objc2::MainThreadMarker;
use objc2_core_foundation::{CFRetained, CFURL};
use objc2_foundation::NSURL;
use switchkey_core::error::ActivationError;
use switchkey_core::icon::Icon;
use switchkey_core::input_source::{InputSourceId, InputSourceProvider};
use switchkey_core::os_error;
use tracing::{debug, trace_span, warn};

use crate::ffi::{self, TISInputSource};
use crate::icon::icon_from_url;
use crate::util;

/// An entry of the Text Input Source registry, kept alive by a retained `TISInputSourceRef`.
///
/// Text Input Source Services must be used from the main thread. Every method that talks to TIS
/// runs there, blocking the calling thread until the main thread has serviced its queue.
#[derive(Clone)]
pub struct TisInputSource {
    source: CFRetained<TISInputSource>,
    id: InputSourceId,
}

// SAFETY: The input source is only queried and selected from the main thread (see `on_main`).
// Other threads only retain and release it, which CoreFoundation allows from any thread.
unsafe impl Send for TisInputSource {}
unsafe impl Sync for TisInputSource {}

impl TisInputSource {
    pub(crate) fn new(source: CFRetained<TISInputSource>, _mtm: MainThreadMarker) -> Self {
        let id = util::string_property(&source, unsafe { ffi::kTISPropertyInputSourceID })
            .unwrap_or_else(|| {
                warn!("input source without an identifier");
                String::new()
            });
        Self { source, id: InputSourceId::from(id) }
    }

    /// Take ownership of a `TISInputSourceRef` returned by a "copy" or "create" function.
    ///
    /// # Safety
    ///
    /// `ptr` must be a valid `TISInputSourceRef` with a +1 retain count.
    pub(crate) unsafe fn from_owned(
        ptr: *mut TISInputSource,
        mtm: MainThreadMarker,
    ) -> Option<Self> {
        let ptr = NonNull::new(ptr)?;
        // SAFETY: Upheld by the caller.
        Some(Self::new(unsafe { CFRetained::from_raw(ptr) }, mtm))
    }

    /// The raw `TISInputSourceRef`, valid for as long as this handle is alive.
    pub fn as_ptr(&self) -> *mut std::ffi::c_void {
        CFRetained::as_ptr(&self.source).as_ptr().cast()
    }

    fn on_main<R: Send>(&self, f: impl FnOnce(&TISInputSource) -> R + Send) -> R {
        run_on_main(move |_mtm| f(&self.source))
    }
}

impl fmt::Debug for TisInputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TisInputSource").field("id", &self.id).finish_non_exhaustive()
    }
}

impl InputSourceProvider for TisInputSource {
    fn id(&self) -> &InputSourceId {
        &self.id
    }

    fn display_name(&self) -> String {
        self.on_main(|source| {
            util::string_property(source, unsafe { ffi::kTISPropertyLocalizedName })
        })
        .unwrap_or_else(|| {
            warn!(id = %self.id, "input source has no localized name");
            self.id.to_string()
        })
    }

    fn icon(&self) -> Option<Icon> {
        // Drawing the image goes through `NSGraphicsContext`, which is main thread only as well.
        self.on_main(|source| {
            let url =
                util::property::<CFURL>(source, unsafe { ffi::kTISPropertyIconImageURL })?;
            // SAFETY: `CFURL` is toll-free bridged with `NSURL`.
            let url = unsafe { &*(url as *const CFURL).cast::<NSURL>() };
            icon_from_url(url)
        })
    }

    fn activate(&self) -> Result<(), ActivationError> {
        let _span = trace_span!("TISSelectInputSource", id = %self.id).entered();
        // SAFETY: `source` is a valid, retained input source.
        let status = self.on_main(|source| unsafe { ffi::TISSelectInputSource(source) });
        util::os_status(status).map_err(|status| {
            debug!(status, "input source selection failed");
            if status == ffi::paramErr {
                ActivationError::Denied(self.id.clone())
            } else {
                os_error!(format!("TISSelectInputSource failed with OSStatus {status}")).into()
            }
        })
    }
}

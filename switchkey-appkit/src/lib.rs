//! # macOS / AppKit
//!
//! Input sources on macOS are managed by the Text Input Source Services of the Carbon framework.
//! Every keyboard layout and input method enabled in System Settings is an entry in that
//! registry, identified by a reverse-DNS string such as `com.apple.keylayout.US` or
//! `com.apple.inputmethod.SCIM.ITABC`.
//!
//! [`TisRegistry`] queries the registry directly on each call. Handles keep their
//! `TISInputSourceRef` retained and release it on drop.
//!
//! ## Threading
//!
//! Text Input Source Services and the AppKit drawing used for icons are main thread only. The
//! handles are still `Send + Sync`: calls from other threads are dispatched to the main queue
//! synchronously, which requires the main thread to be running its run loop (as any AppKit
//! application does) rather than waiting on the caller.
//!
//! ## Activation
//!
//! `TISSelectInputSource` refuses sources that are not "select capable" (for example an input
//! mode of an input method that is not enabled); this is reported as
//! [`ActivationError::Denied`](switchkey_core::error::ActivationError::Denied). Any other
//! non-zero `OSStatus` is reported as an OS error.
#![cfg(target_os = "macos")] // TODO: Remove once `objc2` allows compiling on all platforms

mod ffi;
mod icon;
mod input_source;
mod registry;
mod util;

pub use self::input_source::TisInputSource;
pub use self::registry::TisRegistry;

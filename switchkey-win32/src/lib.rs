//! # Windows
//!
//! Windows has no system-wide registry of input sources in the macOS sense. The closest match is
//! the input language list: every keyboard layout loaded into the session has a handle (`HKL`),
//! and each thread has one active layout.
//!
//! - Identifiers are the `HKL` as eight upper-case hex digits, e.g. `04090409` for US English.
//! - The "current" input source is the one of the foreground window's thread.
//! - Activation posts `WM_INPUTLANGCHANGEREQUEST` to the foreground window, which is what the
//!   language bar does. The window may ignore the request; no error is reported in that case.
//! - Layouts have no icons.
#![cfg(target_os = "windows")]

mod layout;
mod registry;
mod util;

pub use self::layout::KeyboardLayout;
pub use self::registry::Win32Registry;

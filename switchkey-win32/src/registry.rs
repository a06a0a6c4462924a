use std::ptr;

use switchkey_core::input_source::InputSource;
use switchkey_core::registry::InputSourceRegistry;
use tracing::{debug, warn};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{GetKeyboardLayout, GetKeyboardLayoutList};
use windows_sys::Win32::UI::TextServices::HKL;
use windows_sys::Win32::UI::WindowsAndMessaging::{GetForegroundWindow, GetWindowThreadProcessId};

use crate::layout::KeyboardLayout;
use crate::util;

/// The keyboard layouts loaded into the current desktop session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Win32Registry {
    _marker: (),
}

impl Win32Registry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Every layout in the session's input language list.
fn loaded_layouts() -> Vec<HKL> {
    let count = unsafe { GetKeyboardLayoutList(0, ptr::null_mut()) };
    if count <= 0 {
        warn!("the keyboard layout list is empty");
        return Vec::new();
    }
    let mut layouts = vec![ptr::null_mut(); count as usize];
    let written = unsafe { GetKeyboardLayoutList(count, layouts.as_mut_ptr()) };
    layouts.truncate(written.max(0) as usize);
    layouts
}

impl InputSourceRegistry for Win32Registry {
    fn current(&self) -> InputSource {
        // Layouts are per thread: the active one is the foreground window's.
        let hwnd = unsafe { GetForegroundWindow() };
        let thread =
            if hwnd.is_null() { 0 } else { unsafe { GetWindowThreadProcessId(hwnd, ptr::null_mut()) } };
        let hkl = unsafe { GetKeyboardLayout(thread) };
        InputSource::new(KeyboardLayout::new(hkl))
    }

    fn lookup(&self, id: &str) -> Option<InputSource> {
        let hkl = loaded_layouts().into_iter().find(|&hkl| util::layout_id(hkl) == id);
        if hkl.is_none() {
            debug!(id, "no keyboard layout with this identifier");
        }
        hkl.map(|hkl| InputSource::new(KeyboardLayout::new(hkl)))
    }
}

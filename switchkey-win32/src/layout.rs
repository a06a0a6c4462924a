use std::io;

use switchkey_core::error::ActivationError;
use switchkey_core::icon::Icon;
use switchkey_core::input_source::{InputSourceId, InputSourceProvider};
use switchkey_core::os_error;
use tracing::{debug, trace_span, warn};
use windows_sys::Win32::Globalization::{GetLocaleInfoW, LOCALE_SLOCALIZEDDISPLAYNAME};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{ActivateKeyboardLayout, KLF_SETFORPROCESS};
use windows_sys::Win32::UI::TextServices::HKL;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, PostMessageW, WM_INPUTLANGCHANGEREQUEST,
};

use crate::util;

/// Long enough for any localized locale display name.
const DISPLAY_NAME_CAPACITY: usize = 256;

/// A keyboard layout loaded into the session, identified by its `HKL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardLayout {
    // Stored as an integer, `HKL` is a raw pointer and thus neither `Send` nor `Sync`.
    hkl: isize,
    id: InputSourceId,
}

impl KeyboardLayout {
    pub(crate) fn new(hkl: HKL) -> Self {
        Self { hkl: hkl as isize, id: InputSourceId::from(util::layout_id(hkl)) }
    }

    /// The raw `HKL` of this layout.
    pub fn hkl(&self) -> HKL {
        self.hkl as HKL
    }

    fn language_id(&self) -> u16 {
        util::loword(util::hkl_bits(self.hkl()))
    }
}

impl InputSourceProvider for KeyboardLayout {
    fn id(&self) -> &InputSourceId {
        &self.id
    }

    fn display_name(&self) -> String {
        let mut buffer = [0u16; DISPLAY_NAME_CAPACITY];
        // A language id is a valid LCID with the default sort order.
        let len = unsafe {
            GetLocaleInfoW(
                self.language_id() as u32,
                LOCALE_SLOCALIZEDDISPLAYNAME,
                buffer.as_mut_ptr(),
                buffer.len() as i32,
            )
        };
        if len == 0 {
            warn!(id = %self.id, error = %io::Error::last_os_error(), "no display name for layout");
            return self.id.to_string();
        }
        util::decode_wide(&buffer[..len as usize]).to_string_lossy().into_owned()
    }

    fn icon(&self) -> Option<Icon> {
        None
    }

    fn activate(&self) -> Result<(), ActivationError> {
        let _span = trace_span!("activate_keyboard_layout", id = %self.id).entered();

        let hwnd = unsafe { GetForegroundWindow() };
        if !hwnd.is_null() {
            // The foreground window switches its own thread, and the shell follows.
            let posted =
                unsafe { PostMessageW(hwnd, WM_INPUTLANGCHANGEREQUEST, 0, self.hkl) };
            if posted == 0 {
                return Err(os_error!(io::Error::last_os_error()).into());
            }
            return Ok(());
        }

        debug!("no foreground window, activating for this process only");
        let previous = unsafe { ActivateKeyboardLayout(self.hkl(), KLF_SETFORPROCESS) };
        if previous.is_null() {
            let error = io::Error::last_os_error();
            // `ERROR_INVALID_PARAMETER`, the layout was unloaded.
            if error.raw_os_error() == Some(87) {
                return Err(ActivationError::NotFound(self.id.clone()));
            }
            return Err(os_error!(error).into());
        }
        Ok(())
    }
}


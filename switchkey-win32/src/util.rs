use std::ffi::OsString;
use std::os::windows::prelude::OsStringExt;

use windows_sys::Win32::UI::TextServices::HKL;

pub fn decode_wide(mut wide_c_string: &[u16]) -> OsString {
    if let Some(null_pos) = wide_c_string.iter().position(|c| *c == 0) {
        wide_c_string = &wide_c_string[..null_pos];
    }

    OsString::from_wide(wide_c_string)
}

#[inline(always)]
pub(crate) const fn loword(x: u32) -> u16 {
    (x & 0xffff) as u16
}

/// The low 32 bits of an `HKL`: language id in the low word, device handle in the high word.
#[inline(always)]
pub(crate) fn hkl_bits(hkl: HKL) -> u32 {
    hkl as usize as u32
}

/// The identifier of a keyboard layout, e.g. `04090409` for US English.
pub(crate) fn layout_id(hkl: HKL) -> String {
    format!("{:08X}", hkl_bits(hkl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_ids_are_fixed_width_hex() {
        assert_eq!(layout_id(0x0409_0409 as HKL), "04090409");
        assert_eq!(layout_id(0x0000_0411 as HKL), "00000411");
        // Sign-extended handles on 64-bit only keep their low 32 bits.
        assert_eq!(layout_id(0xFFFF_FFFF_F0C0_0409_u64 as usize as HKL), "F0C00409");
    }

    #[test]
    fn decode_stops_at_nul() {
        let wide: Vec<u16> = "English\0junk".encode_utf16().collect();
        assert_eq!(decode_wide(&wide), "English");
    }
}

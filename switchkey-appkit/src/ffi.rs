// TODO: Switch to `objc2-carbon` once it exposes the Text Input Source Services.

#![allow(non_upper_case_globals, non_snake_case)]

use std::ffi::c_void;

use objc2_core_foundation::{cf_type, CFArray, CFDictionary, CFString};

pub type OSStatus = i32;
pub type Boolean = u8;

/// `paramErr`, returned by `TISSelectInputSource` for sources that cannot be selected.
pub const paramErr: OSStatus = -50;

#[repr(transparent)]
pub struct TISInputSource(c_void);

cf_type!(
    unsafe impl TISInputSource {}
);

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    pub static kTISPropertyInputSourceID: &'static CFString;
    pub static kTISPropertyLocalizedName: &'static CFString;
    pub static kTISPropertyIconImageURL: &'static CFString;

    pub fn TISCopyCurrentKeyboardInputSource() -> *mut TISInputSource;

    pub fn TISCopyCurrentKeyboardLayoutInputSource() -> *mut TISInputSource;

    pub fn TISCreateInputSourceList(
        properties: &CFDictionary<CFString, CFString>,
        includeAllInstalled: Boolean,
    ) -> *mut CFArray<TISInputSource>;

    pub fn TISGetInputSourceProperty(
        inputSource: &TISInputSource,
        propertyKey: &CFString,
    ) -> *mut c_void;

    pub fn TISSelectInputSource(inputSource: &TISInputSource) -> OSStatus;
}

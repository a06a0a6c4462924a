use std::ffi::c_uchar;
use std::{ptr, slice};

use objc2::AllocAnyThread;
use objc2_app_kit::{NSBitmapImageRep, NSDeviceRGBColorSpace, NSGraphicsContext, NSImage};
use objc2_foundation::{NSPoint, NSRect, NSURL};
use switchkey_core::icon::Icon;
use tracing::warn;

/// Load the image at `url` and rasterise it at its natural size.
pub(crate) fn icon_from_url(url: &NSURL) -> Option<Icon> {
    let Some(image) = (unsafe { NSImage::initWithContentsOfURL(NSImage::alloc(), url) }) else {
        warn!(url = ?url, "failed to load input source icon");
        return None;
    };

    let size = unsafe { image.size() };
    let width = size.width.round() as u32;
    let height = size.height.round() as u32;
    if width == 0 || height == 0 {
        warn!(url = ?url, "input source icon has no size");
        return None;
    }

    // Let AppKit allocate the pixel buffer. Bitmap contexts only support premultiplied alpha.
    let bitmap = unsafe {
        NSBitmapImageRep::initWithBitmapDataPlanes_pixelsWide_pixelsHigh_bitsPerSample_samplesPerPixel_hasAlpha_isPlanar_colorSpaceName_bytesPerRow_bitsPerPixel(
            NSBitmapImageRep::alloc(),
            ptr::null_mut::<*mut c_uchar>(),
            width as isize,
            height as isize,
            8,
            4,
            true,
            false,
            NSDeviceRGBColorSpace,
            width as isize * 4,
            32,
        )
    }?;
    let context = unsafe { NSGraphicsContext::graphicsContextWithBitmapImageRep(&bitmap) }?;

    unsafe {
        NSGraphicsContext::saveGraphicsState_class();
        NSGraphicsContext::setCurrentContext(Some(&context));
        image.drawInRect(NSRect::new(NSPoint::new(0.0, 0.0), size));
        context.flushGraphics();
        NSGraphicsContext::restoreGraphicsState_class();
    }

    let len = width as usize * height as usize * 4;
    // SAFETY: The bitmap was created with `width * 4` bytes per row and a single plane.
    let premultiplied = unsafe { slice::from_raw_parts(bitmap.bitmapData(), len) };
    let rgba = unpremultiply(premultiplied);

    match Icon::from_rgba(rgba, width, height) {
        Ok(icon) => Some(icon),
        Err(err) => {
            warn!(%err, "rasterised input source icon is malformed");
            None
        },
    }
}

fn unpremultiply(premultiplied: &[u8]) -> Vec<u8> {
    let mut rgba = premultiplied.to_vec();
    for pixel in rgba.chunks_exact_mut(4) {
        let alpha = pixel[3] as u32;
        if alpha == 0 || alpha == 255 {
            continue;
        }
        for channel in &mut pixel[..3] {
            *channel = ((*channel as u32 * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::unpremultiply;

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        let pixels = [0, 0, 0, 0, 255, 0, 0, 255, 64, 32, 0, 128];
        assert_eq!(unpremultiply(&pixels), vec![0, 0, 0, 0, 255, 0, 0, 255, 128, 64, 0, 128]);
    }
}

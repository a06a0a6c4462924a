use std::error::Error;
use std::sync::Arc;
use std::{fmt, mem};

pub(crate) const PIXEL_SIZE: usize = mem::size_of::<u32>();

/// Largest summed channel spread an icon may have and still be drawn as a template image.
const TEMPLATE_SPREAD: u32 = 9;

/// The icon of an input source, as 32bpp RGBA pixels with straight (non-premultiplied) alpha.
///
/// Cloning is cheap, the pixel buffer is shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

#[derive(Debug)]
/// An error produced when using [`Icon::from_rgba`] with invalid arguments.
pub enum BadIcon {
    /// Produced when the length of the `rgba` argument isn't divisible by 4, thus `rgba` can't be
    /// safely interpreted as 32bpp RGBA pixels.
    ByteCountNotDivisibleBy4 { byte_count: usize },
    /// Produced when the number of pixels (`rgba.len() / 4`) isn't equal to `width * height`.
    /// At least one of your arguments is incorrect.
    DimensionsVsPixelCount { width: u32, height: u32, width_x_height: u64, pixel_count: usize },
}

impl fmt::Display for BadIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadIcon::ByteCountNotDivisibleBy4 { byte_count } => write!(
                f,
                "The length of the `rgba` argument ({byte_count:?}) isn't divisible by 4, making \
                 it impossible to interpret as 32bpp RGBA pixels.",
            ),
            BadIcon::DimensionsVsPixelCount { width, height, width_x_height, pixel_count } => {
                write!(
                    f,
                    "The specified dimensions ({width:?}x{height:?}) don't match the number of \
                     pixels supplied by the `rgba` argument ({pixel_count:?}). For those \
                     dimensions, the expected pixel count is {width_x_height:?}.",
                )
            },
        }
    }
}

impl Error for BadIcon {}

impl Icon {
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, BadIcon> {
        if rgba.len() % PIXEL_SIZE != 0 {
            return Err(BadIcon::ByteCountNotDivisibleBy4 { byte_count: rgba.len() });
        }
        let pixel_count = rgba.len() / PIXEL_SIZE;
        // Cannot overflow, unlike `usize` on 32-bit targets.
        let width_x_height = u64::from(width) * u64::from(height);
        if pixel_count as u64 != width_x_height {
            Err(BadIcon::DimensionsVsPixelCount { width, height, width_x_height, pixel_count })
        } else {
            Ok(Icon { rgba: rgba.into(), width, height })
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Whether the icon is close enough to monochrome to be drawn as a template image, i.e. tinted
    /// by the host to follow the light/dark appearance of a menu bar.
    ///
    /// Colors are compared after premultiplying by alpha, so a dark glyph on a transparent
    /// background counts as monochrome while a colored flag does not.
    pub fn can_template(&self) -> bool {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for pixel in self.rgba.chunks_exact(PIXEL_SIZE) {
            let alpha = pixel[3] as u32;
            for channel in 0..3 {
                let value = (pixel[channel] as u32 * alpha / 255) as u8;
                min[channel] = min[channel].min(value);
                max[channel] = max[channel].max(value);
            }
        }

        let spread: u32 = (0..3).map(|c| max[c].saturating_sub(min[c]) as u32).sum();
        spread <= TEMPLATE_SPREAD
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        pixel.repeat((width * height) as usize)
    }

    #[test]
    fn rejects_partial_pixels() {
        assert!(matches!(
            Icon::from_rgba(vec![0; 7], 1, 1),
            Err(BadIcon::ByteCountNotDivisibleBy4 { byte_count: 7 })
        ));
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let err = Icon::from_rgba(solid(2, 2, [0; 4]), 3, 2).unwrap_err();
        assert!(matches!(
            err,
            BadIcon::DimensionsVsPixelCount { width_x_height: 6, pixel_count: 4, .. }
        ));
        assert!(err.to_string().contains("(3x2)"));
    }

    #[test]
    fn huge_dimensions_are_rejected() {
        let err = Icon::from_rgba(Vec::new(), u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            BadIcon::DimensionsVsPixelCount { width_x_height: 0xFFFF_FFFE_0000_0001, pixel_count: 0, .. }
        ));
    }

    #[test]
    fn black_glyph_on_transparent_is_template() {
        let mut rgba = solid(4, 4, [0, 0, 0, 0]);
        // Opaque black stroke down the middle.
        for y in 0..4 {
            let offset = (y * 4 + 1) * PIXEL_SIZE;
            rgba[offset..offset + PIXEL_SIZE].copy_from_slice(&[0, 0, 0, 255]);
        }
        let icon = Icon::from_rgba(rgba, 4, 4).unwrap();
        assert!(icon.can_template());
    }

    #[test]
    fn colored_flag_is_not_template() {
        let mut rgba = solid(2, 1, [255, 0, 0, 255]);
        rgba[4..8].copy_from_slice(&[0, 0, 255, 255]);
        let icon = Icon::from_rgba(rgba, 2, 1).unwrap();
        assert!(!icon.can_template());
    }

    #[test]
    fn white_glyph_on_transparent_is_not_template() {
        // Premultiplied, white differs from the transparent background on every channel.
        let mut rgba = solid(2, 1, [0, 0, 0, 0]);
        rgba[4..8].copy_from_slice(&[255, 255, 255, 255]);
        let icon = Icon::from_rgba(rgba, 2, 1).unwrap();
        assert!(!icon.can_template());
    }

    #[test]
    fn slight_noise_is_still_template() {
        let mut rgba = solid(3, 1, [10, 10, 10, 255]);
        rgba[4..8].copy_from_slice(&[13, 12, 11, 255]);
        rgba[8..12].copy_from_slice(&[11, 13, 12, 255]);
        let icon = Icon::from_rgba(rgba, 3, 1).unwrap();
        assert!(icon.can_template());
    }

    #[test]
    fn empty_icon_is_template() {
        let icon = Icon::from_rgba(Vec::new(), 0, 0).unwrap();
        assert!(icon.can_template());
    }

    #[test]
    fn clones_share_pixels() {
        let icon = Icon::from_rgba(solid(1, 1, [1, 2, 3, 4]), 1, 1).unwrap();
        let copy = icon.clone();
        assert_eq!(icon, copy);
        assert!(std::ptr::eq(icon.rgba().as_ptr(), copy.rgba().as_ptr()));
    }
}

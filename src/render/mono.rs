//! # Monochrome Conversion
//!
//! Turns decoded images into the packed 1-bit rows that
//! [`RasterImage`] carries.
//!
//! ## Intensity
//!
//! Conversion works on *intensity*, the inverse of luminance:
//!
//! ```text
//! intensity = 1.0 - luma / 255
//!
//! 0.0 = white (no dot)     1.0 = black (dot)
//! ```
//!
//! A pixel prints when its intensity is above the cut-off. With
//! [`Dither::Threshold`] the cut-off is the configured threshold everywhere;
//! with [`Dither::Bayer`] it comes from an 8×8 ordered matrix, trading edge
//! sharpness for grey levels on photos.
//!
//! ## Bit Packing
//!
//! ```text
//! [true, true, false, false, true, false, true, false] → 0b1100_1010
//! ```

use image::DynamicImage;
use image::imageops::FilterType;
use log::debug;

use crate::error::EscPosError;
use crate::protocol::graphics::RasterImage;

/// Bayer 8x8 ordered dithering matrix, values 0-63
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// How grey pixels become dots
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dither {
    /// Fixed cut-off in `0.0..=1.0`
    Threshold(f32),
    /// Ordered 8×8 Bayer dithering
    Bayer,
}

impl Default for Dither {
    fn default() -> Self {
        Self::Threshold(0.5)
    }
}

impl Dither {
    /// Whether the dot at `(x, y)` with `intensity` prints
    #[inline]
    pub fn should_print(self, x: usize, y: usize, intensity: f32) -> bool {
        match self {
            Self::Threshold(cutoff) => intensity > cutoff,
            Self::Bayer => intensity > (BAYER8[y & 7][x & 7] as f32 + 0.5) / 64.0,
        }
    }
}

/// Pack a row of pixels (true = black) MSB-first, padding with white.
pub fn pack_row(row: &[bool]) -> Vec<u8> {
    row.chunks(8)
        .map(|bits| {
            bits.iter()
                .enumerate()
                .fold(0u8, |byte, (i, &black)| byte | (u8::from(black) << (7 - i)))
        })
        .collect()
}

/// Convert a row-major intensity buffer to a tightly packed raster.
///
/// ## Errors
///
/// [`EscPosError::RasterSize`] if `intensity.len() != width * height`.
pub fn intensity_to_raster(
    width: usize,
    height: usize,
    intensity: &[f32],
    dither: Dither,
) -> Result<RasterImage, EscPosError> {
    if intensity.len() != width * height {
        return Err(EscPosError::RasterSize(format!(
            "expected {} intensity values ({}×{}), got {}",
            width * height,
            width,
            height,
            intensity.len()
        )));
    }

    let mut data = Vec::with_capacity(width.div_ceil(8) * height);
    let mut row = Vec::with_capacity(width);
    for y in 0..height {
        row.clear();
        row.extend(
            intensity[y * width..(y + 1) * width]
                .iter()
                .enumerate()
                .map(|(x, &v)| dither.should_print(x, y, v)),
        );
        data.extend(pack_row(&row));
    }
    RasterImage::packed(width, height, data)
}

/// Convert a decoded image to a raster no wider than `max_width` dots.
///
/// Wider images are scaled down preserving aspect ratio. Pixels with
/// alpha below 50% count as white.
pub fn image_to_raster(
    image: &DynamicImage,
    max_width: u16,
    dither: Dither,
) -> Result<RasterImage, EscPosError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EscPosError::Image("image has no pixels".to_string()));
    }

    let max_width = u32::from(max_width);
    let scaled;
    let image = if image.width() > max_width {
        let height = (u64::from(image.height()) * u64::from(max_width) / u64::from(image.width()))
            .max(1) as u32;
        debug!(
            "scaling {}x{} to {}x{}",
            image.width(),
            image.height(),
            max_width,
            height
        );
        scaled = image.resize_exact(max_width, height, FilterType::Triangle);
        &scaled
    } else {
        image
    };

    let gray = image.to_luma_alpha8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let intensity: Vec<f32> = gray
        .pixels()
        .map(|p| {
            let [luma, alpha] = p.0;
            if alpha < 128 {
                0.0
            } else {
                1.0 - f32::from(luma) / 255.0
            }
        })
        .collect();

    intensity_to_raster(width, height, &intensity, dither)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, LumaA};

    #[test]
    fn test_pack_row() {
        let row = [true, true, false, false, true, false, true, false];
        assert_eq!(pack_row(&row), vec![0xCA]);
    }

    #[test]
    fn test_pack_row_padding() {
        let row = [true; 10];
        assert_eq!(pack_row(&row), vec![0xFF, 0xC0]);
        assert!(pack_row(&[]).is_empty());
    }

    #[test]
    fn test_threshold() {
        let d = Dither::Threshold(0.5);
        assert!(d.should_print(0, 0, 0.6));
        assert!(!d.should_print(0, 0, 0.5));
    }

    #[test]
    fn test_bayer_extremes() {
        for y in 0..8 {
            for x in 0..8 {
                assert!(Dither::Bayer.should_print(x, y, 1.0));
                assert!(!Dither::Bayer.should_print(x, y, 0.0));
            }
        }
    }

    #[test]
    fn test_intensity_to_raster() {
        let intensity = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0];
        let raster = intensity_to_raster(10, 1, &intensity, Dither::default()).unwrap();
        assert_eq!(raster.bytes_per_line(), 2);
        assert_eq!(raster.data(), &[0xAA, 0xC0]);
    }

    #[test]
    fn test_intensity_size_mismatch() {
        assert!(intensity_to_raster(4, 2, &[0.0; 7], Dither::default()).is_err());
    }

    #[test]
    fn test_image_to_raster_black_left_half() {
        let img = GrayImage::from_fn(16, 2, |x, _| if x < 8 { Luma([0]) } else { Luma([255]) });
        let raster = image_to_raster(&DynamicImage::ImageLuma8(img), 512, Dither::default())
            .unwrap();
        assert_eq!(raster.width_dots(), 16);
        assert_eq!(raster.data(), &[0xFF, 0x00, 0xFF, 0x00]);
    }

    #[test]
    fn test_image_to_raster_scales_down() {
        let img = GrayImage::from_pixel(1024, 100, Luma([0]));
        let raster = image_to_raster(&DynamicImage::ImageLuma8(img), 512, Dither::default())
            .unwrap();
        assert_eq!(raster.width_dots(), 512);
        assert_eq!(raster.height(), 50);
    }

    #[test]
    fn test_transparent_pixels_are_white() {
        let img: ImageBuffer<LumaA<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 1, LumaA([0, 0]));
        let raster = image_to_raster(&DynamicImage::ImageLumaA8(img), 512, Dither::default())
            .unwrap();
        assert_eq!(raster.data(), &[0x00]);
    }
}

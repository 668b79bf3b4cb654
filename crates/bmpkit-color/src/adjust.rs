//! Per-pixel recolor operations
//!
//! Every operation here is a pure function of one pixel applied across the
//! whole matrix in place. None of them can fail, and none read neighbors,
//! so the matrix is mutated directly without a snapshot.

use crate::colorspace::{Hsv, hsv_to_rgb, rgb_to_hsv};
use crate::{ColorError, ColorResult};
use bmpkit_core::{Bitmap, Rgb};
use std::str::FromStr;

fn map_pixels<F>(bitmap: &mut Bitmap, op: &str, mut f: F)
where
    F: FnMut(Rgb) -> Rgb,
{
    log::debug!("{op} on {}x{}", bitmap.width(), bitmap.height());
    for px in bitmap.pixels_mut().as_mut_slice() {
        *px = f(*px);
    }
}

fn map_hsv<F>(bitmap: &mut Bitmap, op: &str, f: F)
where
    F: Fn(Hsv) -> Hsv,
{
    map_pixels(bitmap, op, |px| hsv_to_rgb(f(rgb_to_hsv(px))));
}

/// AND each channel with its byte of `mask`.
///
/// Bits 0-7 apply to blue, 8-15 to green and 16-23 to red; bits 24-31 are
/// ignored. `0x00FF00` keeps only green, `0xFFFFFF` is the identity.
pub fn apply_channel_mask(bitmap: &mut Bitmap, mask: u32) {
    let [b, g, r, _] = mask.to_le_bytes();
    map_pixels(bitmap, "channel mask", |px| Rgb {
        b: px.b & b,
        g: px.g & g,
        r: px.r & r,
    });
}

/// Apply the sepia tone matrix.
///
/// Each output channel is truncated toward zero, then clamped to 255.
pub fn sepia(bitmap: &mut Bitmap) {
    map_pixels(bitmap, "sepia", |px| {
        let (r, g, b) = (px.r as f64, px.g as f64, px.b as f64);
        Rgb::new(
            saturate(r * 0.393 + g * 0.769 + b * 0.189),
            saturate(r * 0.349 + g * 0.686 + b * 0.168),
            saturate(r * 0.272 + g * 0.534 + b * 0.131),
        )
    });
}

// `as` truncates toward zero and saturates at the type bounds.
fn saturate(value: f64) -> u8 {
    value as u8
}

/// Source of the gray level in [`grayscale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayChannel {
    Red,
    Green,
    Blue,
    /// BT.709 luma
    Luminance,
}

impl FromStr for GrayChannel {
    type Err = ColorError;

    /// Accepts `r`, `g`, `b` and `y`.
    fn from_str(s: &str) -> ColorResult<Self> {
        match s {
            "r" => Ok(GrayChannel::Red),
            "g" => Ok(GrayChannel::Green),
            "b" => Ok(GrayChannel::Blue),
            "y" => Ok(GrayChannel::Luminance),
            other => Err(ColorError::InvalidParameters(format!(
                "unknown gray channel '{other}' (expected r, g, b or y)"
            ))),
        }
    }
}

/// Convert to gray by copying one channel into all three, or by writing
/// the truncated luminance into all three.
pub fn grayscale(bitmap: &mut Bitmap, channel: GrayChannel) {
    map_pixels(bitmap, "grayscale", |px| {
        let level = match channel {
            GrayChannel::Red => px.r,
            GrayChannel::Green => px.g,
            GrayChannel::Blue => px.b,
            GrayChannel::Luminance => px.luminance(),
        };
        Rgb::new(level, level, level)
    });
}

/// Replace every channel `c` by `255 - c`.
pub fn invert(bitmap: &mut Bitmap) {
    map_pixels(bitmap, "invert", |px| Rgb {
        b: 255 - px.b,
        g: 255 - px.g,
        r: 255 - px.r,
    });
}

/// Scale saturation by `amount / 100`, clamped to `[0, 1]`.
///
/// `100.0` leaves the image unchanged, `0.0` turns it gray.
pub fn adjust_saturation(bitmap: &mut Bitmap, amount: f64) {
    let factor = amount / 100.0;
    map_hsv(bitmap, "saturation", |hsv| Hsv {
        s: (hsv.s * factor).clamp(0.0, 1.0),
        ..hsv
    });
}

/// Scale value (brightness) by `amount / 100`, clamped to `[0, 1]`.
pub fn adjust_brightness(bitmap: &mut Bitmap, amount: f64) {
    let factor = amount / 100.0;
    map_hsv(bitmap, "brightness", |hsv| Hsv {
        v: (hsv.v * factor).clamp(0.0, 1.0),
        ..hsv
    });
}

/// Rotate hue by `amount` degrees, wrapping into `[0, 360)`.
///
/// Grays have no hue and are left as they are.
pub fn adjust_hue(bitmap: &mut Bitmap, amount: f64) {
    map_hsv(bitmap, "hue", |hsv| {
        if !hsv.has_hue() {
            return hsv;
        }
        let mut h = (hsv.h + amount) % 360.0;
        if h < 0.0 {
            h += 360.0;
        }
        Hsv { h, ..hsv }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpkit_core::PixelBuffer;

    fn single(px: Rgb) -> Bitmap {
        Bitmap::from_pixels(PixelBuffer::filled(1, 1, px).unwrap()).unwrap()
    }

    fn first(bmp: &Bitmap) -> Rgb {
        bmp.pixels().pixel(0, 0)
    }

    #[test]
    fn test_channel_mask() {
        let mut bmp = single(Rgb::new(0xAB, 0xCD, 0xEF));
        apply_channel_mask(&mut bmp, 0x00FF00);
        assert_eq!(first(&bmp), Rgb::new(0, 0xCD, 0));

        let mut bmp = single(Rgb::new(0xAB, 0xCD, 0xEF));
        apply_channel_mask(&mut bmp, 0xF00F0F);
        assert_eq!(first(&bmp), Rgb::new(0xA0, 0x0D, 0x0F));
    }

    #[test]
    fn test_sepia() {
        let mut bmp = single(Rgb::new(100, 50, 20));
        sepia(&mut bmp);
        // 39.3 + 38.45 + 3.78 = 81.53; 34.9 + 34.3 + 3.36 = 72.56;
        // 27.2 + 26.7 + 2.62 = 56.52
        assert_eq!(first(&bmp), Rgb::new(81, 72, 56));

        let mut bmp = single(Rgb::WHITE);
        sepia(&mut bmp);
        assert_eq!(first(&bmp), Rgb::new(255, 255, 238));
    }

    #[test]
    fn test_gray_channel_tokens() {
        assert_eq!("r".parse::<GrayChannel>().unwrap(), GrayChannel::Red);
        assert_eq!("y".parse::<GrayChannel>().unwrap(), GrayChannel::Luminance);
        let err = "x".parse::<GrayChannel>().unwrap_err();
        assert_eq!(err.kind(), bmpkit_core::ErrorKind::Unknown);
    }

    #[test]
    fn test_grayscale() {
        let px = Rgb::new(10, 20, 30);
        for (channel, level) in [
            (GrayChannel::Red, 10),
            (GrayChannel::Green, 20),
            (GrayChannel::Blue, 30),
        ] {
            let mut bmp = single(px);
            grayscale(&mut bmp, channel);
            assert_eq!(first(&bmp), Rgb::new(level, level, level));
        }

        // 2.126 + 14.304 + 2.166 = 18.596
        let mut bmp = single(px);
        grayscale(&mut bmp, GrayChannel::Luminance);
        assert_eq!(first(&bmp), Rgb::new(18, 18, 18));
    }

    #[test]
    fn test_invert_twice() {
        let mut bmp = single(Rgb::new(1, 128, 255));
        invert(&mut bmp);
        assert_eq!(first(&bmp), Rgb::new(254, 127, 0));
        invert(&mut bmp);
        assert_eq!(first(&bmp), Rgb::new(1, 128, 255));
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let mut bmp = single(Rgb::new(200, 100, 50));
        adjust_saturation(&mut bmp, 0.0);
        assert_eq!(first(&bmp), Rgb::new(200, 200, 200));
    }

    #[test]
    fn test_brightness_clamps() {
        let mut bmp = single(Rgb::new(200, 100, 50));
        adjust_brightness(&mut bmp, 1000.0);
        assert_eq!(first(&bmp).r, 255);

        let mut bmp = single(Rgb::new(200, 100, 50));
        adjust_brightness(&mut bmp, 50.0);
        assert_eq!(first(&bmp), Rgb::new(100, 50, 25));
    }

    #[test]
    fn test_hue_rotation() {
        let mut bmp = single(Rgb::new(255, 0, 0));
        adjust_hue(&mut bmp, 120.0);
        assert_eq!(first(&bmp), Rgb::new(0, 255, 0));

        let mut bmp = single(Rgb::new(255, 0, 0));
        adjust_hue(&mut bmp, -120.0);
        assert_eq!(first(&bmp), Rgb::new(0, 0, 255));

        let mut bmp = single(Rgb::new(90, 90, 90));
        adjust_hue(&mut bmp, 45.0);
        assert_eq!(first(&bmp), Rgb::new(90, 90, 90));
    }
}

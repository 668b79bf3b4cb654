//! RGB <-> HSV conversion
//!
//! Uses the six-sector hexcone model:
//!
//! - `h`: hue in degrees, `[0.0, 360.0)`, or [`HUE_UNDEFINED`] for grays
//! - `s`: saturation `(max - min) / max`, in `[0.0, 1.0]`
//! - `v`: value `max`, in `[0.0, 1.0]`

use bmpkit_core::Rgb;

/// Hue of a pixel without chroma (black or any gray).
pub const HUE_UNDEFINED: f64 = -1.0;

/// HSV color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Whether the hue carries information.
    pub fn has_hue(&self) -> bool {
        self.h >= 0.0
    }
}

/// Convert an RGB pixel to HSV
///
/// Saturation is 0 when `max == 0`; hue is [`HUE_UNDEFINED`] whenever
/// `max == min`.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if max == 0.0 {
        return Hsv::new(HUE_UNDEFINED, 0.0, 0.0);
    }
    let s = delta / max;
    if delta == 0.0 {
        return Hsv::new(HUE_UNDEFINED, s, max);
    }

    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }
    Hsv::new(h, s, max)
}

/// Convert HSV back to an RGB pixel
///
/// Channels are rounded to the nearest integer. A zero saturation or an
/// undefined hue yields a gray of value `v`.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let v = hsv.v.clamp(0.0, 1.0);
    let s = hsv.s.clamp(0.0, 1.0);

    if s == 0.0 || !hsv.has_hue() {
        let c = to_channel(v);
        return Rgb::new(c, c, c);
    }

    let h = hsv.h.rem_euclid(360.0) / 60.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (i as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        let red = rgb_to_hsv(Rgb::new(255, 0, 0));
        assert_eq!(red, Hsv::new(0.0, 1.0, 1.0));
        let green = rgb_to_hsv(Rgb::new(0, 255, 0));
        assert!((green.h - 120.0).abs() < 1e-9);
        let blue = rgb_to_hsv(Rgb::new(0, 0, 255));
        assert!((blue.h - 240.0).abs() < 1e-9);
        let magenta = rgb_to_hsv(Rgb::new(255, 0, 255));
        assert!((magenta.h - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_black_and_gray() {
        let black = rgb_to_hsv(Rgb::BLACK);
        assert!(!black.has_hue());
        assert_eq!(black.s, 0.0);

        let gray = rgb_to_hsv(Rgb::new(100, 100, 100));
        assert!(!gray.has_hue());
        assert_eq!(gray.s, 0.0);
        assert_eq!(hsv_to_rgb(gray), Rgb::new(100, 100, 100));
    }

    #[test]
    fn test_roundtrip_all_hues() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(51) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    assert_eq!(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, "{rgb:?}");
                }
            }
        }
    }

    #[test]
    fn test_hue_360_wraps() {
        assert_eq!(
            hsv_to_rgb(Hsv::new(360.0, 1.0, 1.0)),
            hsv_to_rgb(Hsv::new(0.0, 1.0, 1.0))
        );
    }
}

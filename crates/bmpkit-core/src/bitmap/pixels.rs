//! Owned pixel matrix
//!
//! Pixels are stored in a single flat, row-major `Vec<Rgb>` whose row stride
//! equals the width. Row padding exists only in the serialized form; the
//! in-memory matrix has none.

use crate::error::{Error, Result};

/// One 24-bit pixel, stored in the on-disk channel order (blue, green, red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Blue channel
    pub b: u8,
    /// Green channel
    pub g: u8,
    /// Red channel
    pub r: u8,
}

impl Rgb {
    /// Black (0, 0, 0)
    pub const BLACK: Rgb = Rgb { b: 0, g: 0, r: 0 };
    /// White (255, 255, 255)
    pub const WHITE: Rgb = Rgb {
        b: 255,
        g: 255,
        r: 255,
    };

    /// Build a pixel from red, green and blue values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Build a pixel from a serialized `[blue, green, red]` triple.
    #[inline]
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            b: bgr[0],
            g: bgr[1],
            r: bgr[2],
        }
    }

    /// Serialized `[blue, green, red]` triple.
    #[inline]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Sum of the three channels, `r + g + b`.
    #[inline]
    pub fn sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// ITU-R BT.709 luma, truncated to 8 bits.
    #[inline]
    pub fn luminance(self) -> u8 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) as u8
    }
}

/// Row-major matrix of [`Rgb`] pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a black buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width` or `height` is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        })
    }

    /// Create a buffer by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing row-major vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelCountMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<Rgb>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a buffer holds at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at (`row`, `col`), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<Rgb> {
        if row < self.height && col < self.width {
            Some(self.data[self.index(row, col)])
        } else {
            None
        }
    }

    /// Pixel at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        self.data[self.index(row, col)]
    }

    /// Set the pixel at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: Rgb) {
        assert!(row < self.height && col < self.width, "pixel out of bounds");
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, row: u32) -> &[Rgb] {
        let start = row as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// One row of pixels, mutable.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [Rgb] {
        let start = row as usize * self.width as usize;
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Iterate over rows in storage order.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// All pixels, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.data
    }

    /// All pixels, row-major, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(Error::InvalidDimension {
            width: width as i64,
            height: height as i64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_channel_order() {
        let px = Rgb::new(10, 20, 30);
        assert_eq!(px.to_bgr(), [30, 20, 10]);
        assert_eq!(Rgb::from_bgr([30, 20, 10]), px);
        assert_eq!(px.sum(), 60);
    }

    #[test]
    fn test_luminance() {
        // The weighted sum for white lands just under 255.0 and truncates.
        assert_eq!(Rgb::WHITE.luminance(), 254);
        assert_eq!(Rgb::BLACK.luminance(), 0);
        // 0.2126 * 100 = 21.26
        assert_eq!(Rgb::new(100, 0, 0).luminance(), 21);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(PixelBuffer::new(0, 5).is_err());
        assert!(PixelBuffer::new(5, 0).is_err());
    }

    #[test]
    fn test_from_fn_row_major() {
        let buf = PixelBuffer::from_fn(3, 2, |row, col| Rgb::new(row as u8, col as u8, 0)).unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.pixel(1, 2), Rgb::new(1, 2, 0));
        assert_eq!(buf.row(1)[0], Rgb::new(1, 0, 0));
        assert_eq!(buf.rows().count(), 2);
        assert_eq!(buf.get(2, 0), None);
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = PixelBuffer::from_vec(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_set_and_row_mut() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set(0, 1, Rgb::WHITE);
        buf.row_mut(1)[0] = Rgb::new(1, 2, 3);
        assert_eq!(buf.pixel(0, 1), Rgb::WHITE);
        assert_eq!(buf.pixel(1, 0), Rgb::new(1, 2, 3));
    }
}

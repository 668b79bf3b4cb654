//! bmpkit-test - Regression test framework for bmpkit
//!
//! Supports three modes, selected with `REGTEST_MODE`:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! Besides [`RegParams`] the crate builds synthetic inputs: gradient,
//! uniform and seeded-noise bitmaps, and [`BmpFixture`], which assembles
//! raw BMP bytes field by field so tests can produce malformed files.
//!
//! # Usage
//!
//! ```ignore
//! use bmpkit_test::{RegParams, make_gradient};
//!
//! let mut rp = RegParams::new("rotate");
//! let bmp = make_gradient(7, 5).unwrap();
//! rp.compare_values(7.0, bmp.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use bmpkit_core::bitmap::{BYTES_PER_PIXEL, HEADERS_SIZE, INFO_HEADER_SIZE};
use bmpkit_core::{Bitmap, PixelBuffer, Rgb, row_stride};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bmpkit-test is at crates/bmpkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Path of a scratch file inside the regout directory
pub fn regout_path(name: &str) -> String {
    format!("{}/{}", regout_dir(), name)
}

fn fixture_error(e: impl std::fmt::Display) -> TestError {
    TestError::Fixture(e.to_string())
}

/// Horizontal red ramp, vertical green ramp, constant blue.
///
/// Every pixel differs from its neighbours, so geometric transforms that
/// misplace a pixel are caught.
pub fn make_gradient(width: u32, height: u32) -> TestResult<Bitmap> {
    let wmax = width.saturating_sub(1).max(1);
    let hmax = height.saturating_sub(1).max(1);
    let pixels = PixelBuffer::from_fn(width, height, |row, col| {
        Rgb::new(
            (col * 255 / wmax) as u8,
            (row * 255 / hmax) as u8,
            ((row + col) % 256) as u8,
        )
    })
    .map_err(fixture_error)?;
    Bitmap::from_pixels(pixels).map_err(fixture_error)
}

/// A bitmap filled with one color.
pub fn make_uniform(width: u32, height: u32, color: Rgb) -> TestResult<Bitmap> {
    let pixels = PixelBuffer::filled(width, height, color).map_err(fixture_error)?;
    Bitmap::from_pixels(pixels).map_err(fixture_error)
}

/// A bitmap of uniformly random pixels, reproducible from `seed`.
pub fn make_noise(width: u32, height: u32, seed: u64) -> TestResult<Bitmap> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = PixelBuffer::from_fn(width, height, |_, _| {
        Rgb::new(
            rng.gen_range(0..=u8::MAX),
            rng.gen_range(0..=u8::MAX),
            rng.gen_range(0..=u8::MAX),
        )
    })
    .map_err(fixture_error)?;
    Bitmap::from_pixels(pixels).map_err(fixture_error)
}

/// Raw BMP byte builder.
///
/// Starts from a well-formed 24-bit file and lets a test override any
/// header field, the alignment span or the padding content before
/// serializing with [`BmpFixture::build`].
#[derive(Debug, Clone)]
pub struct BmpFixture {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub reserved: (u16, u16),
    pub resolution: (i32, i32),
    pub alignment: Vec<u8>,
    pub padding_byte: u8,
    /// Bytes after the last row
    pub trailer: Vec<u8>,
    /// Declared file size; `None` means the real length
    pub file_size: Option<u32>,
}

impl BmpFixture {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel: 24,
            compression: 0,
            reserved: (0, 0),
            resolution: (0, 0),
            alignment: Vec::new(),
            padding_byte: 0,
            trailer: Vec::new(),
            file_size: None,
        }
    }

    pub fn with_alignment(mut self, alignment: &[u8]) -> Self {
        self.alignment = alignment.to_vec();
        self
    }

    pub fn with_reserved(mut self, reserved1: u16, reserved2: u16) -> Self {
        self.reserved = (reserved1, reserved2);
        self
    }

    pub fn with_resolution(mut self, x: i32, y: i32) -> Self {
        self.resolution = (x, y);
        self
    }

    pub fn with_bits_per_pixel(mut self, bits_per_pixel: u16) -> Self {
        self.bits_per_pixel = bits_per_pixel;
        self
    }

    pub fn with_compression(mut self, compression: u32) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_padding_byte(mut self, byte: u8) -> Self {
        self.padding_byte = byte;
        self
    }

    pub fn with_trailer(mut self, trailer: &[u8]) -> Self {
        self.trailer = trailer.to_vec();
        self
    }

    pub fn with_file_size(mut self, file_size: u32) -> Self {
        self.file_size = Some(file_size);
        self
    }

    /// Stored `(b, g, r)` bytes of the pixel at `(row, col)`.
    pub fn pixel_bgr(row: u32, col: u32) -> [u8; 3] {
        [
            ((row * 7 + col * 3) % 256) as u8,
            ((row * 11 + col * 5 + 64) % 256) as u8,
            ((row * 13 + col * 17 + 128) % 256) as u8,
        ]
    }

    /// The same pixel as an [`Rgb`].
    pub fn pixel(row: u32, col: u32) -> Rgb {
        Rgb::from_bgr(Self::pixel_bgr(row, col))
    }

    fn pixel_extent(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }

    /// Bytes per stored row, padding included.
    pub fn stride(&self) -> usize {
        row_stride(self.pixel_extent().0)
    }

    /// Offset of the first pixel byte.
    pub fn pixel_offset(&self) -> usize {
        HEADERS_SIZE + self.alignment.len()
    }

    /// Serialize the fixture.
    pub fn build(&self) -> Vec<u8> {
        let (width, height) = self.pixel_extent();
        let stride = self.stride();
        let image_size = stride * height as usize;
        let total = self.pixel_offset() + image_size + self.trailer.len();
        let file_size = self.file_size.unwrap_or(total as u32);

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved.0.to_le_bytes());
        out.extend_from_slice(&self.reserved.1.to_le_bytes());
        out.extend_from_slice(&(self.pixel_offset() as u32).to_le_bytes());

        out.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(image_size as u32).to_le_bytes());
        out.extend_from_slice(&self.resolution.0.to_le_bytes());
        out.extend_from_slice(&self.resolution.1.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        out.extend_from_slice(&self.alignment);

        let padding = stride - width as usize * BYTES_PER_PIXEL;
        for row in 0..height {
            for col in 0..width {
                out.extend_from_slice(&Self::pixel_bgr(row, col));
            }
            out.extend(std::iter::repeat_n(self.padding_byte, padding));
        }
        out.extend_from_slice(&self.trailer);
        out
    }
}

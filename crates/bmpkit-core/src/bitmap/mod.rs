//! Bitmap - the in-memory 24-bit image
//!
//! A [`Bitmap`] owns everything needed to re-emit the file it was decoded
//! from byte for byte: both headers, the opaque alignment span between the
//! headers and the pixel data, the pixel matrix, and the opaque trailer
//! some writers leave after the last row.
//!
//! # Invariants
//!
//! - `width > 0`, `height > 0`
//! - `bits_per_pixel == 24`, `compression == 0`
//! - `alignment.len() == pixel_offset - 54`
//! - the pixel matrix is `height` rows of `width` pixels
//!
//! Row padding is not stored; it is recomputed from the width whenever the
//! bitmap is serialized.
//!
//! # Ownership model
//!
//! Ownership is exclusive. Geometric operations build a new [`Bitmap`] via
//! [`Bitmap::with_pixels`] and never alias the source; per-pixel color
//! operations mutate the matrix in place through [`Bitmap::pixels_mut`].

mod header;
mod histogram;
mod pixels;

pub use header::{
    BMP_MAGIC, BYTES_PER_PIXEL, COMPRESSION_NONE, FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE,
    INFO_HEADER_SIZE, InfoHeader, SUPPORTED_BITS_PER_PIXEL, row_padding, row_stride,
};
pub use histogram::{ChannelHistograms, HISTOGRAM_BINS, luminance_histogram};
pub use pixels::{PixelBuffer, Rgb};

use crate::error::{Error, Result};

/// A decoded 24-bit uncompressed bitmap.
///
/// # Examples
///
/// ```
/// use bmpkit_core::{Bitmap, Rgb};
///
/// let mut bmp = Bitmap::new(2, 2).unwrap();
/// bmp.pixels_mut().set(0, 1, Rgb::WHITE);
/// assert_eq!(bmp.row_padding(), 2);
/// assert_eq!(bmp.info_header().image_size, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    info_header: InfoHeader,
    alignment: Vec<u8>,
    pixels: PixelBuffer,
    trailer: Vec<u8>,
}

impl Bitmap {
    /// Create a black bitmap with standard headers and no alignment span.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0, or
    /// [`Error::TooLarge`] if the pixel data does not fit the size fields.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_pixels(PixelBuffer::new(width, height)?)
    }

    /// Wrap a pixel matrix with standard headers and no alignment span.
    pub fn from_pixels(pixels: PixelBuffer) -> Result<Self> {
        let image_size = image_size_for(pixels.width(), pixels.height())?;
        let file_size = u32::try_from(HEADERS_SIZE as u64 + image_size as u64)
            .map_err(|_| Error::TooLarge(format!("file size for {image_size} pixel bytes")))?;

        let mut file_header = FileHeader::standard(image_size);
        file_header.file_size = file_size;

        Ok(Self {
            file_header,
            info_header: InfoHeader::standard(
                pixels.width() as i32,
                pixels.height() as i32,
                image_size,
            ),
            alignment: Vec::new(),
            pixels,
            trailer: Vec::new(),
        })
    }

    /// Assemble a bitmap from decoded parts, checking every invariant.
    ///
    /// The result has no trailer; attach one with [`Bitmap::with_trailer`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for a bit depth other than 24 or a
    ///   non-zero compression code
    /// - [`Error::InvalidDimension`] if the header dimensions are not
    ///   positive or disagree with the pixel matrix
    /// - [`Error::AlignmentMismatch`] if the span length is not
    ///   `pixel_offset - 54`
    pub fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        alignment: Vec<u8>,
        pixels: PixelBuffer,
    ) -> Result<Self> {
        if !info_header.is_supported() {
            return Err(Error::UnsupportedFormat {
                bits_per_pixel: info_header.bits_per_pixel,
                compression: info_header.compression,
            });
        }
        if info_header.width <= 0
            || info_header.height <= 0
            || info_header.width as u32 != pixels.width()
            || info_header.height as u32 != pixels.height()
        {
            return Err(Error::InvalidDimension {
                width: info_header.width as i64,
                height: info_header.height as i64,
            });
        }
        let expected = alignment_len(file_header.pixel_offset)?;
        if alignment.len() != expected {
            return Err(Error::AlignmentMismatch {
                expected,
                actual: alignment.len(),
            });
        }

        Ok(Self {
            file_header,
            info_header,
            alignment,
            pixels,
            trailer: Vec::new(),
        })
    }

    /// Attach the bytes that follow the last pixel row.
    ///
    /// The declared file size is left as is.
    pub fn with_trailer(mut self, trailer: Vec<u8>) -> Self {
        self.trailer = trailer;
        self
    }

    /// Split into headers, alignment span and pixels. The trailer is
    /// dropped.
    pub fn into_parts(self) -> (FileHeader, InfoHeader, Vec<u8>, PixelBuffer) {
        (
            self.file_header,
            self.info_header,
            self.alignment,
            self.pixels,
        )
    }

    /// Independent deep copy of headers, alignment span and pixels.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// The file header.
    #[inline]
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// The info header.
    #[inline]
    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// Opaque bytes between the headers and the pixel data.
    #[inline]
    pub fn alignment(&self) -> &[u8] {
        &self.alignment
    }

    /// Opaque bytes after the last pixel row.
    #[inline]
    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    /// The pixel matrix.
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// The pixel matrix, mutable. The shape cannot change through this
    /// reference, so the headers stay valid.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Zero bytes appended to each serialized row.
    #[inline]
    pub fn row_padding(&self) -> usize {
        row_padding(self.width())
    }

    /// Horizontal and vertical resolution in pixels per meter.
    #[inline]
    pub fn resolution(&self) -> (i32, i32) {
        (
            self.info_header.x_pels_per_meter,
            self.info_header.y_pels_per_meter,
        )
    }

    /// Set the horizontal and vertical resolution.
    pub fn set_resolution(&mut self, x_pels_per_meter: i32, y_pels_per_meter: i32) {
        self.info_header.x_pels_per_meter = x_pels_per_meter;
        self.info_header.y_pels_per_meter = y_pels_per_meter;
    }

    /// Build a new bitmap that keeps this bitmap's headers, alignment span
    /// and trailer but carries `pixels` and `resolution`.
    ///
    /// Width and height follow the new matrix. The declared image size is
    /// recomputed and the declared file size is shifted by the same delta,
    /// so any slack the original file carried is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooLarge`] if the new sizes do not fit the 32-bit
    /// header fields. `self` is never modified.
    pub fn with_pixels(&self, pixels: PixelBuffer, resolution: (i32, i32)) -> Result<Self> {
        let new_image_size = image_size_for(pixels.width(), pixels.height())?;
        let old_image_size = self.info_header.image_size as i64;
        let new_file_size =
            self.file_header.file_size as i64 + new_image_size as i64 - old_image_size;
        let file_size = u32::try_from(new_file_size)
            .map_err(|_| Error::TooLarge(format!("file size {new_file_size}")))?;

        let mut file_header = self.file_header;
        file_header.file_size = file_size;

        let mut info_header = self.info_header;
        info_header.width = pixels.width() as i32;
        info_header.height = pixels.height() as i32;
        info_header.image_size = new_image_size;
        info_header.x_pels_per_meter = resolution.0;
        info_header.y_pels_per_meter = resolution.1;

        log::debug!(
            "bitmap reshaped {}x{} -> {}x{}",
            self.width(),
            self.height(),
            pixels.width(),
            pixels.height()
        );

        Ok(Self {
            file_header,
            info_header,
            alignment: self.alignment.clone(),
            pixels,
            trailer: self.trailer.clone(),
        })
    }
}

/// Serialized pixel-data size (padding included) for the given dimensions.
pub fn image_size_for(width: u32, height: u32) -> Result<u32> {
    let size = row_stride(width) as u64 * height as u64;
    u32::try_from(size).map_err(|_| Error::TooLarge(format!("{width}x{height} pixel data")))
}

/// Length of the alignment span implied by a pixel-data offset.
///
/// # Errors
///
/// Returns [`Error::AlignmentMismatch`] if the offset points inside the
/// headers.
pub fn alignment_len(pixel_offset: u32) -> Result<usize> {
    (pixel_offset as usize)
        .checked_sub(HEADERS_SIZE)
        .ok_or(Error::AlignmentMismatch {
            expected: HEADERS_SIZE,
            actual: pixel_offset as usize,
        })
}

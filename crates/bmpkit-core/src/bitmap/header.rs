//! Bitmap file and info headers
//!
//! Field-for-field models of the 14-byte file header and the 40-byte
//! `BITMAPINFOHEADER`. The structs are plain data; the little-endian wire
//! encoding lives in `bmpkit-io`, never in the in-memory layout.

/// ASCII `"BM"`, the only accepted magic tag
pub const BMP_MAGIC: [u8; 2] = *b"BM";

/// Size of the file header on disk
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the info (DIB) header on disk
pub const INFO_HEADER_SIZE: usize = 40;

/// Bytes consumed by both headers, i.e. the offset at which the alignment
/// span starts
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Bytes per pixel in a 24-bit bitmap
pub const BYTES_PER_PIXEL: usize = 3;

/// The only supported bit depth
pub const SUPPORTED_BITS_PER_PIXEL: u16 = 24;

/// Compression code for uncompressed (`BI_RGB`) data
pub const COMPRESSION_NONE: u32 = 0;

/// Number of zero bytes appended to each serialized row of `width` pixels
/// so the row length is a multiple of four.
#[inline]
pub fn row_padding(width: u32) -> usize {
    (4 - (width as usize * BYTES_PER_PIXEL) % 4) % 4
}

/// Serialized length of one row, padding included.
#[inline]
pub fn row_stride(width: u32) -> usize {
    width as usize * BYTES_PER_PIXEL + row_padding(width)
}

/// The 14-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic tag, `"BM"` for every accepted file
    pub magic: [u8; 2],
    /// Declared total file size in bytes
    pub file_size: u32,
    /// Reserved, preserved verbatim
    pub reserved1: u16,
    /// Reserved, preserved verbatim
    pub reserved2: u16,
    /// Offset from the start of the file to the first pixel row
    pub pixel_offset: u32,
}

/// The 40-byte info header (`BITMAPINFOHEADER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared DIB header length
    pub header_size: u32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels; rows are always taken in file order
    pub height: i32,
    /// Color planes, preserved
    pub planes: u16,
    /// Bits per pixel, must be 24
    pub bits_per_pixel: u16,
    /// Compression code, must be 0
    pub compression: u32,
    /// Declared pixel-data size including row padding
    pub image_size: u32,
    /// Horizontal resolution (pixels per meter)
    pub x_pels_per_meter: i32,
    /// Vertical resolution (pixels per meter)
    pub y_pels_per_meter: i32,
    /// Palette colors used, preserved
    pub colors_used: u32,
    /// Important palette colors, preserved
    pub colors_important: u32,
}

impl FileHeader {
    /// File header for a freshly built bitmap with no alignment span.
    pub fn standard(image_size: u32) -> Self {
        Self {
            magic: BMP_MAGIC,
            file_size: HEADERS_SIZE as u32 + image_size,
            reserved1: 0,
            reserved2: 0,
            pixel_offset: HEADERS_SIZE as u32,
        }
    }
}

impl InfoHeader {
    /// Info header for a freshly built 24-bit bitmap.
    pub fn standard(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel: SUPPORTED_BITS_PER_PIXEL,
            compression: COMPRESSION_NONE,
            image_size,
            x_pels_per_meter: 0,
            y_pels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Whether bit depth and compression are the supported ones.
    pub fn is_supported(&self) -> bool {
        self.bits_per_pixel == SUPPORTED_BITS_PER_PIXEL && self.compression == COMPRESSION_NONE
    }
}

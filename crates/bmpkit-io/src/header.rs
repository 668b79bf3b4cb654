//! Header field codec
//!
//! Reads and writes the file header and the info header one little-endian
//! field at a time, in wire order. The in-memory structs are never
//! reinterpreted as bytes.
//!
//! Validation happens as soon as the deciding field has been read: an
//! unsupported bit depth stops the decoder before the compression field,
//! and a compressed bitmap stops it before the remaining fields.

use crate::{IoError, IoResult};
use bmpkit_core::bitmap::{BMP_MAGIC, COMPRESSION_NONE, SUPPORTED_BITS_PER_PIXEL};
use bmpkit_core::{FileHeader, InfoHeader};
use std::io::{ErrorKind, Read, Write};

/// Reader that tracks how many bytes have been consumed.
pub(crate) struct FieldReader<R> {
    inner: R,
    consumed: usize,
}

impl<R: Read> FieldReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    /// Fill `buf` completely; a short read is a truncated file.
    pub(crate) fn read_into(&mut self, buf: &mut [u8], field: &str) -> IoResult<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.consumed += buf.len();
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(IoError::CannotLoad(format!(
                "truncated at {field} (offset {})",
                self.consumed
            ))),
            Err(e) => Err(IoError::Io(e)),
        }
    }

    /// Replace the contents of `buf` with exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a length taken
    /// from an untrusted header never drives a large allocation on its own.
    pub(crate) fn read_vec_into(
        &mut self,
        buf: &mut Vec<u8>,
        len: usize,
        field: &str,
    ) -> IoResult<()> {
        let got = self.read_up_to_into(buf, len)?;
        if got < len {
            return Err(IoError::CannotLoad(format!(
                "truncated at {field} (offset {}, {got} of {len} bytes)",
                self.consumed
            )));
        }
        Ok(())
    }

    /// Read at most `len` bytes into `buf`, stopping early at end of input.
    pub(crate) fn read_up_to_into(&mut self, buf: &mut Vec<u8>, len: usize) -> IoResult<usize> {
        buf.clear();
        let got = (&mut self.inner).take(len as u64).read_to_end(buf)?;
        self.consumed += got;
        Ok(got)
    }

    fn array<const N: usize>(&mut self, field: &str) -> IoResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_into(&mut buf, field)?;
        Ok(buf)
    }

    fn u16(&mut self, field: &str) -> IoResult<u16> {
        self.array(field).map(u16::from_le_bytes)
    }

    fn u32(&mut self, field: &str) -> IoResult<u32> {
        self.array(field).map(u32::from_le_bytes)
    }

    fn i32(&mut self, field: &str) -> IoResult<i32> {
        self.array(field).map(i32::from_le_bytes)
    }
}

/// Read the 14-byte file header.
///
/// Fails with [`IoError::CannotLoad`] if the magic tag is not `"BM"`.
pub(crate) fn read_file_header<R: Read>(reader: &mut FieldReader<R>) -> IoResult<FileHeader> {
    let magic = reader.array::<2>("magic")?;
    if magic != BMP_MAGIC {
        return Err(IoError::CannotLoad(format!(
            "not a BMP file (magic {:02x} {:02x})",
            magic[0], magic[1]
        )));
    }
    Ok(FileHeader {
        magic,
        file_size: reader.u32("file size")?,
        reserved1: reader.u16("reserved1")?,
        reserved2: reader.u16("reserved2")?,
        pixel_offset: reader.u32("pixel data offset")?,
    })
}

/// Read the 40-byte info header, rejecting unsupported depth and
/// compression as soon as those fields are known.
pub(crate) fn read_info_header<R: Read>(reader: &mut FieldReader<R>) -> IoResult<InfoHeader> {
    let header_size = reader.u32("header size")?;
    let width = reader.i32("width")?;
    let height = reader.i32("height")?;
    let planes = reader.u16("planes")?;

    let bits_per_pixel = reader.u16("bits per pixel")?;
    if bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
        return Err(IoError::UnsupportedFormat {
            bits_per_pixel,
            compression: COMPRESSION_NONE,
        });
    }

    let compression = reader.u32("compression")?;
    if compression != COMPRESSION_NONE {
        return Err(IoError::UnsupportedFormat {
            bits_per_pixel,
            compression,
        });
    }

    Ok(InfoHeader {
        header_size,
        width,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size: reader.u32("image size")?,
        x_pels_per_meter: reader.i32("horizontal resolution")?,
        y_pels_per_meter: reader.i32("vertical resolution")?,
        colors_used: reader.u32("colors used")?,
        colors_important: reader.u32("colors important")?,
    })
}

/// Write both headers in wire order.
pub(crate) fn write_headers<W: Write>(
    writer: &mut W,
    fh: &FileHeader,
    ih: &InfoHeader,
) -> std::io::Result<()> {
    writer.write_all(&fh.magic)?;
    writer.write_all(&fh.file_size.to_le_bytes())?;
    writer.write_all(&fh.reserved1.to_le_bytes())?;
    writer.write_all(&fh.reserved2.to_le_bytes())?;
    writer.write_all(&fh.pixel_offset.to_le_bytes())?;

    writer.write_all(&ih.header_size.to_le_bytes())?;
    writer.write_all(&ih.width.to_le_bytes())?;
    writer.write_all(&ih.height.to_le_bytes())?;
    writer.write_all(&ih.planes.to_le_bytes())?;
    writer.write_all(&ih.bits_per_pixel.to_le_bytes())?;
    writer.write_all(&ih.compression.to_le_bytes())?;
    writer.write_all(&ih.image_size.to_le_bytes())?;
    writer.write_all(&ih.x_pels_per_meter.to_le_bytes())?;
    writer.write_all(&ih.y_pels_per_meter.to_le_bytes())?;
    writer.write_all(&ih.colors_used.to_le_bytes())?;
    writer.write_all(&ih.colors_important.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpkit_core::bitmap::HEADERS_SIZE;

    #[test]
    fn test_headers_roundtrip() {
        let mut fh = FileHeader::standard(16);
        fh.reserved1 = 0xBEEF;
        fh.reserved2 = 0x1234;
        let mut ih = InfoHeader::standard(2, 2, 16);
        ih.x_pels_per_meter = 2835;
        ih.y_pels_per_meter = -7;

        let mut buf = Vec::new();
        write_headers(&mut buf, &fh, &ih).unwrap();
        assert_eq!(buf.len(), HEADERS_SIZE);
        assert_eq!(&buf[0..2], b"BM");

        let mut reader = FieldReader::new(buf.as_slice());
        assert_eq!(read_file_header(&mut reader).unwrap(), fh);
        assert_eq!(read_info_header(&mut reader).unwrap(), ih);
        assert_eq!(reader.consumed(), HEADERS_SIZE);
    }

    #[test]
    fn test_bad_magic() {
        let data = b"PK\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        let mut reader = FieldReader::new(&data[..]);
        assert!(matches!(
            read_file_header(&mut reader),
            Err(IoError::CannotLoad(_))
        ));
    }

    #[test]
    fn test_truncated_field() {
        let data = b"BM\x10\x00";
        let mut reader = FieldReader::new(&data[..]);
        let err = read_file_header(&mut reader).unwrap_err();
        assert!(matches!(err, IoError::CannotLoad(ref msg) if msg.contains("file size")));
    }

    #[test]
    fn test_depth_rejected_before_compression() {
        let mut ih = InfoHeader::standard(2, 2, 16);
        ih.bits_per_pixel = 8;
        let mut buf = Vec::new();
        write_headers(&mut buf, &FileHeader::standard(16), &ih).unwrap();
        // cut the stream right after the bit depth field
        buf.truncate(14 + 16);

        let mut reader = FieldReader::new(buf.as_slice());
        read_file_header(&mut reader).unwrap();
        let err = read_info_header(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            IoError::UnsupportedFormat {
                bits_per_pixel: 8,
                ..
            }
        ));
    }
}

//! BMP image format support
//!
//! Reads and writes 24-bit uncompressed Windows Bitmap files so that
//! `write_bmp(read_bmp(bytes)) == bytes` for every well-formed input whose
//! declared file size matches its length: header fields, reserved words,
//! the alignment span, row padding and any bytes between the last row and
//! the declared end of file are all carried through unchanged.
//!
//! Rows are taken in file order. A negative (top-down) height is not
//! flipped; it is rejected like any other non-positive dimension.
//!
//! Every row but the last must be complete, padding included. The last
//! row's padding may be cut off; it is written back in full on encode.

use crate::header::{FieldReader, read_file_header, read_info_header, write_headers};
use crate::{IoError, IoResult};
use bmpkit_core::bitmap::{BYTES_PER_PIXEL, HEADERS_SIZE};
use bmpkit_core::{Bitmap, PixelBuffer, Rgb, alignment_len, image_size_for, row_stride};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Read a BMP image
///
/// Bytes after the last row are kept as the trailer, up to the declared
/// file size; a declared size beyond the end of input is not an error.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for a bit depth other than 24 or a
///   compressed bitmap; no pixel data is read
/// - [`IoError::CannotLoad`] for a bad magic tag, truncated input,
///   non-positive dimensions, or an offset pointing inside the headers
/// - [`IoError::Io`] for any other error raised by `reader`
pub fn read_bmp<R: Read>(reader: R) -> IoResult<Bitmap> {
    let mut reader = FieldReader::new(reader);

    let file_header = read_file_header(&mut reader)?;
    let info_header = read_info_header(&mut reader)?;

    if info_header.width <= 0 || info_header.height <= 0 {
        return Err(IoError::CannotLoad(format!(
            "invalid dimensions {}x{}",
            info_header.width, info_header.height
        )));
    }
    let width = info_header.width as u32;
    let height = info_header.height as u32;

    // The span covers everything between the parsed headers and the pixel
    // data, including any header extension beyond the 40-byte info header.
    let span_len = alignment_len(file_header.pixel_offset).map_err(|_| {
        IoError::CannotLoad(format!(
            "pixel data offset {} lies inside the headers",
            file_header.pixel_offset
        ))
    })?;
    debug_assert_eq!(reader.consumed(), HEADERS_SIZE);
    let mut alignment = Vec::new();
    reader.read_vec_into(&mut alignment, span_len, "alignment span")?;

    image_size_for(width, height)
        .map_err(|_| IoError::CannotLoad(format!("dimensions {width}x{height} too large")))?;

    let pixel_bytes = width as usize * BYTES_PER_PIXEL;
    let padding = row_stride(width) - pixel_bytes;
    let mut row_buffer = Vec::new();
    let mut data = Vec::new();

    for row in 0..height {
        reader.read_vec_into(&mut row_buffer, pixel_bytes, &format!("pixel row {row}"))?;
        data.extend(
            row_buffer
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| Rgb::from_bgr([bgr[0], bgr[1], bgr[2]])),
        );
        if row + 1 < height {
            reader.read_vec_into(&mut row_buffer, padding, &format!("padding of row {row}"))?;
        } else {
            reader.read_up_to_into(&mut row_buffer, padding)?;
        }
    }

    let trailer_len = (file_header.file_size as usize).saturating_sub(reader.consumed());
    let mut trailer = Vec::new();
    reader.read_up_to_into(&mut trailer, trailer_len)?;

    let pixels = PixelBuffer::from_vec(width, height, data)?;
    let bitmap =
        Bitmap::from_parts(file_header, info_header, alignment, pixels)?.with_trailer(trailer);

    log::debug!(
        "decoded {}x{} bitmap, alignment span {} bytes, row padding {}, trailer {} bytes",
        width,
        height,
        span_len,
        bitmap.row_padding(),
        bitmap.trailer().len()
    );

    Ok(bitmap)
}

/// Read a BMP image from memory
pub fn read_bmp_mem(data: &[u8]) -> IoResult<Bitmap> {
    read_bmp(Cursor::new(data))
}

/// Write a BMP image
///
/// Emits the headers, the alignment span, every row followed by its zero
/// padding, then the trailer.
///
/// # Errors
///
/// Returns [`IoError::CannotWrite`] if `writer` fails.
pub fn write_bmp<W: Write>(bitmap: &Bitmap, mut writer: W) -> IoResult<()> {
    write_bmp_inner(bitmap, &mut writer).map_err(|e| IoError::CannotWrite(e.to_string()))?;

    log::debug!(
        "encoded {}x{} bitmap, alignment span {} bytes",
        bitmap.width(),
        bitmap.height(),
        bitmap.alignment().len()
    );
    Ok(())
}

fn write_bmp_inner<W: Write>(bitmap: &Bitmap, writer: &mut W) -> std::io::Result<()> {
    write_headers(writer, bitmap.file_header(), bitmap.info_header())?;
    writer.write_all(bitmap.alignment())?;

    let stride = row_stride(bitmap.width());
    let mut row_buffer = vec![0u8; stride];
    for row in bitmap.pixels().rows() {
        for (dst, px) in row_buffer.chunks_exact_mut(BYTES_PER_PIXEL).zip(row) {
            dst.copy_from_slice(&px.to_bgr());
        }
        writer.write_all(&row_buffer)?;
    }
    writer.write_all(bitmap.trailer())?;
    writer.flush()
}

/// Write a BMP image to memory
pub fn write_bmp_mem(bitmap: &Bitmap) -> IoResult<Vec<u8>> {
    let capacity = HEADERS_SIZE
        + bitmap.alignment().len()
        + row_stride(bitmap.width()) * bitmap.height() as usize
        + bitmap.trailer().len();
    let mut buffer = Vec::with_capacity(capacity);
    write_bmp(bitmap, &mut buffer)?;
    Ok(buffer)
}

/// Check whether a stream holds a bitmap.
///
/// Reads only the 2-byte magic and the 4-byte declared size, then compares
/// the declared size with the actual stream length. The stream position is
/// left at the end of the stream.
///
/// # Errors
///
/// A stream too short to hold both fields is [`IoError::CannotLoad`]; any
/// other failure passes through as [`IoError::Io`]. Neither is reported as
/// `Ok(false)`.
pub fn is_bitmap<R: Read + Seek>(reader: R) -> IoResult<bool> {
    let mut reader = FieldReader::new(reader);
    let mut magic = [0u8; 2];
    reader.read_into(&mut magic, "magic")?;
    let mut size = [0u8; 4];
    reader.read_into(&mut size, "file size")?;
    let declared = u32::from_le_bytes(size) as u64;

    let mut inner = reader.into_inner();
    let start = inner.stream_position()? - 6;
    let actual = inner.seek(SeekFrom::End(0))? - start;

    Ok(magic == *b"BM" && declared == actual)
}

/// Check whether a byte slice holds a bitmap.
pub fn is_bitmap_mem(data: &[u8]) -> IoResult<bool> {
    is_bitmap(Cursor::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bitmap {
        let pixels = PixelBuffer::from_fn(3, 2, |row, col| {
            Rgb::new((row * 10 + col) as u8, 100, 200)
        })
        .unwrap();
        Bitmap::from_pixels(pixels).unwrap()
    }

    #[test]
    fn test_bmp_roundtrip_24bit() {
        let bmp = sample();
        let bytes = write_bmp_mem(&bmp).unwrap();
        assert_eq!(bytes.len(), 54 + 2 * 12);

        let decoded = read_bmp_mem(&bytes).unwrap();
        assert_eq!(decoded, bmp);
        assert_eq!(write_bmp_mem(&decoded).unwrap(), bytes);
    }

    #[test]
    fn test_row_layout() {
        let bytes = write_bmp_mem(&sample()).unwrap();
        // first pixel of the first row, stored b, g, r
        assert_eq!(&bytes[54..57], &[200, 100, 0]);
        // three pixels = 9 bytes, then 3 padding bytes
        assert_eq!(&bytes[63..66], &[0, 0, 0]);
        assert_eq!(&bytes[66..69], &[200, 100, 10]);
    }

    #[test]
    fn test_is_bitmap_mem() {
        let bytes = write_bmp_mem(&sample()).unwrap();
        assert!(is_bitmap_mem(&bytes).unwrap());

        let mut longer = bytes.clone();
        longer.push(0);
        assert!(!is_bitmap_mem(&longer).unwrap());

        let mut wrong_magic = bytes;
        wrong_magic[0] = b'X';
        assert!(!is_bitmap_mem(&wrong_magic).unwrap());
    }

    #[test]
    fn test_is_bitmap_short_input_is_error() {
        let err = is_bitmap_mem(b"BM\x01").unwrap_err();
        assert!(matches!(err, IoError::CannotLoad(_)));
    }

    #[test]
    fn test_negative_height_rejected() {
        let mut bytes = write_bmp_mem(&sample()).unwrap();
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        assert!(matches!(read_bmp_mem(&bytes), Err(IoError::CannotLoad(_))));
    }
}

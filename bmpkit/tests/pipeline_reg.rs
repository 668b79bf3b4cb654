//! End-to-end pipeline regression test
//!
//! Decodes a file, runs one operation from every domain crate, encodes the
//! result and decodes it again.

use bmpkit::color::{GrayChannel, grayscale, threshold_otsu};
use bmpkit::filter::blur;
use bmpkit::io::{is_bitmap_mem, read_bmp_mem, write_bmp_mem};
use bmpkit::transform::{CropRect, RotateDirection, crop, enlarge, rotate_90};
use bmpkit::{ErrorKind, Rgb};
use bmpkit_test::{BmpFixture, RegParams};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let bytes = BmpFixture::new(30, 20)
        .with_alignment(&[0x11, 0x22])
        .with_resolution(2835, 2835)
        .build();
    rp.compare_values(1.0, is_bitmap_mem(&bytes).unwrap() as u8 as f64, 0.0);
    let src = read_bmp_mem(&bytes).expect("decode");

    let rotated = rotate_90(&src, RotateDirection::CounterClockwise).expect("rotate");
    let cropped = crop(&rotated, &CropRect::new(0, 0, 50, 50).unwrap()).expect("crop");
    rp.compare_values(10.0, cropped.width() as f64, 0.0);
    rp.compare_values(15.0, cropped.height() as f64, 0.0);
    let enlarged = enlarge(&cropped, 2).expect("enlarge");
    let mut blurred = blur(&enlarged, 2).expect("blur");
    grayscale(&mut blurred, GrayChannel::Luminance);
    threshold_otsu(&mut blurred, Rgb::BLACK, Rgb::WHITE);

    let two_tone = blurred
        .pixels()
        .as_slice()
        .iter()
        .all(|&p| p == Rgb::BLACK || p == Rgb::WHITE);
    rp.compare_values(1.0, two_tone as u8 as f64, 0.0);

    let out = write_bmp_mem(&blurred).expect("encode");
    rp.compare_values(1.0, is_bitmap_mem(&out).unwrap() as u8 as f64, 0.0);
    let back = read_bmp_mem(&out).expect("decode again");
    rp.compare_bitmaps(&blurred, &back);
    rp.compare_bytes(&[0x11, 0x22], back.alignment());

    // error kinds are uniform across crates
    let kinds = [
        "q".parse::<bmpkit::transform::MirrorAxis>().unwrap_err().kind(),
        "q".parse::<GrayChannel>().unwrap_err().kind(),
        blur(&src, 0).unwrap_err().kind(),
        read_bmp_mem(&bytes[..20]).unwrap_err().kind(),
    ];
    rp.compare_values(1.0, (kinds[0] == ErrorKind::Unknown) as u8 as f64, 0.0);
    rp.compare_values(1.0, (kinds[1] == ErrorKind::Unknown) as u8 as f64, 0.0);
    rp.compare_values(1.0, (kinds[2] == ErrorKind::Unknown) as u8 as f64, 0.0);
    rp.compare_values(1.0, (kinds[3] == ErrorKind::CannotLoad) as u8 as f64, 0.0);
    rp.compare_bytes(b"Cannot load the file", kinds[3].message().as_bytes());

    assert!(rp.cleanup());
}

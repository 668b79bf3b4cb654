//! Resampling and crop regression test
//!
//! Exercises resample, reduce, enlarge and crop on synthetic images:
//! identity sizes, round-trip dimensions, smoothness of the result, and
//! the no-mutation guarantee on invalid crop windows.

use bmpkit_core::ErrorKind;
use bmpkit_io::write_bmp_mem;
use bmpkit_test::{RegParams, make_gradient, make_noise};
use bmpkit_transform::{CropRect, crop, enlarge, reduce, resample};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // --- resample to the same size is the identity ---
    let noise = make_noise(23, 17, 5).unwrap();
    let same = resample(&noise, 17, 23).expect("identity resample");
    rp.compare_bitmaps(&noise, &same);

    // --- reduce then enlarge restores the dimensions ---
    for factor in [2u32, 3, 4] {
        let src = make_gradient(24, 12).unwrap();
        let small = reduce(&src, factor).expect("reduce");
        rp.compare_values((24 / factor) as f64, small.width() as f64, 0.0);
        rp.compare_values((12 / factor) as f64, small.height() as f64, 0.0);
        let big = enlarge(&small, factor).expect("enlarge");
        rp.compare_values(24.0, big.width() as f64, 0.0);
        rp.compare_values(12.0, big.height() as f64, 0.0);

        // a smooth ramp stays close to the original
        let max_diff = src
            .pixels()
            .as_slice()
            .iter()
            .zip(big.pixels().as_slice())
            .map(|(a, b)| a.g.abs_diff(b.g))
            .max()
            .unwrap_or(0);
        eprintln!("  factor {factor}: max green diff {max_diff}");
        rp.compare_values(0.0, max_diff as f64, 80.0);

        // headers stay consistent with the encoded size
        let bytes = write_bmp_mem(&big).unwrap();
        rp.compare_values(big.file_header().file_size as f64, bytes.len() as f64, 0.0);
    }

    // --- upscaling a gradient keeps it monotone along the ramp ---
    let ramp = make_gradient(8, 2).unwrap();
    let wide = resample(&ramp, 2, 32).unwrap();
    let row = wide.pixels().row(0);
    let monotone = row.windows(2).all(|p| p[0].r <= p[1].r.saturating_add(2));
    rp.compare_values(1.0, monotone as u8 as f64, 0.0);

    // --- a target too large for the size fields is an error, not an abort ---
    let tiny = make_gradient(2, 2).unwrap();
    let err = enlarge(&tiny, 40_000).expect_err("oversized enlarge");
    rp.compare_values(1.0, (err.kind() == ErrorKind::Unknown) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn crop_reg() {
    let mut rp = RegParams::new("crop");

    let mut src = make_gradient(40, 20).unwrap();
    src.set_resolution(2000, 1000);
    let before = write_bmp_mem(&src).unwrap();

    // --- invalid windows are rejected before any work happens ---
    for (x1, y1, x2, y2) in [(50, 0, 50, 100), (80, 0, 20, 100), (0, 0, 120, 100)] {
        let err = CropRect::new(x1, y1, x2, y2).unwrap_err();
        rp.compare_values(1.0, (err.kind() == ErrorKind::Unknown) as u8 as f64, 0.0);
    }
    // a valid window that covers no whole pixel
    let tiny = make_gradient(3, 3).unwrap();
    let err = crop(&tiny, &CropRect::new(0, 0, 20, 20).unwrap()).unwrap_err();
    rp.compare_values(1.0, (err.kind() == ErrorKind::Unknown) as u8 as f64, 0.0);

    // --- a valid crop ---
    let rect = CropRect::new(25, 10, 75, 60).unwrap();
    let out = crop(&src, &rect).expect("crop");
    rp.compare_values(20.0, out.width() as f64, 0.0);
    rp.compare_values(10.0, out.height() as f64, 0.0);
    rp.compare_values(4000.0, out.resolution().0 as f64, 0.0);
    rp.compare_values(2000.0, out.resolution().1 as f64, 0.0);
    let corner = out.pixels().pixel(0, 0) == src.pixels().pixel(2, 10);
    rp.compare_values(1.0, corner as u8 as f64, 0.0);

    // the source is byte-identical afterwards
    rp.compare_bytes(&before, &write_bmp_mem(&src).unwrap());

    // full window is the identity on pixels
    let full = crop(&src, &CropRect::new(0, 0, 100, 100).unwrap()).unwrap();
    rp.compare_bitmaps(&src, &full);

    assert!(rp.cleanup());
}

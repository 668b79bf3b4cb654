//! Orthogonal rotation and mirror regression test
//!
//! Checks the group identities of quarter turns and mirrors on synthetic
//! images of odd and even sizes, and that headers follow the new shape.

use bmpkit_core::Bitmap;
use bmpkit_io::{read_bmp_mem, write_bmp_mem};
use bmpkit_test::{BmpFixture, RegParams, make_gradient, make_noise};
use bmpkit_transform::{MirrorAxis, RotateDirection, mirror, rotate_90, rotate_180};

#[test]
fn rotate_reg() {
    let mut rp = RegParams::new("rotate");

    for (w, h) in [(7, 5), (4, 4), (1, 9), (13, 2)] {
        let bmp = make_noise(w, h, (w * 100 + h) as u64).unwrap();
        eprintln!("Testing {}x{}", w, h);
        test_rotation(&mut rp, &bmp);
        test_mirror(&mut rp, &bmp);
    }

    assert!(rp.cleanup(), "rotate regression test failed");
}

fn test_rotation(rp: &mut RegParams, bmp: &Bitmap) {
    let w = bmp.width();
    let h = bmp.height();

    // --- four clockwise turns restore the original ---
    let mut turned = bmp.duplicate();
    for _ in 0..4 {
        turned = rotate_90(&turned, RotateDirection::Clockwise).expect("rotate cw");
    }
    rp.compare_bitmaps(bmp, &turned);

    // --- one turn swaps the axes ---
    let once = rotate_90(bmp, RotateDirection::CounterClockwise).expect("rotate ccw");
    rp.compare_values(h as f64, once.width() as f64, 0.0);
    rp.compare_values(w as f64, once.height() as f64, 0.0);

    // --- two clockwise turns are a point reflection ---
    let twice = rotate_180(bmp).expect("rotate 180");
    let reflected = (0..h).all(|i| {
        (0..w).all(|j| twice.pixels().pixel(i, j) == bmp.pixels().pixel(h - 1 - i, w - 1 - j))
    });
    rp.compare_values(1.0, reflected as u8 as f64, 0.0);
}

fn test_mirror(rp: &mut RegParams, bmp: &Bitmap) {
    for axis in [MirrorAxis::Vertical, MirrorAxis::Horizontal] {
        let mut m = bmp.duplicate();
        mirror(&mut m, axis);
        mirror(&mut m, axis);
        rp.compare_bitmaps(bmp, &m);
    }

    // both mirrors together equal a half turn
    let mut m = bmp.duplicate();
    mirror(&mut m, MirrorAxis::Vertical);
    mirror(&mut m, MirrorAxis::Horizontal);
    let half = rotate_180(bmp).expect("rotate 180");
    rp.compare_bitmaps(&half, &m);
}

#[test]
fn rotate_headers_reg() {
    let mut rp = RegParams::new("rotate_headers");

    // 5 wide: stride 16; 3 wide: stride 12
    let bytes = BmpFixture::new(5, 3)
        .with_alignment(&[1, 2, 3])
        .with_reserved(7, 9)
        .with_resolution(3000, 1000)
        .build();
    let bmp = read_bmp_mem(&bytes).unwrap();
    let rot = rotate_90(&bmp, RotateDirection::Clockwise).unwrap();

    rp.compare_values(1000.0, rot.resolution().0 as f64, 0.0);
    rp.compare_values(3000.0, rot.resolution().1 as f64, 0.0);
    rp.compare_values(60.0, rot.info_header().image_size as f64, 0.0);
    rp.compare_values(
        (bytes.len() - 48 + 60) as f64,
        rot.file_header().file_size as f64,
        0.0,
    );
    rp.compare_bytes(&[1, 2, 3], rot.alignment());
    rp.compare_values(7.0, rot.file_header().reserved1 as f64, 0.0);

    // the rotated image encodes to exactly its declared size
    let out = write_bmp_mem(&rot).unwrap();
    rp.compare_values(rot.file_header().file_size as f64, out.len() as f64, 0.0);

    // the token forms drive the same code paths
    let axis: MirrorAxis = "v".parse().unwrap();
    let mut a = make_gradient(6, 3).unwrap();
    let b = a.duplicate();
    mirror(&mut a, axis);
    rp.compare_values(
        b.pixels().pixel(0, 5).r as f64,
        a.pixels().pixel(0, 0).r as f64,
        0.0,
    );
    let err = "diagonal".parse::<MirrorAxis>().unwrap_err();
    rp.compare_values(
        1.0,
        (err.kind() == bmpkit_core::ErrorKind::Unknown) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup());
}

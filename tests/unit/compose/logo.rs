use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgb;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_premultiplies() {
    let logo = LogoImage::decode(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((logo.width(), logo.height()), (1, 1));
    assert_eq!(
        logo.premul.as_raw().as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_mean_no_logo() {
    assert!(LogoImage::decode(b"definitely not an image").is_err());
    assert!(LogoImage::decode_or_none(b"definitely not an image").is_none());
}

#[test]
fn fit_never_upscales() {
    assert_eq!(fit_logo_size(50, 40, 200, 200), (50, 40));
    assert_eq!(fit_logo_size(400, 200, 100, 100), (100, 50));
    assert_eq!(fit_logo_size(200, 400, 100, 100), (50, 100));
}

#[test]
fn fit_preserves_aspect_within_rounding() {
    for (w, h) in [(640u32, 480u32), (123, 457), (1000, 3), (3, 1000)] {
        let (nw, nh) = fit_logo_size(w, h, 128, 132);
        assert!(nw <= w && nh <= h);
        assert!(nw <= 128 && nh <= 132);
        let scale = (128.0 / f64::from(w)).min(132.0 / f64::from(h)).min(1.0);
        assert!(f64::from(w) * scale - f64::from(nw) < 1.0, "{w}x{h} -> {nw}x{nh}");
        assert!(f64::from(h) * scale - f64::from(nh) < 1.0, "{w}x{h} -> {nw}x{nh}");
    }
}

#[test]
fn degenerate_logo_is_skipped() {
    let logo = LogoImage::decode(&png_bytes(1000, 1, [0, 0, 0, 255])).unwrap();
    assert!(fit_logo(&logo, 100, 100).unwrap().is_none());
}

#[test]
fn composite_places_logo_at_origin() {
    let logo = LogoImage::decode(&png_bytes(40, 20, [255, 0, 0, 255])).unwrap();
    let mut canvas = RasterBuffer::filled(100, 100, Rgb::WHITE.opaque()).unwrap();
    let drawn = composite_logo(&mut canvas, &logo, 10, 30, 20, 50).unwrap();
    assert_eq!(drawn, Some((20, 10)));
    let px = canvas.pixel(15, 35).unwrap();
    assert!(px[0] >= 250 && px[1] <= 5 && px[3] == 255, "{px:?}");
    assert_eq!(canvas.pixel(9, 35), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(15, 41), Some([255, 255, 255, 255]));
}

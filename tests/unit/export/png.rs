use super::*;
use crate::foundation::core::Rgba8Premul;

#[test]
fn png_round_trips_straight_alpha() {
    let raster = RasterBuffer::filled(3, 2, Rgba8Premul::from_straight_rgba(200, 100, 50, 128)).unwrap();
    let bytes = encode_png(&raster).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    let px = decoded.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 200).abs() <= 1, "{px:?}");
}

#[test]
fn png_is_repeatable() {
    let raster = RasterBuffer::filled(16, 16, Rgba8Premul::from_straight_rgba(1, 2, 3, 255)).unwrap();
    assert_eq!(encode_png(&raster).unwrap(), encode_png(&raster).unwrap());
}

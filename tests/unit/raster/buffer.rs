use super::*;

#[test]
fn zero_sized_buffers_are_rejected() {
    assert!(RasterBuffer::new(0, 10).is_err());
    assert!(RasterBuffer::new(10, 0).is_err());
    assert!(RasterBuffer::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn filled_buffer_is_uniform_and_opaque() {
    let px = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    let buf = RasterBuffer::filled(3, 2, px).unwrap();
    assert!(buf.is_opaque());
    assert_eq!(buf.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(buf.pixel(3, 1), None);
}

#[test]
fn composite_over_clips_at_edges() {
    let mut dst =
        RasterBuffer::filled(4, 4, Rgba8Premul::from_straight_rgba(0, 0, 0, 255)).unwrap();
    let src = RasterBuffer::filled(3, 3, Rgba8Premul::from_straight_rgba(255, 0, 0, 255)).unwrap();
    dst.composite_over(&src, -1, 2);

    assert_eq!(dst.pixel(0, 2), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 3), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));

    // Entirely outside: untouched.
    let before = dst.clone();
    dst.composite_over(&src, 10, 10);
    assert_eq!(dst, before);
}

#[test]
fn flatten_composites_onto_white() {
    let buf = RasterBuffer::filled(2, 1, Rgba8Premul::from_straight_rgba(0, 0, 0, 128)).unwrap();
    let rgb = buf.to_rgb8_on_white();
    assert_eq!(rgb, vec![127, 127, 127, 127, 127, 127]);

    let opaque = RasterBuffer::filled(1, 1, Rgba8Premul::from_straight_rgba(9, 8, 7, 255)).unwrap();
    assert_eq!(opaque.to_rgb8_on_white(), vec![9, 8, 7]);
    assert_eq!(opaque.to_straight_rgba8(), vec![9, 8, 7, 255]);
}

#[test]
fn pixmap_view_draws_into_buffer() {
    let mut buf = RasterBuffer::new(4, 4).unwrap();
    {
        let mut pm = buf.pixmap_mut().unwrap();
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(0, 0, 255, 255);
        let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap();
        pm.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
    }
    assert_eq!(buf.pixel(1, 1), Some([0, 0, 255, 255]));
}

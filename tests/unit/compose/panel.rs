use super::*;

fn dark_canvas() -> RasterBuffer {
    RasterBuffer::filled(400, 250, Rgb::new(15, 19, 23).opaque()).unwrap()
}

#[test]
fn geometry_uses_width_relative_inset() {
    let (rect, radius) = panel_geometry(1050, 600);
    assert_eq!(rect.x0, 42.0);
    assert_eq!(rect.y0, 42.0);
    assert_eq!(rect.x1, 1009.0);
    assert_eq!(rect.y1, 559.0);
    assert_eq!(radius, 21.0);
}

#[test]
fn none_panel_is_noop() {
    let mut canvas = dark_canvas();
    let before = canvas.clone();
    apply_panel(&mut canvas, &Panel::None).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn solid_panel_fills_inset_only() {
    let mut canvas = dark_canvas();
    apply_panel(
        &mut canvas,
        &Panel::Solid {
            color: Rgb::new(200, 100, 50),
        },
    )
    .unwrap();
    assert_eq!(canvas.pixel(200, 125), Some([200, 100, 50, 255]));
    assert_eq!(canvas.pixel(2, 2), Some([15, 19, 23, 255]));
    assert!(canvas.is_opaque());
}

#[test]
fn glass_panel_lightens_and_keeps_opacity() {
    let mut canvas = dark_canvas();
    apply_panel(&mut canvas, &Panel::Glass).unwrap();
    assert!(canvas.is_opaque());

    let inside = canvas.pixel(200, 125).unwrap();
    // white at alpha 55 over (15, 19, 23)
    assert!((63..=69).contains(&inside[0]), "{inside:?}");
    assert_eq!(canvas.pixel(1, 1), Some([15, 19, 23, 255]));

    // outline is brighter than the fill
    let edge = canvas.pixel(200, 17).unwrap();
    assert!(edge[0] > inside[0], "{edge:?} vs {inside:?}");
}

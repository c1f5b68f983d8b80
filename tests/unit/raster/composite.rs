use super::*;

#[test]
fn scale_rounds_to_nearest() {
    for c in 0..=255u8 {
        for f in [0u8, 1, 64, 127, 128, 200, 254, 255] {
            let exact = (f64::from(c) * f64::from(f) / 255.0).round() as u8;
            assert_eq!(scale(c, f), exact, "{c} * {f}");
        }
    }
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_keeps_opaque_destination_opaque() {
    let dst = [7, 10, 16, 255];
    let src = [30, 30, 30, 30];
    assert_eq!(over(dst, src)[3], 255);
}

#[test]
fn over_half_white_on_black_is_mid_grey() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out, [128, 128, 128, 255]);
    let out = over([100, 0, 0, 255], [0, 0, 0, 51]);
    assert_eq!(out, [80, 0, 0, 255]);
}

#[test]
fn blend_endpoints_and_midpoint() {
    let a = [255, 255, 255, 255];
    let b = [229, 236, 255, 255];
    assert_eq!(blend(a, b, 0.0), a);
    assert_eq!(blend(a, b, 1.0), b);
    let mid = blend([0, 0, 0, 255], [200, 100, 50, 255], 0.5);
    assert_eq!(mid, [100, 50, 25, 255]);
}

#[test]
fn unpremultiply_inverts_premultiply() {
    let mut px = [200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    let back = unpremultiply(px);
    for i in 0..3 {
        assert!((i32::from(back[i]) - [200, 100, 50][i]).abs() <= 2);
    }
    assert_eq!(unpremultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn length_mismatch_is_an_error() {
    let mut dst = vec![0u8; 8];
    assert!(blend_in_place(&mut dst, &[0u8; 12], 0.5).is_err());
}

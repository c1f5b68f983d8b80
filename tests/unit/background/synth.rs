use super::*;
use crate::theme::registry::ThemeRegistry;

const ACCENT: Rgb = Rgb::new(0x3b, 0x82, 0xf6);

fn all_tokens() -> Vec<Background> {
    vec![
        Background::Solid {
            color: Rgb::new(12, 34, 56),
        },
        Background::Gradient,
        Background::Stripe,
        Background::Aurora,
        Background::Carbon,
        Background::Lines,
        Background::Satin,
    ]
}

fn rgb_at(buf: &RasterBuffer, x: u32, y: u32) -> [u8; 3] {
    let px = buf.pixel(x, y).unwrap();
    [px[0], px[1], px[2]]
}

#[test]
fn every_token_fills_the_canvas_opaquely() {
    for size in [CanvasSize::clamped(400, 250), CanvasSize::clamped(1050, 600)] {
        for token in all_tokens() {
            let buf = synthesize_background(size, &token, ACCENT).unwrap();
            assert_eq!((buf.width(), buf.height()), (size.width(), size.height()));
            assert!(buf.is_opaque(), "{token:?} at {size}");
        }
    }
}

#[test]
fn synthesis_is_deterministic() {
    let size = CanvasSize::clamped(640, 360);
    for token in all_tokens() {
        let a = synthesize_background(size, &token, ACCENT).unwrap();
        let b = synthesize_background(size, &token, ACCENT).unwrap();
        assert_eq!(a, b, "{token:?}");
    }
}

#[test]
fn accent_does_not_affect_builtin_tokens() {
    let size = CanvasSize::clamped(400, 250);
    for token in all_tokens() {
        let a = synthesize_background(size, &token, ACCENT).unwrap();
        let b = synthesize_background(size, &token, Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn gradient_matches_closed_form() {
    let buf = synthesize_background(CanvasSize::DEFAULT, &Background::Gradient, ACCENT).unwrap();
    // u = 0, v = 0: (14, 165, 233) scaled by 0.85.
    assert_eq!(rgb_at(&buf, 0, 0), [11, 140, 198]);
    // u = 0.5, v = 0: (76, 128, 239) scaled by 0.85.
    assert_eq!(rgb_at(&buf, 525, 0), [64, 108, 203]);
}

#[test]
fn satin_stays_in_clamped_range() {
    let buf = synthesize_background(CanvasSize::DEFAULT, &Background::Satin, ACCENT).unwrap();
    for px in buf.data().chunks_exact(4) {
        for &c in &px[..3] {
            assert!(c >= 210);
        }
    }
    assert_eq!(rgb_at(&buf, 0, 0), [234, 242, 249]);
}

#[test]
fn lines_follow_diagonal_gap() {
    let buf = synthesize_background(CanvasSize::DEFAULT, &Background::Lines, ACCENT).unwrap();
    // gap = max(12, 1050 / 60) = 17; lines where (x - y + 600) % 17 == 0.
    assert_eq!(rgb_at(&buf, 12, 0), [220, 226, 234]);
    assert_eq!(rgb_at(&buf, 29, 17), [220, 226, 234]);
    assert_eq!(rgb_at(&buf, 13, 0), [245, 246, 248]);
}

#[test]
fn stripe_alternates_between_white_and_tint() {
    let buf = synthesize_background(CanvasSize::DEFAULT, &Background::Stripe, ACCENT).unwrap();
    let mut colors: Vec<[u8; 3]> = buf
        .data()
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), 2);
    assert!(colors.contains(&[255, 255, 255]));
}

#[test]
fn carbon_is_dark_and_textured() {
    let buf = synthesize_background(CanvasSize::DEFAULT, &Background::Carbon, ACCENT).unwrap();
    for px in buf.data().chunks_exact(4) {
        assert!(px[0] <= 24 && px[0] >= 18);
    }
    let distinct: std::collections::HashSet<[u8; 3]> = buf
        .data()
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    assert!(distinct.len() > 1);
}

#[test]
fn aurora_blobs_glow_over_dark_base() {
    let size = CanvasSize::DEFAULT;
    let buf = synthesize_background(size, &Background::Aurora, ACCENT).unwrap();
    assert_eq!(rgb_at(&buf, 0, 599), [7, 10, 16]);
    // Outermost ring of the cyan blob centered at (210, 180).
    let ring = rgb_at(&buf, 210, 312);
    assert!(ring[2] > 50, "{ring:?}");
}

#[test]
fn builtin_theme_backgrounds_render() {
    let size = CanvasSize::clamped(400, 250);
    for theme in ThemeRegistry::builtin().iter() {
        let buf = synthesize_background(size, &theme.background, ACCENT).unwrap();
        assert!(buf.is_opaque(), "{}", theme.key);
    }
}

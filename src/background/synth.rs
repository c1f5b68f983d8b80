//! Full-canvas background fills.
//!
//! Every routine is a pure function of `(size, token)`. Row-parallel fills write disjoint rows
//! and compute each pixel from its own coordinates only, so output never depends on scheduling.

use rayon::prelude::*;

use crate::foundation::core::{CanvasSize, Rgb};
use crate::foundation::error::CardResult;
use crate::raster::blur::gaussian_blur;
use crate::raster::buffer::RasterBuffer;
use crate::raster::composite::blend;
use crate::raster::shapes::{ShapePaint, fill_shape};
use crate::theme::registry::Background;

const STRIPE_PERIOD: f64 = 20.0;
const STRIPE_WIDTH: f64 = 10.0;
const STRIPE_COLOR: Rgb = Rgb::new(229, 236, 255);
const STRIPE_MIX: f32 = 0.45;

const AURORA_BASE: Rgb = Rgb::new(7, 10, 16);
const AURORA_RINGS: u32 = 6;

const CARBON_BASE: Rgb = Rgb::new(18, 19, 23);
const CARBON_CELL: u32 = 8;
const CARBON_LIGHT: Rgb = Rgb::new(24, 26, 32);
const CARBON_DARK: Rgb = Rgb::new(20, 22, 27);
const CARBON_BLUR: f32 = 0.6;
const CARBON_MIX: f32 = 0.35;

const LINES_BASE: Rgb = Rgb::new(245, 246, 248);
const LINES_COLOR: Rgb = Rgb::new(220, 226, 234);

struct AuroraBlob {
    center: (f64, f64),
    radii: (f64, f64),
    color: Rgb,
    alpha: u8,
}

/// Synthesize the opaque background for `token` at `size`.
///
/// The accent color is part of the signature for catalogs whose backgrounds follow it; none of
/// the built-in routines read it.
#[tracing::instrument(skip(_accent), fields(width = size.width(), height = size.height()))]
pub fn synthesize_background(
    size: CanvasSize,
    token: &Background,
    _accent: Rgb,
) -> CardResult<RasterBuffer> {
    let (w, h) = (size.width(), size.height());
    match *token {
        Background::Solid { color } => RasterBuffer::filled(w, h, color.opaque()),
        Background::Gradient => fill_per_pixel(w, h, gradient_px),
        Background::Stripe => stripe(w, h),
        Background::Aurora => aurora(w, h),
        Background::Carbon => carbon(w, h),
        Background::Lines => lines(w, h),
        Background::Satin => fill_per_pixel(w, h, satin_px),
    }
}

fn fill_per_pixel(
    w: u32,
    h: u32,
    f: impl Fn(u32, u32, u32, u32) -> Rgb + Sync,
) -> CardResult<RasterBuffer> {
    let mut buf = RasterBuffer::new(w, h)?;
    buf.data_mut()
        .par_chunks_mut(w as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let c = f(x as u32, y as u32, w, h);
                px.copy_from_slice(&[c.r, c.g, c.b, 255]);
            }
        });
    Ok(buf)
}

fn gradient_px(x: u32, y: u32, w: u32, h: u32) -> Rgb {
    let u = f64::from(x) / f64::from(w);
    let v = f64::from(y) / f64::from(h);
    let lerp = |a: f64, b: f64| ((1.0 - u) * a + u * b).trunc();
    let shade = 0.85 + 0.3 * v;
    let ch = |c: f64| (c * shade).trunc().min(255.0) as u8;
    Rgb::new(
        ch(lerp(14.0, 139.0)),
        ch(lerp(165.0, 92.0)),
        ch(lerp(233.0, 246.0)),
    )
}

fn satin_px(x: u32, y: u32, w: u32, h: u32) -> Rgb {
    let u = f64::from(x) / f64::from(w);
    let v = f64::from(y) / f64::from(h);
    let ch = |f: f64| (255.0 * f).trunc().clamp(210.0, 255.0) as u8;
    Rgb::new(
        ch(0.92 - 0.22 * v + 0.08 * u),
        ch(0.95 - 0.18 * u),
        ch(0.98 - 0.28 * u - 0.05 * v),
    )
}

fn stripe(w: u32, h: u32) -> CardResult<RasterBuffer> {
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    let white = Rgb::WHITE.opaque().to_array();
    let mixed = blend(white, STRIPE_COLOR.opaque().to_array(), STRIPE_MIX);
    let mixed = Rgb::new(mixed[0], mixed[1], mixed[2]);
    fill_per_pixel(w, h, move |x, y, _, _| {
        let d = (f64::from(x) + 0.5 - cx + f64::from(y) + 0.5 - cy) / std::f64::consts::SQRT_2;
        if d.rem_euclid(STRIPE_PERIOD) < STRIPE_WIDTH {
            mixed
        } else {
            Rgb::WHITE
        }
    })
}

fn aurora(w: u32, h: u32) -> CardResult<RasterBuffer> {
    let (wf, hf) = (f64::from(w), f64::from(h));
    let blobs = [
        AuroraBlob {
            center: ((wf * 0.2).trunc(), (hf * 0.3).trunc()),
            radii: ((wf * 0.06).trunc(), (hf * 0.04).trunc()),
            color: Rgb::new(14, 165, 233),
            alpha: 120,
        },
        AuroraBlob {
            center: ((wf * 0.7).trunc(), (hf * 0.2).trunc()),
            radii: ((wf * 0.08).trunc(), (hf * 0.06).trunc()),
            color: Rgb::new(139, 92, 246),
            alpha: 110,
        },
        AuroraBlob {
            center: ((wf * 0.6).trunc(), (hf * 0.75).trunc()),
            radii: ((wf * 0.07).trunc(), (hf * 0.05).trunc()),
            color: Rgb::new(20, 184, 166),
            alpha: 100,
        },
    ];

    let mut overlay = RasterBuffer::new(w, h)?;
    for blob in &blobs {
        for i in (1..=AURORA_RINGS).rev() {
            let t = f64::from(i) / f64::from(AURORA_RINGS);
            let a = (f64::from(blob.alpha) * t * t).trunc() as u8;
            let ellipse = kurbo::Ellipse::new(
                blob.center,
                (blob.radii.0 * f64::from(i), blob.radii.1 * f64::from(i)),
                0.0,
            );
            let c = blob.color;
            fill_shape(&mut overlay, &ellipse, ShapePaint::replace([c.r, c.g, c.b, a]))?;
        }
    }

    let sigma = (w.min(h) as f32 * 0.01).trunc().max(8.0);
    let overlay = gaussian_blur(&overlay, sigma)?;

    let mut base = RasterBuffer::filled(w, h, AURORA_BASE.opaque())?;
    base.composite_over(&overlay, 0, 0);
    Ok(base)
}

fn carbon(w: u32, h: u32) -> CardResult<RasterBuffer> {
    let tex = fill_per_pixel(w, h, |x, y, _, _| {
        if (x / CARBON_CELL + y / CARBON_CELL) % 2 == 0 {
            CARBON_LIGHT
        } else {
            CARBON_DARK
        }
    })?;
    let tex = gaussian_blur(&tex, CARBON_BLUR)?;
    let mut base = RasterBuffer::filled(w, h, CARBON_BASE.opaque())?;
    base.blend_with(&tex, CARBON_MIX)?;
    Ok(base)
}

fn lines(w: u32, h: u32) -> CardResult<RasterBuffer> {
    let gap = (w / 60).max(12);
    fill_per_pixel(w, h, move |x, y, _, h| {
        let k = i64::from(x) - i64::from(y) + i64::from(h);
        if k.rem_euclid(i64::from(gap)) == 0 {
            LINES_COLOR
        } else {
            LINES_BASE
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/background/synth.rs"]
mod tests;

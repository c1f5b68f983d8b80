use crate::foundation::error::{CardError, CardResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// `c * f / 255`, rounded to nearest.
fn scale(c: u8, f: u8) -> u8 {
    let p = u32::from(c) * u32::from(f) + 128;
    ((p + (p >> 8)) >> 8) as u8
}

/// Porter-Duff source-over: `src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        alpha => {
            let keep = 255 - alpha;
            std::array::from_fn(|i| src[i].saturating_add(scale(dst[i], keep)))
        }
    }
}

/// Linear mix `a*(1-t) + b*t` of two pixels; `t` is clamped to `[0, 1]`.
pub fn blend(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| {
        let (from, to) = (f32::from(a[i]), f32::from(b[i]));
        (from + (to - from) * t).round() as u8
    })
}

/// [`blend`] applied pixel-wise, writing into `dst`.
pub fn blend_in_place(dst: &mut [u8], other: &[u8], t: f32) -> CardResult<()> {
    if dst.len() != other.len() || !dst.len().is_multiple_of(4) {
        return Err(CardError::render(
            "blend_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, o) in dst.chunks_exact_mut(4).zip(other.chunks_exact(4)) {
        let mixed = blend([d[0], d[1], d[2], d[3]], [o[0], o[1], o[2], o[3]], t);
        d.copy_from_slice(&mixed);
    }
    Ok(())
}

/// Convert straight RGBA8 to premultiplied, in place.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = scale(*c, a);
        }
    }
}

pub fn unpremultiply(px: PremulRgba8) -> PremulRgba8 {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;

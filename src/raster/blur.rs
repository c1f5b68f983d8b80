use rayon::prelude::*;

use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;

/// Kernel taps are fixed point with this many units per 1.0.
const ONE: u32 = 1 << 16;

/// Gaussian blur with standard deviation `sigma`. The kernel spans `ceil(3 * sigma)` pixels on
/// each side; edges clamp. A sigma of zero returns the input unchanged.
pub fn gaussian_blur(src: &RasterBuffer, sigma: f32) -> CardResult<RasterBuffer> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(CardError::render("blur sigma must be finite and >= 0"));
    }
    let Some(kernel) = Kernel::gaussian(sigma) else {
        return Ok(src.clone());
    };
    let (w, h) = (src.width() as usize, src.height() as usize);
    if w == 0 || h == 0 {
        return Ok(src.clone());
    }
    let across = convolve(src.data(), w, h, &kernel, Axis::Rows);
    let out = convolve(&across, w, h, &kernel, Axis::Columns);
    RasterBuffer::from_premul_rgba8(src.width(), src.height(), out)
}

/// A symmetric 1D kernel whose taps sum to exactly [`ONE`].
#[derive(Debug)]
struct Kernel {
    taps: Vec<u32>,
    radius: usize,
}

impl Kernel {
    fn gaussian(sigma: f32) -> Option<Self> {
        let radius = (sigma * 3.0).ceil() as usize;
        if radius == 0 {
            return None;
        }
        let two_var = 2.0 * f64::from(sigma) * f64::from(sigma);
        let weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-d * d / two_var).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();

        // Taps are differences of the rounded running sum, so they total exactly ONE.
        let mut taps = Vec::with_capacity(weights.len());
        let (mut running, mut emitted) = (0.0f64, 0u32);
        for w in weights {
            running += w;
            let edge = ((running / total) * f64::from(ONE)).round().min(f64::from(ONE)) as u32;
            taps.push(edge.saturating_sub(emitted));
            emitted = edge.max(emitted);
        }
        Some(Self { taps, radius })
    }

    /// Weighted sum around `center` in a line of `len` samples, clamping at both ends.
    fn apply(&self, center: usize, len: usize, sample: impl Fn(usize) -> [u8; 4]) -> [u8; 4] {
        let mut acc = [0u32; 4];
        for (i, &tap) in self.taps.iter().enumerate() {
            let at = (center + i).saturating_sub(self.radius).min(len - 1);
            for (a, v) in acc.iter_mut().zip(sample(at)) {
                *a += tap * u32::from(v);
            }
        }
        acc.map(|a| ((a + ONE / 2) >> 16).min(255) as u8)
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Rows,
    Columns,
}

fn pixel_at(data: &[u8], index: usize) -> [u8; 4] {
    let i = index * 4;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

// Output rows are filled in parallel; every pixel reads only from `src`.
fn convolve(src: &[u8], width: usize, height: usize, kernel: &Kernel, axis: Axis) -> Vec<u8> {
    let mut dst = vec![0u8; src.len()];
    dst.par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.chunks_exact_mut(4).enumerate() {
                let px = match axis {
                    Axis::Rows => kernel.apply(x, width, |sx| pixel_at(src, y * width + sx)),
                    Axis::Columns => kernel.apply(y, height, |sy| pixel_at(src, sy * width + x)),
                };
                out.copy_from_slice(&px);
            }
        });
    dst
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;

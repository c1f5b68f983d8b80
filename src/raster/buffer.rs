use resvg::tiny_skia;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CardError, CardResult};
use crate::raster::composite::{blend_in_place, over, unpremultiply};

/// An RGBA8 pixel grid owned by one render.
///
/// Pixels are **premultiplied alpha**, row-major, tightly packed. Dimensions are fixed at
/// creation and always non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        Self::filled(width, height, Rgba8Premul::transparent())
    }

    /// Allocate a buffer with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8Premul) -> CardResult<Self> {
        let len = byte_len(width, height)?;
        let data = px.to_array().repeat(len / 4);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(CardError::render(
                "raster bytes do not match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// True when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// Source-over `src` with its top-left corner at `(x, y)`. Parts outside this buffer are
    /// clipped.
    pub fn composite_over(&mut self, src: &RasterBuffer, x: i64, y: i64) {
        self.composite_premul_over(&src.data, src.width, src.height, x, y);
    }

    /// Like [`RasterBuffer::composite_over`] for a raw premultiplied RGBA8 slice.
    pub(crate) fn composite_premul_over(
        &mut self,
        src: &[u8],
        src_w: u32,
        src_h: u32,
        x: i64,
        y: i64,
    ) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src_w)).min(dst_w);
        let y1 = (y + i64::from(src_h)).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for dy in y0..y1 {
            let sy = (dy - y) as usize;
            for dx in x0..x1 {
                let sx = (dx - x) as usize;
                let si = (sy * src_w as usize + sx) * 4;
                let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
                if s[3] == 0 {
                    continue;
                }
                let di = ((dy as usize) * (self.width as usize) + dx as usize) * 4;
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Mix `other` into this buffer with weight `t` (0 keeps self, 1 takes other).
    pub fn blend_with(&mut self, other: &RasterBuffer, t: f32) -> CardResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(CardError::render("blend_with expects equal-size buffers"));
        }
        blend_in_place(&mut self.data, &other.data, t)
    }

    /// Straight (un-premultiplied) RGBA8 bytes.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Opaque RGB8 bytes with any residual transparency composited onto white.
    pub fn to_rgb8_on_white(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.data.len() / 4) * 3);
        for px in self.data.chunks_exact(4) {
            let bg = 255 - px[3];
            out.push(px[0].saturating_add(bg));
            out.push(px[1].saturating_add(bg));
            out.push(px[2].saturating_add(bg));
        }
        out
    }

    /// Borrow the pixels as a `tiny-skia` drawing target.
    pub(crate) fn pixmap_mut(&mut self) -> CardResult<tiny_skia::PixmapMut<'_>> {
        tiny_skia::PixmapMut::from_bytes(&mut self.data, self.width, self.height)
            .ok_or_else(|| CardError::render("raster is not a valid drawing target"))
    }
}

fn byte_len(width: u32, height: u32) -> CardResult<usize> {
    if width == 0 || height == 0 {
        return Err(CardError::render(format!(
            "raster dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::render("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;

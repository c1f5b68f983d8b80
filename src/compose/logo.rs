use anyhow::Context;
use image::imageops::FilterType;

use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;
use crate::raster::composite::premultiply_rgba8_in_place;

/// A decoded user logo, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoImage {
    premul: image::RgbaImage,
}

impl LogoImage {
    /// Decode any format the `image` crate recognizes.
    pub fn decode(bytes: &[u8]) -> CardResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode logo image")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(CardError::validation("logo has zero size"));
        }
        let mut raw = rgba.into_raw();
        premultiply_rgba8_in_place(&mut raw);
        let premul = image::RgbaImage::from_raw(width, height, raw)
            .ok_or_else(|| CardError::validation("logo buffer does not match its dimensions"))?;
        Ok(Self { premul })
    }

    /// Decode, treating failure as "no logo".
    pub fn decode_or_none(bytes: &[u8]) -> Option<Self> {
        match Self::decode(bytes) {
            Ok(logo) => Some(logo),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring undecodable logo");
                None
            }
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.premul.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.premul.height()
    }
}

/// Largest size that fits `max_w x max_h` without upscaling, preserving aspect ratio.
pub fn fit_logo_size(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = (f64::from(max_w) / f64::from(width))
        .min(f64::from(max_h) / f64::from(height))
        .min(1.0);
    (
        (f64::from(width) * scale).trunc() as u32,
        (f64::from(height) * scale).trunc() as u32,
    )
}

/// Scale the logo into the box with Lanczos3. `None` when the result would be empty.
pub fn fit_logo(logo: &LogoImage, max_w: u32, max_h: u32) -> CardResult<Option<RasterBuffer>> {
    let (w, h) = fit_logo_size(logo.width(), logo.height(), max_w, max_h);
    if w == 0 || h == 0 {
        tracing::warn!(
            width = logo.width(),
            height = logo.height(),
            max_w,
            max_h,
            "logo shrinks to nothing, skipping"
        );
        return Ok(None);
    }
    let scaled = if (w, h) == (logo.width(), logo.height()) {
        logo.premul.clone()
    } else {
        image::imageops::resize(&logo.premul, w, h, FilterType::Lanczos3)
    };
    let mut raw = scaled.into_raw();
    // Lanczos ringing can push a color channel above its alpha.
    for px in raw.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
    RasterBuffer::from_premul_rgba8(w, h, raw).map(Some)
}

/// Fit and composite the logo with its top-left corner at `(x, y)`. Returns the drawn size.
pub fn composite_logo(
    canvas: &mut RasterBuffer,
    logo: &LogoImage,
    x: i64,
    y: i64,
    max_w: u32,
    max_h: u32,
) -> CardResult<Option<(u32, u32)>> {
    let Some(fitted) = fit_logo(logo, max_w, max_h)? else {
        return Ok(None);
    };
    canvas.composite_over(&fitted, x, y);
    Ok(Some((fitted.width(), fitted.height())))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/logo.rs"]
mod tests;

use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;

/// Encode as PNG with straight (un-premultiplied) RGBA8, alpha preserved.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn encode_png(raster: &RasterBuffer) -> CardResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.to_straight_rgba8())
        .ok_or_else(|| CardError::export("raster bytes do not match its dimensions"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;

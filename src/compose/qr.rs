use image::imageops::FilterType;
use qrcode::{EcLevel, QrCode};

use crate::foundation::core::Rgb;
use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;
use crate::raster::shapes::{ShapePaint, fill_shape, stroke_rounded_rect_inside};

/// Quiet-zone width in modules.
pub const QR_BORDER: u32 = 2;

const FRAME_FILL_ALPHA: u8 = 28;
const FRAME_INNER_ALPHA: u8 = 36;
const FRAME_OUTLINE_ALPHA: u8 = 60;
const FRAME_OUTLINE_WIDTH: f32 = 2.0;

/// Square module grid of an encoded QR symbol, without quiet zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encode `data` at error-correction level H, smallest fitting version.
    pub fn encode(data: &str) -> CardResult<Self> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H).map_err(
            |err| CardError::render(format!("cannot encode {} bytes as QR: {err}", data.len())),
        )?;
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();
        Ok(Self { width, dark })
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at `(x, y)` is dark. Out-of-range modules are light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }
}

/// Pixels per module for a QR drawn at `size` pixels.
pub fn module_box(size: u32) -> u32 {
    (size / 60).max(4)
}

/// Render `matrix` with dark modules in `fill` on white, then resize (nearest) to `size`.
pub fn rasterize_qr(matrix: &QrMatrix, fill: Rgb, size: u32) -> CardResult<RasterBuffer> {
    let bx = module_box(size);
    let modules = matrix.width() as u32 + 2 * QR_BORDER;
    let side = modules
        .checked_mul(bx)
        .ok_or_else(|| CardError::render("QR raster size overflow"))?;
    let light = image::Rgba([255, 255, 255, 255]);
    let dark = image::Rgba([fill.r, fill.g, fill.b, 255]);
    let native = image::RgbaImage::from_fn(side, side, |px, py| {
        let mx = (px / bx) as i64 - i64::from(QR_BORDER);
        let my = (py / bx) as i64 - i64::from(QR_BORDER);
        if mx >= 0 && my >= 0 && matrix.is_dark(mx as usize, my as usize) {
            dark
        } else {
            light
        }
    });
    let scaled = if side == size {
        native
    } else {
        image::imageops::resize(&native, size, size, FilterType::Nearest)
    };
    RasterBuffer::from_premul_rgba8(size, size, scaled.into_raw())
}

/// Margin between a QR of `qr_size` and the edge of its contrast frame.
pub fn qr_frame_pad(qr_size: u32) -> u32 {
    (f64::from(qr_size) * 0.08).trunc() as u32
}

/// Translucent rounded backdrop placed behind a QR of `qr_size` on dark themes.
///
/// Returns the frame and its padding around the QR.
pub fn qr_frame(qr_size: u32) -> CardResult<(RasterBuffer, u32)> {
    let pad = qr_frame_pad(qr_size);
    let side = qr_size + 2 * pad;
    let mut frame = RasterBuffer::filled(side, side, Rgb::WHITE.with_alpha(FRAME_FILL_ALPHA))?;
    let rect = kurbo::Rect::new(0.0, 0.0, f64::from(side), f64::from(side));
    let radius = (f64::from(side) * 0.12).trunc();
    fill_shape(
        &mut frame,
        &kurbo::RoundedRect::from_rect(rect, radius),
        ShapePaint::replace([255, 255, 255, FRAME_INNER_ALPHA]),
    )?;
    stroke_rounded_rect_inside(
        &mut frame,
        rect,
        radius,
        FRAME_OUTLINE_WIDTH,
        ShapePaint::replace([255, 255, 255, FRAME_OUTLINE_ALPHA]),
    )?;
    Ok((frame, pad))
}

/// Draw the QR for `url` at `(x, y)`; a framed backdrop goes underneath when `dark_theme`.
///
/// Returns `false` without drawing when `url` is empty.
pub fn composite_qr(
    canvas: &mut RasterBuffer,
    url: &str,
    fill: Rgb,
    size: u32,
    x: i64,
    y: i64,
    dark_theme: bool,
) -> CardResult<bool> {
    if url.is_empty() {
        return Ok(false);
    }
    if size == 0 {
        return Err(CardError::render("QR size must be non-zero"));
    }
    let matrix = QrMatrix::encode(url)?;
    let qr = rasterize_qr(&matrix, fill, size)?;
    if dark_theme {
        let (frame, pad) = qr_frame(size)?;
        canvas.composite_over(&frame, x - i64::from(pad), y - i64::from(pad));
    }
    canvas.composite_over(&qr, x, y);
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/qr.rs"]
mod tests;

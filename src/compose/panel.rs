use crate::foundation::core::Rgb;
use crate::foundation::error::CardResult;
use crate::raster::blur::gaussian_blur;
use crate::raster::buffer::RasterBuffer;
use crate::raster::shapes::{ShapePaint, fill_shape, stroke_rounded_rect_inside};
use crate::theme::registry::Panel;

const GLASS_FILL_ALPHA: u8 = 55;
const GLASS_OUTLINE_ALPHA: u8 = 75;
const GLASS_OUTLINE_WIDTH: f32 = 2.0;
const GLASS_BLUR: f32 = 0.5;

/// Panel bounds on a `width x height` canvas and its corner radius.
///
/// The rectangle spans pixels `pad..=width-pad` (inclusive edges), with `pad` at 4% of the width (truncated).
pub fn panel_geometry(width: u32, height: u32) -> (kurbo::Rect, f64) {
    let pad = (f64::from(width) * 0.04).trunc();
    let radius = (f64::from(width) * 0.02).trunc();
    let rect = kurbo::Rect::new(
        pad,
        pad,
        f64::from(width) - pad + 1.0,
        f64::from(height) - pad + 1.0,
    );
    (rect, radius)
}

/// Draw the panel treatment over `canvas` in place.
pub fn apply_panel(canvas: &mut RasterBuffer, panel: &Panel) -> CardResult<()> {
    let (rect, radius) = panel_geometry(canvas.width(), canvas.height());
    let shape = kurbo::RoundedRect::from_rect(rect, radius);
    match *panel {
        Panel::None => Ok(()),
        Panel::Solid { color } => {
            let Rgb { r, g, b } = color;
            fill_shape(canvas, &shape, ShapePaint::over([r, g, b, 255]))
        }
        Panel::Glass => {
            let mut overlay = RasterBuffer::new(canvas.width(), canvas.height())?;
            fill_shape(
                &mut overlay,
                &shape,
                ShapePaint::over([255, 255, 255, GLASS_FILL_ALPHA]),
            )?;
            stroke_rounded_rect_inside(
                &mut overlay,
                rect,
                radius,
                GLASS_OUTLINE_WIDTH,
                ShapePaint::replace([255, 255, 255, GLASS_OUTLINE_ALPHA]),
            )?;
            let overlay = gaussian_blur(&overlay, GLASS_BLUR)?;
            canvas.composite_over(&overlay, 0, 0);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/panel.rs"]
mod tests;

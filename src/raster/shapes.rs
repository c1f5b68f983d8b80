use kurbo::{PathEl, Shape};
use resvg::tiny_skia;

use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;

/// How painted coverage combines with the pixels already in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintMode {
    /// Source-over.
    #[default]
    Over,
    /// Covered pixels take the paint color outright, alpha included.
    Replace,
}

/// Straight RGBA paint color plus compositing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapePaint {
    pub rgba: [u8; 4],
    pub mode: PaintMode,
}

impl ShapePaint {
    pub fn over(rgba: [u8; 4]) -> Self {
        Self {
            rgba,
            mode: PaintMode::Over,
        }
    }

    pub fn replace(rgba: [u8; 4]) -> Self {
        Self {
            rgba,
            mode: PaintMode::Replace,
        }
    }

    fn to_skia(self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        let [r, g, b, a] = self.rgba;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint.blend_mode = match self.mode {
            PaintMode::Over => tiny_skia::BlendMode::SourceOver,
            PaintMode::Replace => tiny_skia::BlendMode::Source,
        };
        paint
    }
}

/// Fill any kurbo shape.
pub fn fill_shape(buf: &mut RasterBuffer, shape: &impl Shape, paint: ShapePaint) -> CardResult<()> {
    let Some(path) = shape_to_skia(shape) else {
        return Ok(());
    };
    let mut pm = buf.pixmap_mut()?;
    pm.fill_path(
        &path,
        &paint.to_skia(),
        tiny_skia::FillRule::Winding,
        tiny_skia::Transform::identity(),
        None,
    );
    Ok(())
}

/// Stroke the outline of a kurbo shape with a line of `width` pixels centered on the path.
pub fn stroke_shape(
    buf: &mut RasterBuffer,
    shape: &impl Shape,
    width: f32,
    paint: ShapePaint,
) -> CardResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(CardError::render("stroke width must be finite and > 0"));
    }
    let Some(path) = shape_to_skia(shape) else {
        return Ok(());
    };
    let stroke = tiny_skia::Stroke {
        width,
        ..Default::default()
    };
    let mut pm = buf.pixmap_mut()?;
    pm.stroke_path(
        &path,
        &paint.to_skia(),
        &stroke,
        tiny_skia::Transform::identity(),
        None,
    );
    Ok(())
}

/// Rounded rectangle from its outer edges, with the outline drawn inside those edges.
pub fn stroke_rounded_rect_inside(
    buf: &mut RasterBuffer,
    rect: kurbo::Rect,
    radius: f64,
    width: f32,
    paint: ShapePaint,
) -> CardResult<()> {
    let half = f64::from(width) / 2.0;
    let inner = rect.inset(-half);
    if inner.width() <= 0.0 || inner.height() <= 0.0 {
        return Ok(());
    }
    let shape = kurbo::RoundedRect::from_rect(inner, (radius - half).max(0.0));
    stroke_shape(buf, &shape, width, paint)
}

/// Fill the union of axis-aligned rectangles as one path.
pub fn fill_rects(buf: &mut RasterBuffer, rects: &[kurbo::Rect], paint: ShapePaint) -> CardResult<()> {
    let mut pb = tiny_skia::PathBuilder::new();
    for r in rects {
        if let Some(rect) = tiny_skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32) {
            pb.push_rect(rect);
        }
    }
    let Some(path) = pb.finish() else {
        return Ok(());
    };
    let mut pm = buf.pixmap_mut()?;
    pm.fill_path(
        &path,
        &paint.to_skia(),
        tiny_skia::FillRule::Winding,
        tiny_skia::Transform::identity(),
        None,
    );
    Ok(())
}

fn shape_to_skia(shape: &impl Shape) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shapes.rs"]
mod tests;

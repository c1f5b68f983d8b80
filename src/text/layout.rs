use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::foundation::core::Rgb;
use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;
use crate::text::bitmap;
use crate::text::fonts::{FontFace, FontLibrary, FontWeight, OutlineFace};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb> for TextBrush {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Size, weight and color of a run of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: u32,
    /// Weight class.
    pub weight: FontWeight,
    /// Fill color.
    pub color: Rgb,
}

/// Horizontal text extent at a given pixel size and weight.
pub trait TextMeasure {
    /// Width of `text` in pixels.
    fn measure(&mut self, text: &str, size_px: u32, weight: FontWeight) -> CardResult<f64>;
}

/// Largest size in `[min_size, max_size]` whose width fits `max_width`, else `min_size`.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measurer: &mut M,
    text: &str,
    max_width: f64,
    max_size: u32,
    min_size: u32,
    weight: FontWeight,
) -> CardResult<u32> {
    let floor = min_size.max(1);
    let mut size = max_size;
    while size >= floor {
        if measurer.measure(text, size, weight)? <= max_width {
            return Ok(size);
        }
        size -= 1;
    }
    Ok(min_size)
}

/// Greedy word wrap. Paragraphs split on `\n`; blank paragraphs are dropped.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measurer: &mut M,
    text: &str,
    size_px: u32,
    weight: FontWeight,
    max_width: f64,
) -> CardResult<Vec<String>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measurer.measure(&candidate, size_px, weight)? <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Per-render text shaping state over a shared [`FontLibrary`].
pub struct TextEngine<'a> {
    fonts: &'a FontLibrary,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: HashMap<PathBuf, String>,
}

impl<'a> TextEngine<'a> {
    /// Fresh shaping contexts over `fonts`.
    pub fn new(fonts: &'a FontLibrary) -> Self {
        Self {
            fonts,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &OutlineFace) -> CardResult<String> {
        if let Some(name) = self.families.get(face.path()) {
            return Ok(name.clone());
        }
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes().as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::render(format!(
                "no font families registered from '{}'",
                face.path().display()
            ))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::render("registered font family has no name"))?
            .to_string();
        self.families.insert(face.path().to_path_buf(), name.clone());
        Ok(name)
    }

    fn layout(
        &mut self,
        face: &OutlineFace,
        text: &str,
        size_px: u32,
        brush: TextBrush,
    ) -> CardResult<parley::Layout<TextBrush>> {
        if size_px == 0 {
            return Err(CardError::render("text size must be > 0"));
        }
        let family = self.family_for(face)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Draw one line of `text` with its top-left at `(x, y)`.
    pub fn draw_text(
        &mut self,
        canvas: &mut RasterBuffer,
        text: &str,
        x: i64,
        y: i64,
        style: TextStyle,
    ) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let TextStyle {
            size_px,
            weight,
            color,
        } = style;
        let fonts = self.fonts;
        match fonts.face(weight) {
            FontFace::Builtin => bitmap::draw(
                canvas,
                text,
                x as f64,
                y as f64,
                f64::from(size_px),
                color,
            ),
            FontFace::Outline(face) => {
                let layout = self.layout(face, text, size_px, color.into())?;
                draw_layout(canvas, face, &layout, x, y, size_px)
            }
        }
    }
}

impl TextMeasure for TextEngine<'_> {
    fn measure(&mut self, text: &str, size_px: u32, weight: FontWeight) -> CardResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let fonts = self.fonts;
        match fonts.face(weight) {
            FontFace::Builtin => Ok(bitmap::measure(text, f64::from(size_px))),
            FontFace::Outline(face) => {
                let layout = self.layout(face, text, size_px, TextBrush::default())?;
                Ok(f64::from(layout.width()))
            }
        }
    }
}

// Glyphs are rasterized into a scratch pixmap covering the layout plus a margin for
// overhanging outlines, clipped to the canvas, then composited at the clipped origin.
fn draw_layout(
    canvas: &mut RasterBuffer,
    face: &OutlineFace,
    layout: &parley::Layout<TextBrush>,
    x: i64,
    y: i64,
    size_px: u32,
) -> CardResult<()> {
    let margin = i64::from((size_px / 4).max(2));
    let layout_w = layout.width().ceil().max(0.0) as i64;
    let layout_h = layout.height().ceil().max(0.0) as i64;
    let x0 = (x - margin).max(0);
    let y0 = (y - margin).max(0);
    let x1 = (x + layout_w + margin).min(i64::from(canvas.width()));
    let y1 = (y + layout_h + margin).min(i64::from(canvas.height()));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let w16: u16 = w
        .try_into()
        .map_err(|_| CardError::render("text region width exceeds u16"))?;
    let h16: u16 = h
        .try_into()
        .map_err(|_| CardError::render("text region height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        (x - x0) as f64,
        (y - y0) as f64,
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            // Positioned glyphs carry the run offset and the line baseline.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(face.font_data())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    canvas.composite_premul_over(pixmap.data_as_u8_slice(), w, h, x0, y0);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;

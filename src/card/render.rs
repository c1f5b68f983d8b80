use crate::background::synth::synthesize_background;
use crate::card::spec::CardSpec;
use crate::compose::logo::composite_logo;
use crate::compose::panel::apply_panel;
use crate::compose::qr::{composite_qr, qr_frame_pad};
use crate::foundation::core::{CanvasSize, Rect};
use crate::foundation::error::CardResult;
use crate::raster::buffer::RasterBuffer;
use crate::text::fonts::{FontLibrary, FontWeight};
use crate::text::layout::{TextEngine, TextMeasure, TextStyle, fit_text, wrap_text};
use crate::theme::registry::{Panel, ThemeEntry, ThemeRegistry};

const NAME_PLACEHOLDER: &str = "Your Name";
const TITLE_PLACEHOLDER: &str = "Job Title";
const TITLE_SEPARATOR: &str = " \u{2014} ";
const TITLE_WRAP_LINES: usize = 2;
const ADDRESS_LINES: usize = 3;

fn frac(v: u32, f: f64) -> u32 {
    (f64::from(v) * f).trunc() as u32
}

/// Column layout of a card, derived from its size and panel treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardGeometry {
    /// Outer margin on every side.
    pub pad: u32,
    /// Width inside the margins.
    pub inner_w: u32,
    /// Height inside the margins.
    pub inner_h: u32,
    /// Width reserved for the QR column.
    pub right_w: u32,
    /// Width of the text column.
    pub left_w: u32,
    /// Left edge of the text column.
    pub left_x: u32,
    /// Initial vertical cursor.
    pub top: u32,
    /// Width budget for a line of text.
    pub text_w: u32,
}

impl CardGeometry {
    /// Layout for `size`; glass panels push the text column right by 2% of the width.
    pub fn new(size: CanvasSize, glass: bool) -> Self {
        let (w, h) = (size.width(), size.height());
        let pad = frac(w, 0.06);
        let gutter = frac(w, 0.02);
        let inner_w = w - 2 * pad;
        let inner_h = h.saturating_sub(2 * pad);
        let right_w = frac(inner_w, 0.38);
        let left_w = inner_w - right_w - gutter;
        Self {
            pad,
            inner_w,
            inner_h,
            right_w,
            left_w,
            left_x: pad + if glass { gutter } else { 0 },
            top: pad + frac(h, 0.02),
            text_w: frac(left_w, 0.98),
        }
    }

    /// QR side length and top-left corner.
    pub fn qr_placement(&self, size: CanvasSize) -> (u32, u32, u32) {
        let side = frac(size.height(), 0.72).min(frac(self.inner_w, 0.38));
        let x = size.width() - self.pad - side;
        let y = self.pad + self.inner_h.saturating_sub(side) / 2;
        (side, x, y)
    }
}

/// Where each element of a rendered card ended up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardLayout {
    /// Logo bounds, when a logo was drawn.
    pub logo: Option<Rect>,
    /// Pixel size chosen for the name.
    pub name_size: u32,
    /// Title/company lines as drawn.
    pub title_lines: Vec<String>,
    /// Pixel size of the title/company lines.
    pub title_size: u32,
    /// Contact lines as drawn.
    pub contact_lines: Vec<String>,
    /// Address lines as drawn.
    pub address_lines: Vec<String>,
    /// Vertical cursor after the last text line.
    pub text_bottom: u32,
    /// QR bounds, when a URL was present.
    pub qr: Option<Rect>,
    /// Contrast frame bounds behind the QR on dark themes.
    pub qr_frame: Option<Rect>,
}

/// A finished card plus its layout.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    /// Final pixels.
    pub raster: RasterBuffer,
    /// Element placement.
    pub layout: CardLayout,
}

/// Assembles cards from the shared theme catalog and font library.
///
/// Holds only shared references, so one renderer can serve concurrent renders.
#[derive(Clone, Copy, Debug)]
pub struct CardRenderer<'a> {
    themes: &'a ThemeRegistry,
    fonts: &'a FontLibrary,
}

impl<'a> CardRenderer<'a> {
    /// Renderer over `themes` and `fonts`.
    pub fn new(themes: &'a ThemeRegistry, fonts: &'a FontLibrary) -> Self {
        Self { themes, fonts }
    }

    /// Render `spec` to a raster.
    pub fn render(&self, spec: &CardSpec) -> CardResult<RasterBuffer> {
        self.render_detailed(spec).map(|card| card.raster)
    }

    /// Render `spec`, also reporting where each element was placed.
    #[tracing::instrument(skip(self, spec), fields(theme = %spec.theme, size = %spec.size))]
    pub fn render_detailed(&self, spec: &CardSpec) -> CardResult<RenderedCard> {
        let theme = self.themes.lookup(&spec.theme);
        let size = spec.size;
        let geo = CardGeometry::new(size, matches!(theme.panel, Panel::Glass));
        let mut layout = CardLayout::default();

        let mut canvas = synthesize_background(size, &theme.background, spec.accent)?;
        apply_panel(&mut canvas, &theme.panel)?;

        let mut cursor = geo.top;
        if let Some(logo) = &spec.logo {
            let max_w = frac(geo.left_w, 0.35);
            let max_h = frac(size.height(), 0.22);
            let drawn = composite_logo(
                &mut canvas,
                logo,
                i64::from(geo.left_x),
                i64::from(cursor),
                max_w,
                max_h,
            )?;
            if let Some((w, h)) = drawn {
                layout.logo = Some(Rect::new(
                    f64::from(geo.left_x),
                    f64::from(cursor),
                    f64::from(geo.left_x + w),
                    f64::from(cursor + h),
                ));
                cursor += h + frac(size.height(), 0.03);
            }
        }

        let mut engine = TextEngine::new(self.fonts);
        cursor = draw_text_block(&mut engine, &mut canvas, spec, theme, &geo, cursor, &mut layout)?;
        layout.text_bottom = cursor;

        let (side, qx, qy) = geo.qr_placement(size);
        let dark = theme.is_dark();
        if composite_qr(
            &mut canvas,
            &spec.url,
            spec.accent,
            side,
            i64::from(qx),
            i64::from(qy),
            dark,
        )? {
            layout.qr = Some(Rect::new(
                f64::from(qx),
                f64::from(qy),
                f64::from(qx + side),
                f64::from(qy + side),
            ));
            if dark {
                let pad = f64::from(qr_frame_pad(side));
                layout.qr_frame = layout.qr.map(|r| r.inflate(pad, pad));
            }
        }

        Ok(RenderedCard {
            raster: canvas,
            layout,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text_block(
    engine: &mut TextEngine<'_>,
    canvas: &mut RasterBuffer,
    spec: &CardSpec,
    theme: &ThemeEntry,
    geo: &CardGeometry,
    mut cursor: u32,
    layout: &mut CardLayout,
) -> CardResult<u32> {
    let h = spec.size.height();
    let text_w = f64::from(geo.text_w);
    let x = i64::from(geo.left_x);

    let name = if spec.name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        spec.name.as_str()
    };
    let name_size = fit_text(engine, name, text_w, frac(h, 0.16), frac(h, 0.09), FontWeight::Bold)?;
    engine.draw_text(
        canvas,
        name,
        x,
        i64::from(cursor),
        TextStyle {
            size_px: name_size,
            weight: FontWeight::Bold,
            color: theme.foreground,
        },
    )?;
    layout.name_size = name_size;
    cursor += frac(name_size, 1.25);

    let title_line = title_line(&spec.title, &spec.company);
    let title_size = fit_text(
        engine,
        &title_line,
        text_w,
        frac(h, 0.08),
        frac(h, 0.06),
        FontWeight::Semibold,
    )?;
    if engine.measure(&title_line, title_size, FontWeight::Semibold)? <= text_w {
        engine.draw_text(
            canvas,
            &title_line,
            x,
            i64::from(cursor),
            TextStyle {
                size_px: title_size,
                weight: FontWeight::Semibold,
                color: theme.subdued,
            },
        )?;
        layout.title_size = title_size;
        layout.title_lines = vec![title_line];
        cursor += frac(title_size, 1.5);
    } else {
        let wrap_size = frac(h, 0.07);
        let mut lines = wrap_text(engine, &title_line, wrap_size, FontWeight::Semibold, text_w)?;
        lines.truncate(TITLE_WRAP_LINES);
        for line in &lines {
            engine.draw_text(
                canvas,
                line,
                x,
                i64::from(cursor),
                TextStyle {
                    size_px: wrap_size,
                    weight: FontWeight::Semibold,
                    color: theme.subdued,
                },
            )?;
            cursor += frac(wrap_size, 1.35);
        }
        layout.title_size = wrap_size;
        layout.title_lines = lines;
    }

    let info = TextStyle {
        size_px: frac(h, 0.06),
        weight: FontWeight::Regular,
        color: theme.foreground,
    };
    for contact in [&spec.email, &spec.phone] {
        if contact.is_empty() {
            continue;
        }
        engine.draw_text(canvas, contact, x, i64::from(cursor), info)?;
        layout.contact_lines.push(contact.clone());
        cursor += frac(info.size_px, 1.35);
    }

    if !spec.address.is_empty() {
        let small = TextStyle {
            size_px: frac(h, 0.055),
            weight: FontWeight::Regular,
            color: theme.foreground,
        };
        let mut lines = wrap_text(engine, &spec.address, small.size_px, small.weight, text_w)?;
        lines.truncate(ADDRESS_LINES);
        for line in &lines {
            engine.draw_text(canvas, line, x, i64::from(cursor), small)?;
            cursor += frac(small.size_px, 1.35);
        }
        layout.address_lines = lines;
    }

    Ok(cursor)
}

/// Title (or placeholder) and company joined by [`TITLE_SEPARATOR`], trimmed.
fn title_line(title: &str, company: &str) -> String {
    let head = if title.is_empty() {
        TITLE_PLACEHOLDER
    } else {
        title
    };
    let sep = if !title.is_empty() || !company.is_empty() {
        TITLE_SEPARATOR
    } else {
        ""
    };
    format!("{head}{sep}{company}").trim().to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/card/render.rs"]
mod tests;

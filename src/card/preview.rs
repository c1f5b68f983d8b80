use rayon::prelude::*;

use crate::background::synth::synthesize_background;
use crate::compose::panel::apply_panel;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::CardResult;
use crate::raster::buffer::RasterBuffer;
use crate::theme::palette::DEFAULT_ACCENT;
use crate::theme::registry::ThemeRegistry;

/// Thumbnail of one theme's background and panel.
#[derive(Clone, Debug)]
pub struct ThemePreview {
    /// Theme key.
    pub key: String,
    /// Theme display name.
    pub title: String,
    /// Whether the theme is dark.
    pub dark: bool,
    /// Thumbnail pixels.
    pub raster: RasterBuffer,
}

/// One thumbnail per theme, in catalog order.
#[tracing::instrument(skip(registry), fields(themes = registry.len(), size = %size))]
pub fn render_theme_previews(
    registry: &ThemeRegistry,
    size: CanvasSize,
) -> CardResult<Vec<ThemePreview>> {
    let entries: Vec<_> = registry.iter().collect();
    entries
        .par_iter()
        .map(|theme| {
            let mut raster = synthesize_background(size, &theme.background, DEFAULT_ACCENT)?;
            apply_panel(&mut raster, &theme.panel)?;
            Ok(ThemePreview {
                key: theme.key.clone(),
                title: theme.title.clone(),
                dark: theme.is_dark(),
                raster,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/card/preview.rs"]
mod tests;

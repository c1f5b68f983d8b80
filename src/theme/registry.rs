use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;

use crate::foundation::core::Rgb;
use crate::foundation::error::{CardError, CardResult};

/// Background drawing routine selected by a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Uniform fill.
    Solid {
        /// Fill color.
        color: Rgb,
    },
    /// Diagonal blue-to-violet gradient.
    Gradient,
    /// Pale 45 degree stripes over white.
    Stripe,
    /// Dark base with soft colored blobs.
    Aurora,
    /// Fine dark checkerboard texture.
    Carbon,
    /// Light base with thin 45 degree lines.
    Lines,
    /// Pale two-axis sheen.
    Satin,
}

/// Content backdrop drawn over the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    /// No panel.
    None,
    /// Opaque rounded panel.
    Solid {
        /// Fill color.
        color: Rgb,
    },
    /// Frosted translucent panel.
    Glass,
}

/// A named bundle of background, text colors and panel treatment.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemeEntry {
    /// Lookup key, e.g. `pro-modern`.
    pub key: String,
    /// Display name.
    pub title: String,
    /// Background routine.
    pub background: Background,
    /// Primary text color.
    pub foreground: Rgb,
    /// Secondary text color.
    pub subdued: Rgb,
    /// Panel treatment.
    pub panel: Panel,
}

impl ThemeEntry {
    /// Whether text is light on a dark backdrop (foreground relative luminance above 0.5).
    pub fn is_dark(&self) -> bool {
        self.foreground.relative_luminance() > 0.5
    }
}

/// Immutable theme catalog.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    entries: Vec<ThemeEntry>,
    default_index: usize,
}

static BUILTIN: LazyLock<ThemeRegistry> =
    LazyLock::new(|| ThemeRegistry::from_trusted(builtin_entries()));

impl ThemeRegistry {
    /// Key used when a lookup misses.
    pub const DEFAULT_KEY: &'static str = "pro-modern";

    /// Build a registry, rejecting empty catalogs and duplicate keys.
    pub fn new(entries: Vec<ThemeEntry>) -> CardResult<Self> {
        if entries.is_empty() {
            return Err(CardError::validation("theme catalog must not be empty"));
        }
        let mut seen = HashSet::new();
        for e in &entries {
            if e.key.trim().is_empty() {
                return Err(CardError::validation("theme key must be non-empty"));
            }
            if !seen.insert(e.key.as_str()) {
                return Err(CardError::validation(format!(
                    "duplicate theme key '{}'",
                    e.key
                )));
            }
        }
        Ok(Self::from_trusted(entries))
    }

    fn from_trusted(entries: Vec<ThemeEntry>) -> Self {
        let default_index = entries
            .iter()
            .position(|e| e.key == Self::DEFAULT_KEY)
            .unwrap_or(0);
        Self {
            entries,
            default_index,
        }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse a catalog from a JSON array of [`ThemeEntry`].
    pub fn from_json(json: &str) -> CardResult<Self> {
        let entries: Vec<ThemeEntry> =
            serde_json::from_str(json).context("parse theme catalog json")?;
        Self::new(entries)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read theme catalog '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Serialize the catalog as a JSON array.
    pub fn to_json(&self) -> CardResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries).context("serialize theme catalog")?)
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&ThemeEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Lookup that fails over to the default entry for unknown keys.
    pub fn lookup(&self, key: &str) -> &ThemeEntry {
        self.get(key).unwrap_or_else(|| {
            tracing::debug!(key, "unknown theme, using default");
            self.default_entry()
        })
    }

    /// Entry used for unknown keys.
    pub fn default_entry(&self) -> &ThemeEntry {
        &self.entries[self.default_index]
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ThemeEntry> {
        self.entries.iter()
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; registries are never empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_entries() -> Vec<ThemeEntry> {
    fn entry(
        key: &str,
        title: &str,
        background: Background,
        foreground: Rgb,
        subdued: Rgb,
        panel: Panel,
    ) -> ThemeEntry {
        ThemeEntry {
            key: key.to_string(),
            title: title.to_string(),
            background,
            foreground,
            subdued,
            panel,
        }
    }
    let solid = |r, g, b| Background::Solid {
        color: Rgb::new(r, g, b),
    };
    let panel = |r, g, b| Panel::Solid {
        color: Rgb::new(r, g, b),
    };
    let white_panel = panel(255, 255, 255);

    vec![
        entry(
            "pro-clean",
            "Pro Clean",
            solid(255, 255, 255),
            Rgb::new(28, 28, 32),
            Rgb::new(110, 116, 125),
            white_panel,
        ),
        entry(
            "pro-modern",
            "Pro Modern",
            solid(244, 247, 252),
            Rgb::new(21, 24, 31),
            Rgb::new(105, 113, 123),
            white_panel,
        ),
        entry(
            "pro-dark",
            "Pro Dark",
            solid(18, 18, 22),
            Rgb::new(235, 238, 243),
            Rgb::new(160, 170, 182),
            panel(26, 27, 33),
        ),
        entry(
            "pro-glass",
            "Glass Subtle",
            solid(15, 19, 23),
            Rgb::new(232, 238, 242),
            Rgb::new(180, 195, 205),
            Panel::Glass,
        ),
        entry(
            "pro-gradient",
            "Soft Gradient",
            Background::Gradient,
            Rgb::new(255, 255, 255),
            Rgb::new(235, 235, 235),
            Panel::Glass,
        ),
        entry(
            "pro-kraft",
            "Kraft Warm",
            solid(234, 219, 198),
            Rgb::new(48, 38, 30),
            Rgb::new(95, 78, 60),
            panel(236, 224, 206),
        ),
        entry(
            "pro-mono",
            "Monochrome",
            solid(250, 250, 250),
            Rgb::new(20, 20, 20),
            Rgb::new(90, 90, 90),
            white_panel,
        ),
        entry(
            "pro-stripe",
            "Tech Stripe",
            Background::Stripe,
            Rgb::new(24, 28, 36),
            Rgb::new(98, 108, 124),
            white_panel,
        ),
        entry(
            "pro-aurora",
            "Aurora Glow",
            Background::Aurora,
            Rgb::new(240, 244, 255),
            Rgb::new(210, 220, 240),
            Panel::Glass,
        ),
        entry(
            "pro-carbon",
            "Carbon Fiber",
            Background::Carbon,
            Rgb::new(234, 237, 243),
            Rgb::new(160, 170, 182),
            panel(18, 19, 23),
        ),
        entry(
            "pro-lines",
            "Geo Lines",
            Background::Lines,
            Rgb::new(24, 28, 36),
            Rgb::new(98, 108, 124),
            white_panel,
        ),
        entry(
            "pro-satin",
            "Satin Sheen",
            Background::Satin,
            Rgb::new(22, 24, 28),
            Rgb::new(80, 88, 98),
            white_panel,
        ),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;

//! cardsmith renders business cards from a handful of text fields.
//!
//! A render is a pure function of a [`CardSpec`] plus two read-only catalogs shared by every
//! render in the process:
//!
//! - [`ThemeRegistry`] maps a theme key to a background, text colors and a panel treatment
//! - [`FontLibrary`] holds the font faces resolved once at startup
//!
//! [`CardRenderer::render`] produces a premultiplied [`RasterBuffer`], which
//! [`encode_png`] and [`encode_pdf`] serialize.
//!
//! ```no_run
//! use cardsmith::{CardRenderer, CardRequest, FontLibrary, ThemeRegistry, encode_png};
//!
//! let spec = CardRequest {
//!     name: "Jane Doe".into(),
//!     url: "https://example.com".into(),
//!     ..Default::default()
//! }
//! .into_spec();
//! let fonts = FontLibrary::builtin();
//! let raster = CardRenderer::new(ThemeRegistry::builtin(), &fonts).render(&spec)?;
//! let png = encode_png(&raster)?;
//! # Ok::<(), cardsmith::CardError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod background;
pub(crate) mod card;
pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod export;
pub(crate) mod raster;
pub(crate) mod text;
pub(crate) mod theme;

pub use crate::foundation::core::{CanvasSize, Dpi, Point, Rect, Rgb, Rgba8Premul};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::background::synth::synthesize_background;
pub use crate::card::preview::{ThemePreview, render_theme_previews};
pub use crate::card::render::{CardGeometry, CardLayout, CardRenderer, RenderedCard};
pub use crate::card::spec::{CardRequest, CardSpec};
pub use crate::compose::logo::LogoImage;
pub use crate::config::settings::{FONT_DIRS_ENV, RenderConfig, default_font_dirs};
pub use crate::export::pdf::{encode_pdf, page_size_points};
pub use crate::export::png::encode_png;
pub use crate::raster::buffer::RasterBuffer;
pub use crate::text::fonts::{FontFace, FontLibrary, FontWeight, OutlineFace};
pub use crate::text::layout::{TextEngine, TextMeasure, TextStyle, fit_text, wrap_text};
pub use crate::theme::palette::{DEFAULT_ACCENT, PaletteEntry, palette_by_name, palettes};
pub use crate::theme::registry::{Background, Panel, ThemeEntry, ThemeRegistry};

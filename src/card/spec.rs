use crate::compose::logo::LogoImage;
use crate::foundation::core::{CanvasSize, Dpi, Rgb};
use crate::theme::palette::DEFAULT_ACCENT;
use crate::theme::registry::ThemeRegistry;

/// Raw card fields as a form or JSON file delivers them.
///
/// Every field is free text; [`CardRequest::into_spec`] normalizes them and never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardRequest {
    /// Person's name.
    pub name: String,
    /// Job title.
    pub title: String,
    /// Company or organization.
    pub company: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address; may span several lines.
    pub address: String,
    /// URL encoded into the QR code.
    pub url: String,
    /// Theme key.
    pub theme: String,
    /// Accent color, `#RGB` or `#RRGGBB`.
    pub accent: String,
    /// Canvas size, `<width>x<height>`.
    pub size: String,
    /// Document export resolution.
    pub dpi: String,
    /// Encoded logo image bytes.
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
}

/// Normalized, immutable input to one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSpec {
    /// Person's name (trimmed).
    pub name: String,
    /// Job title (trimmed).
    pub title: String,
    /// Company (trimmed).
    pub company: String,
    /// Email (trimmed).
    pub email: String,
    /// Phone (trimmed).
    pub phone: String,
    /// Address (trimmed).
    pub address: String,
    /// QR payload (trimmed); empty means no QR.
    pub url: String,
    /// Theme key; unknown keys resolve to the registry default at render time.
    pub theme: String,
    /// Accent color, used for QR modules.
    pub accent: Rgb,
    /// Canvas size.
    pub size: CanvasSize,
    /// Document export resolution.
    pub dpi: Dpi,
    /// Decoded logo, if one was supplied and decodable.
    pub logo: Option<LogoImage>,
}

impl Default for CardSpec {
    fn default() -> Self {
        CardRequest::default().into_spec()
    }
}

impl CardRequest {
    /// Normalize into a [`CardSpec`], substituting defaults for unparsable values.
    pub fn into_spec(self) -> CardSpec {
        let theme = self.theme.trim();
        let theme = if theme.is_empty() {
            ThemeRegistry::DEFAULT_KEY.to_string()
        } else {
            theme.to_string()
        };
        let accent = if self.accent.trim().is_empty() {
            DEFAULT_ACCENT
        } else {
            Rgb::parse_or(&self.accent, DEFAULT_ACCENT)
        };
        let size = if self.size.trim().is_empty() {
            CanvasSize::DEFAULT
        } else {
            CanvasSize::parse_or_default(&self.size)
        };
        let logo = self
            .logo
            .as_deref()
            .filter(|b| !b.is_empty())
            .and_then(LogoImage::decode_or_none);

        CardSpec {
            name: self.name.trim().to_string(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            url: self.url.trim().to_string(),
            theme,
            accent,
            size,
            dpi: Dpi::parse_or_default(Some(&self.dpi)),
            logo,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/spec.rs"]
mod tests;

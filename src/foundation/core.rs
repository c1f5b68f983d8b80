use std::fmt;
use std::str::FromStr;

pub use kurbo::{Point, Rect};

/// Straight (non-premultiplied) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` notation (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |c: u8| -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                _ => c - b'A' + 10,
            }
        };
        let b = s.as_bytes();
        match b.len() {
            3 => Some(Self::new(
                nibble(b[0]) * 17,
                nibble(b[1]) * 17,
                nibble(b[2]) * 17,
            )),
            6 => Some(Self::new(
                nibble(b[0]) * 16 + nibble(b[1]),
                nibble(b[2]) * 16 + nibble(b[3]),
                nibble(b[4]) * 16 + nibble(b[5]),
            )),
            _ => None,
        }
    }

    /// Parse a hex color, substituting `default` for anything unparsable.
    pub fn parse_or(s: &str, default: Self) -> Self {
        Self::parse_hex(s).unwrap_or_else(|| {
            tracing::debug!(input = s, "unparsable color, using default");
            default
        })
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f64 {
        fn lin(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * lin(self.r) + 0.7152 * lin(self.g) + 0.0722 * lin(self.b)
    }

    /// Premultiplied pixel of this color at the given alpha.
    pub fn with_alpha(self, a: u8) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }

    /// Opaque premultiplied pixel of this color.
    pub fn opaque(self) -> Rgba8Premul {
        self.with_alpha(255)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| format!("invalid hex color '{s}'"))
    }
}

impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    /// Red channel, premultiplied.
    pub r: u8,
    /// Green channel, premultiplied.
    pub g: u8,
    /// Blue channel, premultiplied.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent pixel.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight RGBA color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel bytes in buffer order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Card canvas size in pixels.
///
/// Always at least [`CanvasSize::MIN_WIDTH`] x [`CanvasSize::MIN_HEIGHT`] and at most
/// [`CanvasSize::MAX_DIM`] on either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Smallest accepted width.
    pub const MIN_WIDTH: u32 = 400;
    /// Smallest accepted height.
    pub const MIN_HEIGHT: u32 = 250;
    /// Largest accepted width or height.
    pub const MAX_DIM: u32 = 8192;
    /// US business card at 300 dpi.
    pub const DEFAULT: Self = Self {
        width: 1050,
        height: 600,
    };

    /// Clamp arbitrary dimensions into the accepted range.
    pub fn clamped(width: i64, height: i64) -> Self {
        let clamp = |v: i64, min: u32| -> u32 {
            v.clamp(i64::from(min), i64::from(Self::MAX_DIM)) as u32
        };
        Self {
            width: clamp(width, Self::MIN_WIDTH),
            height: clamp(height, Self::MIN_HEIGHT),
        }
    }

    /// Parse `<width>x<height>` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        let (w, h) = lower.split_once('x')?;
        let w: i64 = w.trim().parse().ok()?;
        let h: i64 = h.trim().parse().ok()?;
        Some(Self::clamped(w, h))
    }

    /// Parse a size string, substituting [`CanvasSize::DEFAULT`] for anything unparsable.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::debug!(input = s, "unparsable size, using default");
            Self::DEFAULT
        })
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Document export resolution in dots per inch. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dpi(u32);

impl Dpi {
    /// Print resolution used when none is given.
    pub const DEFAULT: Self = Self(300);

    /// Wrap a positive resolution.
    pub fn new(dpi: u32) -> Option<Self> {
        (dpi > 0).then_some(Self(dpi))
    }

    /// Parse a DPI string, substituting [`Dpi::DEFAULT`] for absent, unparsable or zero values.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::DEFAULT;
        };
        s.parse::<u32>().ok().and_then(Self::new).unwrap_or_else(|| {
            tracing::debug!(input = s, "unparsable dpi, using default");
            Self::DEFAULT
        })
    }

    /// Raw value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

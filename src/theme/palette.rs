use crate::foundation::core::Rgb;

/// A named accent color offered to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PaletteEntry {
    /// Display name.
    pub name: &'static str,
    /// Accent color.
    pub color: Rgb,
}

static PALETTE: [PaletteEntry; 10] = [
    PaletteEntry {
        name: "Indigo",
        color: Rgb::new(0x4f, 0x46, 0xe5),
    },
    PaletteEntry {
        name: "Blue",
        color: Rgb::new(0x3b, 0x82, 0xf6),
    },
    PaletteEntry {
        name: "Sky",
        color: Rgb::new(0x0e, 0xa5, 0xe9),
    },
    PaletteEntry {
        name: "Teal",
        color: Rgb::new(0x14, 0xb8, 0xa6),
    },
    PaletteEntry {
        name: "Emerald",
        color: Rgb::new(0x10, 0xb9, 0x81),
    },
    PaletteEntry {
        name: "Amber",
        color: Rgb::new(0xf5, 0x9e, 0x0b),
    },
    PaletteEntry {
        name: "Orange",
        color: Rgb::new(0xf9, 0x73, 0x16),
    },
    PaletteEntry {
        name: "Rose",
        color: Rgb::new(0xf4, 0x3f, 0x5e),
    },
    PaletteEntry {
        name: "Fuchsia",
        color: Rgb::new(0xa2, 0x1c, 0xaf),
    },
    PaletteEntry {
        name: "Slate",
        color: Rgb::new(0x33, 0x41, 0x55),
    },
];

/// Accent used when none is given or the given one does not parse.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x3b, 0x82, 0xf6);

/// Built-in accent palette in display order.
pub fn palettes() -> &'static [PaletteEntry] {
    &PALETTE
}

/// Case-insensitive lookup by palette name.
pub fn palette_by_name(name: &str) -> Option<&'static PaletteEntry> {
    PALETTE
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;

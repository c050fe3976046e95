//! Highlight color palette.
//!
//! The scanning pipeline only ever carries numeric color ids. Resolving an
//! id to an actual color is the job of display surfaces.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Error returned for malformed `#RRGGBB[AA]` strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #RRGGBB or #RRGGBBAA")]
pub struct InvalidColor(pub String);

impl FromStr for Rgba {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Resolves highlight color ids to colors.
pub trait ColorLookup {
    fn resolve_foreground(&self, id: u16) -> Option<Rgba>;
    fn resolve_glow(&self, id: u16) -> Option<Rgba>;
}

/// One configured palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub id: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<Rgba>,
}

/// Color lookup table built from configuration.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    foreground: HashMap<u16, Rgba>,
    glow: HashMap<u16, Rgba>,
}

impl Palette {
    /// Build a palette. Later entries win over earlier ones with the same id.
    #[must_use]
    pub fn from_entries(entries: &[PaletteEntry]) -> Self {
        let mut palette = Self::default();
        for entry in entries {
            if let Some(color) = entry.foreground {
                palette.foreground.insert(entry.id, color);
            }
            if let Some(color) = entry.glow {
                palette.glow.insert(entry.id, color);
            }
        }
        palette
    }
}

impl ColorLookup for Palette {
    fn resolve_foreground(&self, id: u16) -> Option<Rgba> {
        self.foreground.get(&id).copied()
    }

    fn resolve_glow(&self, id: u16) -> Option<Rgba> {
        self.glow.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_and_rgba() {
        assert_eq!("#102030".parse(), Ok(Rgba::new(0x10, 0x20, 0x30, 0xFF)));
        assert_eq!("#10203040".parse(), Ok(Rgba::new(0x10, 0x20, 0x30, 0x40)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("102030".parse::<Rgba>().is_err());
        assert!("#1020".parse::<Rgba>().is_err());
        assert!("#GG2030".parse::<Rgba>().is_err());
        assert!("#é12345".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgba::new(255, 0, 16, 128).to_string(), "#FF001080");
    }

    #[test]
    fn test_palette_lookup() {
        let palette = Palette::from_entries(&[
            PaletteEntry {
                id: 500,
                foreground: Some(Rgba::new(1, 2, 3, 255)),
                glow: None,
            },
            PaletteEntry {
                id: 7,
                foreground: None,
                glow: Some(Rgba::new(9, 9, 9, 255)),
            },
        ]);
        assert_eq!(palette.resolve_foreground(500), Some(Rgba::new(1, 2, 3, 255)));
        assert_eq!(palette.resolve_glow(500), None);
        assert_eq!(palette.resolve_glow(7), Some(Rgba::new(9, 9, 9, 255)));
        assert_eq!(palette.resolve_foreground(1), None);
    }

    #[test]
    fn test_entry_serde() {
        let entry: PaletteEntry = toml::from_str(
            r##"
            id = 3
            glow = "#00FF00"
            "##,
        )
        .unwrap();
        assert_eq!(entry.glow, Some(Rgba::new(0, 255, 0, 255)));
        assert!(entry.foreground.is_none());
    }
}

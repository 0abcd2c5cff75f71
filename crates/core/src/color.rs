//! sRGB colors for label palettes.
//!
//! Colors parse from and serialize to `"#rrggbb"` hex strings.

use crate::error::BasinError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// The hex round-trip quantizes to 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses `"#ff00aa"` or `"ff00aa"`, case insensitive.
    ///
    /// Returns `BasinError::InvalidColor` for anything but six hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, BasinError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(BasinError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| BasinError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| BasinError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| BasinError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb::from_rgb8([r, g, b]))
    }

    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Srgb {
        Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Quantizes each channel to 8 bits, clamping to [0, 1] first.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Srgb::from_hex("#ff0000").unwrap(), Srgb::from_rgb8([255, 0, 0]));
        assert_eq!(Srgb::from_hex("00FF00").unwrap(), Srgb::from_rgb8([0, 255, 0]));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(Srgb::from_hex("#fff"), Err(BasinError::InvalidColor(_))));
        assert!(Srgb::from_hex("#ff00ff00").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        let err = Srgb::from_hex("#gg0000").unwrap_err();
        assert!(err.to_string().contains("red"), "got: {err}");
        assert!(Srgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn to_hex_round_trips() {
        for hex in ["#000000", "#ffffff", "#1a2b3c", "#ffd700"] {
            assert_eq!(Srgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn to_rgb8_clamps_out_of_range() {
        let c = Srgb {
            r: -0.5,
            g: 1.5,
            b: 0.5,
        };
        assert_eq!(c.to_rgb8(), [0, 255, 128]);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Srgb::WHITE).unwrap();
        assert_eq!(json, "\"#ffffff\"");
        let back: Srgb = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(back, Srgb::BLACK);
        assert!(serde_json::from_str::<Srgb>("\"nope\"").is_err());
    }
}

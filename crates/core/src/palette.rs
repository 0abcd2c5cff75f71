//! Label-to-color policy used when a label grid becomes pixels.

use crate::classifier::{PixelLabel, LABEL_COUNT};
use crate::color::Srgb;
use crate::error::BasinError;
use serde::{Deserialize, Serialize};

const PALETTE_NAMES: &[&str] = &["classic", "ocean", "ember", "mono"];

/// One color per [`PixelLabel`], indexed by [`PixelLabel::index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPalette {
    colors: [Srgb; LABEL_COUNT],
}

impl LabelPalette {
    pub fn new(colors: [Srgb; LABEL_COUNT]) -> Self {
        Self { colors }
    }

    /// Parses six hex colors: attractors 0..=3, stable orbit, far away.
    pub fn from_hex(hexes: [&str; LABEL_COUNT]) -> Result<Self, BasinError> {
        let mut colors = [Srgb::BLACK; LABEL_COUNT];
        for (slot, hex) in colors.iter_mut().zip(hexes) {
            *slot = Srgb::from_hex(hex)
                .map_err(|e| BasinError::InvalidPalette(format!("{hex}: {e}")))?;
        }
        Ok(Self::new(colors))
    }

    /// Looks up a built-in palette.
    ///
    /// Returns `BasinError::UnknownPalette` for names not in [`list_names`](Self::list_names).
    pub fn from_name(name: &str) -> Result<Self, BasinError> {
        match name {
            "classic" => Ok(Self::classic()),
            "ocean" => Ok(Self::ocean()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            _ => Err(BasinError::UnknownPalette(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn color(&self, label: PixelLabel) -> Srgb {
        self.colors[label.index()]
    }

    pub fn colors(&self) -> &[Srgb; LABEL_COUNT] {
        &self.colors
    }

    // -- Built-in palettes --

    /// Red, green, blue, yellow; white stable orbits; black escapes.
    pub fn classic() -> Self {
        Self::from_hex(["#ff0000", "#008000", "#0000ff", "#ffff00", "#ffffff", "#000000"])
            .expect("classic palette hex values are valid")
    }

    /// Blues and teals over a deep navy.
    pub fn ocean() -> Self {
        Self::from_hex(["#005f73", "#0a9396", "#94d2bd", "#e9d8a6", "#ffffff", "#001f3f"])
            .expect("ocean palette hex values are valid")
    }

    /// Reds and golds over near-black.
    pub fn ember() -> Self {
        Self::from_hex(["#800000", "#cc0000", "#ff8c00", "#ffd700", "#fff5e1", "#140a05"])
            .expect("ember palette hex values are valid")
    }

    /// Four grays; white stable orbits; black escapes.
    pub fn mono() -> Self {
        Self::from_hex(["#404040", "#808080", "#a0a0a0", "#c0c0c0", "#ffffff", "#000000"])
            .expect("mono palette hex values are valid")
    }
}

impl Default for LabelPalette {
    fn default() -> Self {
        Self::classic()
    }
}

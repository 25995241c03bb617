use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{DiagramError, DiagramResult};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Predefined board size, selected by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeRecord {
    /// Cell edge in pixels.
    pub cell: u32,
    /// Frame thickness around the grid in pixels.
    #[serde(default)]
    pub border: u32,
    /// Caption font size in pixels.
    pub caption_font: f32,
    /// Coordinate label font size in pixels.
    pub coordinate_font: f32,
}

/// Piece sprite set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    /// Asset name, used as the theme part of piece asset keys.
    pub name: String,
}

/// Board background art.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureRecord {
    /// Asset name of the texture image.
    pub name: String,
}

/// Inclusive bounds for explicit `{N}px` sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelLimits {
    /// Smallest accepted cell size.
    pub min_px: u32,
    /// Largest accepted cell size.
    pub max_px: u32,
}

impl Default for PixelLimits {
    fn default() -> Self {
        Self {
            min_px: 20,
            max_px: 200,
        }
    }
}

/// Colors and font used when the request does not override them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDefaults {
    /// Light cell color.
    pub light: Rgb8,
    /// Dark cell color.
    pub dark: Rgb8,
    /// Highlight tint.
    pub highlight: Rgb8,
    /// Alpha applied to the highlight tint.
    pub highlight_alpha: u8,
    /// Canvas fill behind the board.
    pub background: Rgb8,
    /// Frame color.
    pub border: Rgb8,
    /// Caption text color.
    pub caption: Rgb8,
    /// Coordinate label color.
    pub coordinates: Rgb8,
    /// Font family for captions and labels.
    pub font_family: String,
}

/// Read-only reference data the resolver validates requests against.
///
/// Sizes, themes and textures are addressed by their position in each list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Bounds for explicit pixel sizes.
    #[serde(default)]
    pub pixel_limits: PixelLimits,
    /// Size presets.
    pub sizes: Vec<SizeRecord>,
    /// Piece themes.
    pub themes: Vec<ThemeRecord>,
    /// Board textures.
    pub textures: Vec<TextureRecord>,
    /// Default colors.
    pub style: StyleDefaults,
}

impl Catalog {
    /// The catalog bundled with the crate.
    pub fn builtin() -> DiagramResult<Self> {
        Self::from_reader(BUILTIN_CATALOG.as_bytes())
    }

    /// Parse and validate a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DiagramResult<Self> {
        let catalog: Catalog = serde_json::from_reader(r)
            .map_err(|e| DiagramError::serde(format!("parse catalog JSON: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DiagramResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DiagramError::validation(format!("open catalog JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check internal consistency.
    pub fn validate(&self) -> DiagramResult<()> {
        if self.pixel_limits.min_px == 0 || self.pixel_limits.min_px > self.pixel_limits.max_px {
            return Err(DiagramError::validation(
                "pixel_limits must satisfy 0 < min_px <= max_px",
            ));
        }
        if self.sizes.is_empty() {
            return Err(DiagramError::validation("catalog has no sizes"));
        }
        if self.themes.is_empty() {
            return Err(DiagramError::validation("catalog has no themes"));
        }
        for (i, s) in self.sizes.iter().enumerate() {
            if s.cell == 0 {
                return Err(DiagramError::validation(format!("size {i}: cell must be > 0")));
            }
            if !(s.caption_font.is_finite() && s.caption_font > 0.0)
                || !(s.coordinate_font.is_finite() && s.coordinate_font > 0.0)
            {
                return Err(DiagramError::validation(format!(
                    "size {i}: font sizes must be finite and > 0"
                )));
            }
        }
        for (i, t) in self.themes.iter().enumerate() {
            if t.name.is_empty() {
                return Err(DiagramError::validation(format!("theme {i}: empty name")));
            }
        }
        for (i, t) in self.textures.iter().enumerate() {
            if t.name.is_empty() {
                return Err(DiagramError::validation(format!("texture {i}: empty name")));
            }
        }
        Ok(())
    }

    /// Size preset at `index`.
    pub fn size(&self, index: u32) -> DiagramResult<&SizeRecord> {
        self.sizes
            .get(index as usize)
            .ok_or_else(|| DiagramError::UnknownSize {
                value: index.to_string(),
            })
    }

    /// Theme at `index`.
    pub fn theme(&self, index: u32) -> DiagramResult<&ThemeRecord> {
        self.themes
            .get(index as usize)
            .ok_or(DiagramError::UnknownTheme { index })
    }

    /// Texture at `index`.
    pub fn texture(&self, index: u32) -> DiagramResult<&TextureRecord> {
        self.textures
            .get(index as usize)
            .ok_or(DiagramError::UnknownTexture { index })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/catalog.rs"]
mod tests;

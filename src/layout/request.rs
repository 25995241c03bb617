use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::DiagramError;
use crate::position::fen::START_PLACEMENT;

/// Documented default of `pieceTheme`.
pub const DEFAULT_PIECE_THEME: u32 = 0;

/// Documented default of `size`.
pub const DEFAULT_SIZE_INDEX: u32 = 1;

/// Board size as requested: a catalog index or an explicit cell size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSpec {
    /// Index into the size catalog.
    Index(u32),
    /// Explicit cell size, written `{N}px`.
    Pixels(u32),
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::Index(DEFAULT_SIZE_INDEX)
    }
}

impl FromStr for SizeSpec {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || DiagramError::UnknownSize {
            value: s.to_string(),
        };
        match s.strip_suffix("px") {
            Some(n) => n.parse::<u32>().map(Self::Pixels).map_err(|_| unknown()),
            None => s.parse::<u32>().map(Self::Index).map_err(|_| unknown()),
        }
    }
}

impl std::fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeSpec::Index(i) => write!(f, "{i}"),
            SizeSpec::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

impl Serialize for SizeSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SizeSpec::Index(i) => serializer.serialize_u32(*i),
            SizeSpec::Pixels(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for SizeSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(i) => Ok(Self::Index(i)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Raw user input for one diagram, as received from the outer request layer.
///
/// Nothing here is validated yet; [`crate::resolve`] turns it into an immutable
/// [`crate::VisualConfig`] and [`crate::Geometry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramRequest {
    /// FEN string; only the placement field is used.
    pub fen: String,
    /// Size preset index or explicit `{N}px` cell size.
    pub size: SizeSpec,
    /// Piece theme index.
    pub piece_theme: u32,
    /// Legacy name of `pieceTheme`.
    pub theme: Option<u32>,
    /// Board texture index; absent means flat colored cells.
    pub board_texture: Option<u32>,
    /// Legacy name of `boardTexture`.
    pub texture: Option<u32>,
    /// Caption drawn under the board.
    pub caption: String,
    /// Draw file and rank labels.
    pub coordinates: bool,
    /// Light cell color override (`RRGGBB`).
    pub light_cell_color: Option<String>,
    /// Dark cell color override (`RRGGBB`).
    pub dark_cell_color: Option<String>,
    /// Highlight tint override (`RRGGBB`).
    pub highlight_squares_color: Option<String>,
    /// Render from Black's side.
    pub flip: bool,
    /// Squares to tint, e.g. `"e2e4"`.
    pub highlight_squares: String,
}

impl Default for DiagramRequest {
    fn default() -> Self {
        Self {
            fen: START_PLACEMENT.to_string(),
            size: SizeSpec::default(),
            piece_theme: DEFAULT_PIECE_THEME,
            theme: None,
            board_texture: None,
            texture: None,
            caption: String::new(),
            coordinates: false,
            light_cell_color: None,
            dark_cell_color: None,
            highlight_squares_color: None,
            flip: false,
            highlight_squares: String::new(),
        }
    }
}

impl DiagramRequest {
    /// Request for `fen` with every other field defaulted.
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            ..Self::default()
        }
    }

    /// Theme index after applying the `pieceTheme` / `theme` precedence rule.
    pub fn theme_index(&self) -> u32 {
        prefer_renamed(self.piece_theme, DEFAULT_PIECE_THEME, self.theme)
    }

    /// Texture index after applying the `boardTexture` / `texture` precedence rule.
    pub fn texture_index(&self) -> Option<u32> {
        prefer_renamed(self.board_texture, None, self.texture.map(Some))
    }
}

/// A renamed field wins when it differs from its documented default; otherwise the legacy field
/// is used if present.
fn prefer_renamed<T: PartialEq>(renamed: T, default: T, legacy: Option<T>) -> T {
    if renamed != default {
        return renamed;
    }
    legacy.unwrap_or(renamed)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/request.rs"]
mod tests;

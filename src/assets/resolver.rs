use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::error::{DiagramError, DiagramResult};

/// Lookup of ready-to-composite images, consumed by the board compositor.
///
/// Implementations may fetch and cache on a miss but must return the cached image on a hit.
/// Failures surface as [`DiagramError::AssetUnavailable`].
pub trait AssetResolver: Send + Sync {
    /// Piece sprite for `code` (e.g. `"wK"`) from `theme`, scaled to `cell_size` pixels wide.
    ///
    /// The height follows the art's aspect ratio and may exceed `cell_size`.
    fn piece(&self, code: &str, theme: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>>;

    /// Board texture covering the 8×8 grid for the given cell size.
    fn board_texture(&self, texture: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>>;
}

/// What an asset key refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Piece sprite within a theme.
    Piece,
    /// Board texture.
    Texture,
}

/// Identity of a source asset, independent of the size it is rendered at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetKey {
    /// Asset kind.
    pub kind: AssetKind,
    /// Theme name for pieces, empty for textures.
    pub set: String,
    /// Piece short code or texture name.
    pub name: String,
}

impl AssetKey {
    /// Key of a piece sprite.
    pub fn piece(theme: &str, code: &str) -> Self {
        Self {
            kind: AssetKind::Piece,
            set: theme.to_string(),
            name: code.to_string(),
        }
    }

    /// Key of a board texture.
    pub fn texture(name: &str) -> Self {
        Self {
            kind: AssetKind::Texture,
            set: String::new(),
            name: name.to_string(),
        }
    }

    /// Extension-less relative path: `pieces/<theme>/<code>` or `textures/<name>`.
    pub fn rel_path(&self) -> String {
        match self.kind {
            AssetKind::Piece => format!("pieces/{}/{}", self.set, self.name),
            AssetKind::Texture => format!("textures/{}", self.name),
        }
    }

    /// Stable 64-bit identifier (FNV-1a), usable as a file name across processes.
    pub fn hash_id(&self) -> u64 {
        let tag: &[u8] = match self.kind {
            AssetKind::Piece => b"P",
            AssetKind::Texture => b"T",
        };
        fnv1a64(&[tag, self.set.as_bytes(), b"\0", self.name.as_bytes()])
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rel_path())
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a64(parts: &[&[u8]]) -> u64 {
    parts
        .iter()
        .flat_map(|part| part.iter())
        .fold(FNV_OFFSET_BASIS, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Normalize and validate asset-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> DiagramResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DiagramError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(DiagramError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(DiagramError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(DiagramError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;

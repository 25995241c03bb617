//! fendiagram renders chess positions into board diagram images.
//!
//! A [`DiagramRequest`] carries a FEN string plus styling options. Rendering is one synchronous
//! pipeline per request:
//!
//! 1. **Parse**: the FEN placement field becomes a [`Position`] (8×8 grid, row 0 = rank 8).
//! 2. **Resolve**: request options are validated against a [`Catalog`] into an immutable
//!    [`VisualConfig`] and its pixel [`Geometry`].
//! 3. **Board**: [`composite`] paints texture, cells, highlights and piece sprites fetched through
//!    an [`AssetResolver`].
//! 4. **Diagram**: [`DiagramCompositor`] adds background, frame, coordinates and caption.
//! 5. **Encode**: the opaque result is written as JPEG.
//!
//! [`Renderer`] wires these stages together. [`AssetStore`] is the caching resolver; it reads
//! encoded sprites from any [`AssetSource`] ([`DirSource`], [`MemorySource`], or a remote source
//! wrapped in [`DiskCachedSource`]).
//!
//! Every failure is a [`DiagramError`] and aborts the render; no partial image is produced.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod position;
mod render;

pub use assets::decode::{decode_fill, decode_sprite};
pub use assets::resolver::{AssetKey, AssetKind, AssetResolver, normalize_rel_path};
pub use assets::source::{
    AssetFormat, AssetSource, DirSource, DiskCachedSource, MemorySource, SourceBytes,
};
pub use assets::store::AssetStore;
pub use foundation::core::{Canvas, Rgb8};
pub use foundation::error::{DiagramError, DiagramResult};
pub use layout::catalog::{
    Catalog, PixelLimits, SizeRecord, StyleDefaults, TextureRecord, ThemeRecord,
};
pub use layout::model::{Geometry, VisualConfig};
pub use layout::request::{DEFAULT_PIECE_THEME, DEFAULT_SIZE_INDEX, DiagramRequest, SizeSpec};
pub use layout::resolver::{
    CAPTION_FONT_RATIO, COORDINATE_FONT_RATIO, MAX_CAPTION_CHARS, caption_band, resolve,
};
pub use position::fen::{START_PLACEMENT, parse, parse_placement, sanitize};
pub use position::grid::{BOARD_CELLS, Cell, Position};
pub use position::piece::{Piece, PieceColor, PieceKind};
pub use position::square::{SquareRef, parse_square_list};
pub use render::board::{composite, measure_top_padding};
pub use render::diagram::{DiagramCompositor, file_labels, rank_labels};
pub use render::encode::{DEFAULT_JPEG_QUALITY, encode_jpeg};
pub use render::pipeline::{RenderOpts, Renderer};
pub use render::text::{TextLabel, TextRasterizer};

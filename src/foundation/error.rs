/// Convenience result type used across fendiagram.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Top-level error taxonomy used by the rendering pipeline.
///
/// Every variant carries the offending value so callers can map it to a client-facing message.
/// Any error aborts the current render; no partial image is produced.
#[derive(thiserror::Error, Debug)]
pub enum DiagramError {
    /// The FEN placement field is not 8 rows or contains an invalid character.
    #[error("malformed fen '{fen}': {reason}")]
    MalformedFen {
        /// Placement string as seen by the parser.
        fen: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An alphabetic FEN character that does not name a piece.
    #[error("unknown piece letter '{letter}'")]
    UnknownPiece {
        /// The rejected letter.
        letter: char,
    },

    /// Grid addressing outside `0..8`, or a FEN row that does not expand to 8 cells.
    #[error("invalid position at row {row}, col {col}: {reason}")]
    InvalidPosition {
        /// Row index (0 = rank 8).
        row: usize,
        /// Column index (0 = file a), or the counted width for short/long rows.
        col: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Size index missing from the size catalog, or an unparseable size string.
    #[error("unknown size '{value}'")]
    UnknownSize {
        /// Size as provided by the caller.
        value: String,
    },

    /// Explicit `{N}px` size outside the configured pixel limits.
    #[error("size {px}px out of range ({min}px..={max}px)")]
    SizeOutOfRange {
        /// Requested cell size.
        px: u32,
        /// Inclusive minimum.
        min: u32,
        /// Inclusive maximum.
        max: u32,
    },

    /// Piece theme index missing from the theme catalog.
    #[error("unknown piece theme {index}")]
    UnknownTheme {
        /// Requested index.
        index: u32,
    },

    /// Board texture index missing from the texture catalog.
    #[error("unknown board texture {index}")]
    UnknownTexture {
        /// Requested index.
        index: u32,
    },

    /// Color field that is not exactly six hex digits.
    #[error("invalid color for {field}: '{value}'")]
    InvalidColor {
        /// Request field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Caption longer than the allowed maximum.
    #[error("caption is {len} characters long (max {max})")]
    InvalidCaption {
        /// Caption length in characters.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Highlight-square string with odd length or an out-of-range pair.
    #[error("invalid highlight squares '{value}': {reason}")]
    InvalidSquareList {
        /// Rejected square list.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The asset resolver failed to produce an image.
    #[error("asset unavailable '{key}': {reason}")]
    AssetUnavailable {
        /// Asset key that failed to resolve.
        key: String,
        /// Underlying failure.
        reason: String,
    },

    /// A diagram was finalized before a board image was supplied.
    #[error("board not configured: composite the board before composing the diagram")]
    BoardNotConfigured,

    /// Invalid catalog data or inconsistent compositor inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when deserializing catalog or request data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DiagramError {
    /// Build a [`DiagramError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DiagramError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`DiagramError::AssetUnavailable`] value.
    pub fn asset(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetUnavailable {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable snake_case tag identifying the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedFen { .. } => "malformed_fen",
            Self::UnknownPiece { .. } => "unknown_piece",
            Self::InvalidPosition { .. } => "invalid_position",
            Self::UnknownSize { .. } => "unknown_size",
            Self::SizeOutOfRange { .. } => "size_out_of_range",
            Self::UnknownTheme { .. } => "unknown_theme",
            Self::UnknownTexture { .. } => "unknown_texture",
            Self::InvalidColor { .. } => "invalid_color",
            Self::InvalidCaption { .. } => "invalid_caption",
            Self::InvalidSquareList { .. } => "invalid_square_list",
            Self::AssetUnavailable { .. } => "asset_unavailable",
            Self::BoardNotConfigured => "board_not_configured",
            Self::Validation(_) => "validation",
            Self::Serde(_) => "serde",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

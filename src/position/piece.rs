use crate::foundation::error::{DiagramError, DiagramResult};

/// Piece kind. Per-kind letters and names live in a static table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceColor {
    /// Uppercase FEN letters.
    White,
    /// Lowercase FEN letters.
    Black,
}

struct KindInfo {
    kind: PieceKind,
    letter: char,
    name: &'static str,
}

// FEN letter (lowercase) and display name per kind.
static KINDS: [KindInfo; 6] = [
    KindInfo {
        kind: PieceKind::Pawn,
        letter: 'p',
        name: "pawn",
    },
    KindInfo {
        kind: PieceKind::Knight,
        letter: 'n',
        name: "knight",
    },
    KindInfo {
        kind: PieceKind::Bishop,
        letter: 'b',
        name: "bishop",
    },
    KindInfo {
        kind: PieceKind::Rook,
        letter: 'r',
        name: "rook",
    },
    KindInfo {
        kind: PieceKind::Queen,
        letter: 'q',
        name: "queen",
    },
    KindInfo {
        kind: PieceKind::King,
        letter: 'k',
        name: "king",
    },
];

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    /// Look up a kind by its FEN letter, ignoring case.
    pub fn from_letter(letter: char) -> Option<Self> {
        let lower = letter.to_ascii_lowercase();
        KINDS.iter().find(|k| k.letter == lower).map(|k| k.kind)
    }

    /// Lowercase FEN letter.
    pub fn letter(self) -> char {
        self.info().letter
    }

    /// Display name, e.g. `"knight"`.
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl PieceColor {
    /// Both colors, white first.
    pub const ALL: [PieceColor; 2] = [PieceColor::White, PieceColor::Black];

    /// `'w'` or `'b'`.
    pub fn letter(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }
}

/// A chess piece: kind plus color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    /// What the piece is.
    pub kind: PieceKind,
    /// Which side it belongs to.
    pub color: PieceColor,
}

impl Piece {
    /// Construct a piece.
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Parse a FEN piece letter. Case selects the color.
    pub fn from_fen_char(c: char) -> DiagramResult<Self> {
        let kind = PieceKind::from_letter(c).ok_or(DiagramError::UnknownPiece { letter: c })?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Ok(Self { kind, color })
    }

    /// FEN letter for this piece.
    pub fn fen_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.letter(),
        }
    }

    /// Two-character asset code: color letter then uppercase kind letter (`"wK"`, `"bN"`).
    pub fn short_code(self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.color.letter());
        s.push(self.kind.letter().to_ascii_uppercase());
        s
    }

    /// All twelve pieces, white first.
    pub fn all() -> impl Iterator<Item = Piece> {
        PieceColor::ALL
            .into_iter()
            .flat_map(|color| PieceKind::ALL.into_iter().map(move |kind| Piece { kind, color }))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = match self.color {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        };
        write!(f, "{color} {}", self.kind.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/piece.rs"]
mod tests;

use crate::foundation::error::{DiagramError, DiagramResult};
use crate::position::grid::{BOARD_CELLS, Cell};

/// Algebraic square label such as `e4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareRef {
    /// File index, `0` = a ... `7` = h.
    pub file: u8,
    /// Rank number in `1..=8`.
    pub rank: u8,
}

impl SquareRef {
    /// Parse a two-character label: a lowercase file letter then a rank digit.
    pub fn parse(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        if !('a'..='h').contains(&f) || !('1'..='8').contains(&r) {
            return None;
        }
        Some(Self {
            file: f as u8 - b'a',
            rank: r as u8 - b'0',
        })
    }

    /// Grid cell this square occupies on a board drawn in the given orientation.
    ///
    /// Unflipped boards put rank 8 on row 0 and file a on column 0; flipped boards are the 180°
    /// rotation of that, matching [`crate::Position::flip`].
    pub fn to_cell(self, flipped: bool) -> Cell {
        let cell = Cell {
            row: BOARD_CELLS - usize::from(self.rank),
            col: usize::from(self.file),
        };
        if flipped { cell.rotated() } else { cell }
    }

    /// File letter, `'a'..='h'`.
    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }
}

impl std::fmt::Display for SquareRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

/// Parse a compact highlight list such as `"e2e4"` into square references.
///
/// The string is read two characters at a time. An empty string yields no squares.
pub fn parse_square_list(list: &str) -> DiagramResult<Vec<SquareRef>> {
    let chars: Vec<char> = list.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(DiagramError::InvalidSquareList {
            value: list.to_string(),
            reason: format!("odd length {}", chars.len()),
        });
    }

    chars
        .chunks_exact(2)
        .map(|pair| {
            let label: String = pair.iter().collect();
            SquareRef::parse(&label).ok_or_else(|| DiagramError::InvalidSquareList {
                value: list.to_string(),
                reason: format!("'{label}' is not a square (a-h then 1-8)"),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/position/square.rs"]
mod tests;

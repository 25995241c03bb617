use crate::foundation::error::{DiagramError, DiagramResult};
use crate::position::piece::Piece;

/// Board side length in cells.
pub const BOARD_CELLS: usize = 8;

/// Grid coordinate. Row 0 is the top rank of the rendered board, column 0 the left file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index in `0..8`.
    pub row: usize,
    /// Column index in `0..8`.
    pub col: usize,
}

impl Cell {
    /// Construct a validated cell.
    pub fn new(row: usize, col: usize) -> DiagramResult<Self> {
        if row >= BOARD_CELLS || col >= BOARD_CELLS {
            return Err(DiagramError::InvalidPosition {
                row,
                col,
                reason: "row and column must be in 0..8".to_string(),
            });
        }
        Ok(Self { row, col })
    }

    /// The cell this one maps to under a 180° rotation.
    pub fn rotated(self) -> Self {
        Self {
            row: BOARD_CELLS - 1 - self.row,
            col: BOARD_CELLS - 1 - self.col,
        }
    }
}

/// 8×8 placement grid of optional pieces.
///
/// Built from FEN (row 0 = rank 8, column 0 = file a), optionally flipped once for Black's
/// perspective, then read by the board compositor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    cells: [[Option<Piece>; BOARD_CELLS]; BOARD_CELLS],
}

impl Position {
    /// An empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Piece at `(row, col)`, if any.
    pub fn get(&self, row: usize, col: usize) -> DiagramResult<Option<Piece>> {
        let cell = Cell::new(row, col)?;
        Ok(self.cells[cell.row][cell.col])
    }

    /// Place (or clear, with `None`) a piece at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, piece: Option<Piece>) -> DiagramResult<()> {
        let cell = Cell::new(row, col)?;
        self.cells[cell.row][cell.col] = piece;
        Ok(())
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, p)| p.map(|p| (Cell { row, col }, p)))
        })
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Rotate the board 180° in place.
    ///
    /// The occupied cells are snapshotted first, so no piece is moved twice.
    pub fn flip(&mut self) {
        let occupied: Vec<(Cell, Piece)> = self.pieces().collect();
        self.cells = Default::default();
        for (cell, piece) in occupied {
            let to = cell.rotated();
            self.cells[to.row][to.col] = Some(piece);
        }
    }

    /// Rotated copy of this position.
    pub fn flipped(&self) -> Self {
        let mut out = self.clone();
        out.flip();
        out
    }

    /// FEN placement field for this grid (top row first).
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, line) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut gap = 0u8;
            for cell in line {
                match cell {
                    Some(p) => {
                        if gap > 0 {
                            out.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push(char::from(b'0' + gap));
            }
        }
        out
    }

    pub(crate) fn place(&mut self, cell: Cell, piece: Piece) {
        self.cells[cell.row][cell.col] = Some(piece);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/grid.rs"]
mod tests;

use crate::foundation::error::{DiagramError, DiagramResult};
use crate::position::grid::{BOARD_CELLS, Cell, Position};
use crate::position::piece::Piece;

/// Placement field of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Reduce a FEN string to a clean placement field.
///
/// Everything after the first space (side to move, castling, clocks) is dropped, then every
/// character outside `[rbnkqpRBNKQP1-8/]` is removed.
pub fn sanitize(fen: &str) -> String {
    let placement = fen.trim_start().split(' ').next().unwrap_or("");
    placement
        .chars()
        .filter(|&c| is_placement_char(c))
        .collect()
}

fn is_placement_char(c: char) -> bool {
    matches!(
        c,
        'r' | 'b' | 'n' | 'k' | 'q' | 'p' | 'R' | 'B' | 'N' | 'K' | 'Q' | 'P' | '1'..='8' | '/'
    )
}

/// Sanitize `fen` and parse its placement field.
pub fn parse(fen: &str) -> DiagramResult<Position> {
    parse_placement(&sanitize(fen))
}

/// Parse a placement field as-is (no sanitizing).
///
/// Rows are read top to bottom: the first row is rank 8 and lands at grid row 0.
pub fn parse_placement(placement: &str) -> DiagramResult<Position> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != BOARD_CELLS {
        return Err(DiagramError::MalformedFen {
            fen: placement.to_string(),
            reason: format!("expected 8 rows, found {}", rows.len()),
        });
    }

    let mut position = Position::empty();
    for (row, line) in rows.iter().enumerate() {
        let mut col = 0usize;
        for c in line.chars() {
            if let Some(d) = c.to_digit(10) {
                if !(1..=8).contains(&d) {
                    return Err(DiagramError::MalformedFen {
                        fen: placement.to_string(),
                        reason: format!("empty-run digit '{c}' must be 1-8"),
                    });
                }
                col += d as usize;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                return Err(DiagramError::MalformedFen {
                    fen: placement.to_string(),
                    reason: format!("unexpected character '{c}'"),
                });
            }

            let piece = Piece::from_fen_char(c)?;
            if col >= BOARD_CELLS {
                return Err(row_width_error(row, col + 1));
            }
            position.place(Cell { row, col }, piece);
            col += 1;
        }

        if col != BOARD_CELLS {
            return Err(row_width_error(row, col));
        }
    }

    Ok(position)
}

fn row_width_error(row: usize, width: usize) -> DiagramError {
    DiagramError::InvalidPosition {
        row,
        col: width,
        reason: format!("row expands to {width} columns, expected 8"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/fen.rs"]
mod tests;

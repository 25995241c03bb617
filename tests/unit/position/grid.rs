use super::*;
use crate::position::piece::{PieceColor, PieceKind};

fn white(kind: PieceKind) -> Piece {
    Piece::new(kind, PieceColor::White)
}

fn black(kind: PieceKind) -> Piece {
    Piece::new(kind, PieceColor::Black)
}

#[test]
fn get_and_set_are_range_checked() {
    let mut p = Position::empty();
    p.set(7, 4, Some(white(PieceKind::King))).unwrap();
    assert_eq!(p.get(7, 4).unwrap(), Some(white(PieceKind::King)));
    assert_eq!(p.get(0, 0).unwrap(), None);

    let err = p.get(8, 0).unwrap_err();
    assert!(matches!(err, DiagramError::InvalidPosition { row: 8, col: 0, .. }));
    assert!(p.set(0, 8, None).is_err());
}

#[test]
fn flip_rotates_every_piece() {
    let mut p = Position::empty();
    p.set(0, 0, Some(black(PieceKind::Rook))).unwrap();
    p.set(6, 3, Some(white(PieceKind::Pawn))).unwrap();

    p.flip();

    assert_eq!(p.get(7, 7).unwrap(), Some(black(PieceKind::Rook)));
    assert_eq!(p.get(1, 4).unwrap(), Some(white(PieceKind::Pawn)));
    assert_eq!(p.get(0, 0).unwrap(), None);
    assert_eq!(p.get(6, 3).unwrap(), None);
    assert_eq!(p.piece_count(), 2);
}

#[test]
fn flip_does_not_double_move_mirrored_pairs() {
    // (0,0) and (7,7) map onto each other; an in-place swap loop would lose one of them.
    let mut p = Position::empty();
    p.set(0, 0, Some(black(PieceKind::Rook))).unwrap();
    p.set(7, 7, Some(white(PieceKind::Queen))).unwrap();

    p.flip();

    assert_eq!(p.get(0, 0).unwrap(), Some(white(PieceKind::Queen)));
    assert_eq!(p.get(7, 7).unwrap(), Some(black(PieceKind::Rook)));
}

#[test]
fn double_flip_is_identity() {
    let mut p = Position::empty();
    p.set(2, 5, Some(black(PieceKind::Knight))).unwrap();
    p.set(4, 1, Some(white(PieceKind::Bishop))).unwrap();
    assert_eq!(p.flipped().flipped(), p);
}

#[test]
fn pieces_iterate_row_major() {
    let mut p = Position::empty();
    p.set(3, 3, Some(white(PieceKind::Queen))).unwrap();
    p.set(0, 6, Some(black(PieceKind::King))).unwrap();
    let cells: Vec<Cell> = p.pieces().map(|(c, _)| c).collect();
    assert_eq!(cells, vec![Cell { row: 0, col: 6 }, Cell { row: 3, col: 3 }]);
}

#[test]
fn placement_writer_compresses_gaps() {
    let mut p = Position::empty();
    assert_eq!(p.to_placement(), "8/8/8/8/8/8/8/8");
    p.set(0, 4, Some(black(PieceKind::King))).unwrap();
    p.set(7, 0, Some(white(PieceKind::Rook))).unwrap();
    assert_eq!(p.to_placement(), "4k3/8/8/8/8/8/8/R7");
}

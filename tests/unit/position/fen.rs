use super::*;
use crate::position::piece::{PieceColor, PieceKind};

#[test]
fn sanitize_drops_trailing_fields() {
    assert_eq!(sanitize("8/8/8/8/8/8/8/8 w KQkq - 0 1"), "8/8/8/8/8/8/8/8");
    assert_eq!(sanitize("  4k3/8/8/8/8/8/8/4K3 b - -"), "4k3/8/8/8/8/8/8/4K3");
}

#[test]
fn sanitize_strips_foreign_characters() {
    assert_eq!(sanitize("rnbxqkbnr/9/0"), "rnbqkbnr//");
    assert_eq!(sanitize("8/8/8/8/8/8/8/8\n"), "8/8/8/8/8/8/8/8");
}

#[test]
fn empty_board_parses_to_no_pieces() {
    let p = parse("8/8/8/8/8/8/8/8 w KQkq - 0 1").unwrap();
    assert_eq!(p, Position::empty());
    assert_eq!(p.piece_count(), 0);
}

#[test]
fn start_position_corners_and_count() {
    let p = parse(START_PLACEMENT).unwrap();
    assert_eq!(
        p.get(0, 0).unwrap(),
        Some(Piece::new(PieceKind::Rook, PieceColor::Black))
    );
    assert_eq!(
        p.get(7, 7).unwrap(),
        Some(Piece::new(PieceKind::Rook, PieceColor::White))
    );
    assert_eq!(
        p.get(7, 4).unwrap(),
        Some(Piece::new(PieceKind::King, PieceColor::White))
    );
    assert_eq!(p.piece_count(), 32);
    assert_eq!(p.to_placement(), START_PLACEMENT);
}

#[test]
fn digits_expand_to_empty_runs() {
    let p = parse("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
    assert_eq!(p.piece_count(), 6);
    assert_eq!(p.get(0, 1).unwrap(), None);
    assert_eq!(
        p.get(0, 4).unwrap(),
        Some(Piece::new(PieceKind::King, PieceColor::Black))
    );
}

#[test]
fn row_with_nine_columns_is_invalid_position() {
    let err = parse("pppppppp1/8/8/8/8/8/8/8").unwrap_err();
    assert!(matches!(err, DiagramError::InvalidPosition { row: 0, col: 9, .. }));

    let err = parse("8/8/8/8/8/8/8/ppppppppp").unwrap_err();
    assert!(matches!(err, DiagramError::InvalidPosition { row: 7, .. }));
}

#[test]
fn row_with_seven_columns_is_invalid_position() {
    let err = parse("8/8/ppppppp/8/8/8/8/8").unwrap_err();
    assert!(matches!(err, DiagramError::InvalidPosition { row: 2, col: 7, .. }));
}

#[test]
fn wrong_row_count_is_malformed() {
    assert!(matches!(
        parse("8/8/8").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
    assert!(matches!(
        parse("pppppppp1").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
    assert!(matches!(
        parse("").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
}

#[test]
fn strict_parser_rejects_bad_characters() {
    assert!(matches!(
        parse_placement("8/8/8/8/8/8/8/7x").unwrap_err(),
        DiagramError::UnknownPiece { letter: 'x' }
    ));
    assert!(matches!(
        parse_placement("8/8/8/8/8/8/8/9").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
    assert!(matches!(
        parse_placement("8/8/8/8/8/8/8/0pppppppp").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
    assert!(matches!(
        parse_placement("8/8/8/8/8/8/8/7-").unwrap_err(),
        DiagramError::MalformedFen { .. }
    ));
}

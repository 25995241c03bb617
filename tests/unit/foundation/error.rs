use super::*;

#[test]
fn display_carries_offending_values() {
    let err = DiagramError::UnknownPiece { letter: 'x' };
    assert!(err.to_string().contains("'x'"));

    let err = DiagramError::SizeOutOfRange {
        px: 19,
        min: 20,
        max: 200,
    };
    assert_eq!(err.to_string(), "size 19px out of range (20px..=200px)");

    let err = DiagramError::InvalidColor {
        field: "lightCellColor",
        value: "zzz".to_string(),
    };
    assert!(err.to_string().contains("lightCellColor"));
    assert!(err.to_string().contains("zzz"));
}

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DiagramError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DiagramError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        DiagramError::asset("pieces/alpha/wK", "missing")
            .to_string()
            .contains("asset unavailable 'pieces/alpha/wK': missing")
    );
}

#[test]
fn kinds_are_distinct_tags() {
    assert_eq!(DiagramError::BoardNotConfigured.kind(), "board_not_configured");
    assert_eq!(DiagramError::UnknownTheme { index: 9 }.kind(), "unknown_theme");
    assert_eq!(
        DiagramError::InvalidSquareList {
            value: "a1b".to_string(),
            reason: "odd".to_string(),
        }
        .kind(),
        "invalid_square_list"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DiagramError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), "other");
}

pub(crate) mod fen;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod square;

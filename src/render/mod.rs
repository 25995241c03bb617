pub(crate) mod blend;
pub(crate) mod board;
pub(crate) mod diagram;
pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod text;

pub(crate) mod decode;
pub(crate) mod resolver;
pub(crate) mod source;
pub(crate) mod store;

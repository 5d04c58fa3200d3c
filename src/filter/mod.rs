pub(crate) mod gaussian;
pub(crate) mod spatial;

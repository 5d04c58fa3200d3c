pub(crate) mod mode;
pub mod ops;

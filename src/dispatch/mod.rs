pub(crate) mod engine;
pub(crate) mod options;
pub(crate) mod region;

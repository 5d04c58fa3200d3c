pub(crate) mod error;
pub(crate) mod math;
pub(crate) mod settings;
pub(crate) mod surface;

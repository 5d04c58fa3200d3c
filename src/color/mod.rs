pub(crate) mod hsv;
pub(crate) mod sample;

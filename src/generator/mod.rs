pub mod curve;
pub mod noise;

pub use curve::{CurveGenerator, extended_time_axis, heart_base, liver_base};
pub use noise::{apply_jitter, background};

//! JSON configuration for the command-line tools.

pub mod calibration;
pub mod overlay;

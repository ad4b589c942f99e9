//! Parameter types configuring the track-line generator.
//!
//! Defaults: 100 m lookahead, RANSAC with a 3 px band over 50 trials and a
//! 2 px crossing threshold.

use crate::ransac::RansacOptions;
use crate::steering::SteeringOptions;
use serde::{Deserialize, Serialize};

/// Generator-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLineParams {
    /// Farthest longitudinal distance of the predicted path (metres).
    pub lookahead_m: f64,
    /// Column gap below which the edges are considered crossed.
    pub cross_threshold_px: u32,
    pub steering: SteeringOptions,
    /// Robust fit used for the straight corridor edges.
    pub ransac: RansacOptions,
}

impl Default for TrackLineParams {
    fn default() -> Self {
        Self {
            lookahead_m: 100.0,
            cross_threshold_px: 2,
            steering: SteeringOptions::default(),
            ransac: RansacOptions::default(),
        }
    }
}

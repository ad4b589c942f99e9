//! Steering angle rectification.
//!
//! Raw steering readings carry a sensor offset and jitter around zero. The
//! rectifier removes the configured bias, classifies the turn direction and
//! snaps small magnitudes to straight driving.

use serde::{Deserialize, Serialize};

/// Turn direction derived from the rectified steering angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Straight,
}

impl Direction {
    /// +1 for left, -1 for right, 0 when driving straight.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => 1.0,
            Direction::Right => -1.0,
            Direction::Straight => 0.0,
        }
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        self == Direction::Straight
    }
}

/// Knobs applied to the raw steering angle before classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringOptions {
    /// Additive offset applied to the raw reading (radians).
    pub bias: f64,
    /// Magnitudes at or below this value are treated as straight (radians).
    pub straight_threshold: f64,
}

impl Default for SteeringOptions {
    fn default() -> Self {
        Self {
            bias: 0.0,
            straight_threshold: 0.01,
        }
    }
}

/// Rectified steering: a direction plus a non-negative magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SteeringState {
    pub raw: f64,
    pub direction: Direction,
    pub magnitude: f64,
}

impl SteeringState {
    pub fn rectify(raw: f64, opts: &SteeringOptions) -> Self {
        let biased = raw + opts.bias;
        let direction = if biased < 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        let magnitude = biased.abs();
        if magnitude.is_nan() || magnitude <= opts.straight_threshold {
            return Self {
                raw,
                direction: Direction::Straight,
                magnitude: 0.0,
            };
        }
        Self {
            raw,
            direction,
            magnitude,
        }
    }

    pub fn straight() -> Self {
        Self {
            raw: 0.0,
            direction: Direction::Straight,
            magnitude: 0.0,
        }
    }
}

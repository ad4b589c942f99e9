//! Predicted wheel tracks in vehicle-body coordinates.
//!
//! Straight driving yields a corridor of constant width. When turning, each
//! wheel track follows a circle around the instantaneous turn centre on the
//! rear-axle line; samples beyond the reach of that circle are dropped.

use crate::steering::SteeringState;
use crate::types::{PathPoint, Side, VehicleGeometry};
use log::debug;
use serde::Serialize;

/// Ordered samples of one wheel track, nearest first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Path {
    pub points: Vec<PathPoint>,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Left and right wheel tracks for one steering state.
#[derive(Clone, Debug, Serialize)]
pub struct PathPair {
    pub left: Path,
    pub right: Path,
}

impl PathPair {
    /// Valid sample counts as `(left, right)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.left.len(), self.right.len())
    }
}

/// Wheel-track generator over `[head_to_rear_axle, lookahead]`.
#[derive(Clone, Debug)]
pub struct VehiclePathModel<'a> {
    geometry: &'a VehicleGeometry,
    lookahead: f64,
}

impl<'a> VehiclePathModel<'a> {
    pub fn new(geometry: &'a VehicleGeometry, lookahead: f64) -> Self {
        Self {
            geometry,
            lookahead,
        }
    }

    /// Evenly spaced longitudinal samples, both endpoints included.
    pub fn samples(&self) -> Vec<f64> {
        let start = self.geometry.head_to_rear_axle();
        let end = self.lookahead;
        let count = (end.trunc() as i64 - start.trunc() as i64).max(0) as usize;
        match count {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (end - start) / (n - 1) as f64;
                (0..n).map(|i| start + step * i as f64).collect()
            }
        }
    }

    pub fn generate(&self, steering: &SteeringState) -> PathPair {
        let samples = self.samples();
        if steering.direction.is_straight() {
            return self.straight(&samples);
        }
        let dir = steering.direction.sign();
        let turn_radius = self.geometry.wheelbase / steering.magnitude.tan();
        let half_tread = self.geometry.tread / 2.0;
        let reach = self.geometry.head_to_rear_axle();
        let left_r2 = (turn_radius - dir * half_tread).powi(2) + reach * reach;
        let right_r2 = (turn_radius + dir * half_tread).powi(2) + reach * reach;
        let left = arc_track(&samples, left_r2, turn_radius, dir, Side::Left);
        let right = arc_track(&samples, right_r2, turn_radius, dir, Side::Right);
        if left.len() < samples.len() || right.len() < samples.len() {
            debug!(
                "path: arc of radius {:.3} truncated to left={} right={} of {} samples",
                turn_radius,
                left.len(),
                right.len(),
                samples.len()
            );
        }
        PathPair { left, right }
    }

    fn straight(&self, samples: &[f64]) -> PathPair {
        let half = self.geometry.tread / 2.0;
        let track = |lateral: f64, side: Side| Path {
            points: samples
                .iter()
                .map(|&longitudinal| PathPoint {
                    longitudinal,
                    lateral,
                    side,
                })
                .collect(),
        };
        PathPair {
            left: track(half, Side::Left),
            right: track(-half, Side::Right),
        }
    }
}

/// Lateral offset on the circle of squared radius `r2` at distance `y`, or
/// `None` once `y` lies beyond the circle.
#[inline]
pub fn arc_lateral(r2: f64, y: f64, turn_radius: f64, dir: f64) -> Option<f64> {
    let rem = r2 - y * y;
    if rem < 0.0 {
        return None;
    }
    Some(-dir * rem.sqrt() + dir * turn_radius)
}

fn arc_track(samples: &[f64], r2: f64, turn_radius: f64, dir: f64, side: Side) -> Path {
    let points = samples
        .iter()
        .map_while(|&y| {
            arc_lateral(r2, y, turn_radius, dir).map(|lateral| PathPoint {
                longitudinal: y,
                lateral,
                side,
            })
        })
        .collect();
    Path { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steering::{Direction, SteeringOptions};

    fn geometry() -> VehicleGeometry {
        VehicleGeometry {
            tread: 1.88,
            wheelbase: 3.02,
            front_overhang: 0.919,
            head_height: 0.676,
        }
    }

    #[test]
    fn samples_span_lookahead_with_integer_count() {
        let g = geometry();
        let model = VehiclePathModel::new(&g, 100.0);
        let s = model.samples();
        assert_eq!(s.len(), 97);
        assert!((s[0] - 3.939).abs() < 1e-12);
        assert!((s[96] - 100.0).abs() < 1e-9);
        assert!(s.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn short_lookahead_yields_empty_or_single_sample() {
        let g = geometry();
        assert!(VehiclePathModel::new(&g, 3.5).samples().is_empty());
        assert_eq!(VehiclePathModel::new(&g, 4.2).samples(), vec![3.939]);
    }

    #[test]
    fn straight_corridor_is_symmetric() {
        let g = geometry();
        let pair = VehiclePathModel::new(&g, 100.0).generate(&SteeringState::straight());
        assert_eq!(pair.counts(), (97, 97));
        assert!(pair
            .left
            .points
            .iter()
            .all(|p| (p.lateral - 0.94).abs() < 1e-12 && p.side == Side::Left));
        assert!(pair
            .right
            .points
            .iter()
            .all(|p| (p.lateral + 0.94).abs() < 1e-12 && p.side == Side::Right));
    }

    #[test]
    fn left_turn_truncates_each_side_once() {
        let g = geometry();
        let model = VehiclePathModel::new(&g, 100.0);
        let steering = SteeringState::rectify(0.3, &SteeringOptions::default());
        assert_eq!(steering.direction, Direction::Left);
        let pair = model.generate(&steering);
        // Inner (left) track leaves the reachable arc before the outer one.
        assert_eq!(pair.counts(), (6, 8));

        let samples = model.samples();
        let turn_radius = g.wheelbase / steering.magnitude.tan();
        let reach = g.head_to_rear_axle();
        let r2 = (turn_radius - 0.94).powi(2) + reach * reach;
        let cut = pair.left.len();
        assert!(samples[..cut]
            .iter()
            .all(|&y| arc_lateral(r2, y, turn_radius, 1.0).is_some()));
        assert!(samples[cut..]
            .iter()
            .all(|&y| arc_lateral(r2, y, turn_radius, 1.0).is_none()));
    }

    #[test]
    fn turn_starts_at_half_tread_and_bends_towards_turn() {
        let g = geometry();
        let model = VehiclePathModel::new(&g, 100.0);
        let opts = SteeringOptions::default();

        let left = model.generate(&SteeringState::rectify(0.3, &opts));
        assert!((left.left.points[0].lateral - 0.94).abs() < 1e-9);
        assert!((left.right.points[0].lateral + 0.94).abs() < 1e-9);
        assert!(left.left.points.windows(2).all(|w| w[1].lateral > w[0].lateral));

        let right = model.generate(&SteeringState::rectify(-0.3, &opts));
        assert_eq!(right.counts(), (8, 6));
        assert!(right
            .right
            .points
            .windows(2)
            .all(|w| w[1].lateral < w[0].lateral));
    }
}

//! Track-line generator: steering angle in, per-row corridor boundaries out.
//!
//! Pipeline per call:
//! 1. rectify the steering angle into a direction and magnitude;
//! 2. sample both wheel tracks in vehicle coordinates;
//! 3. project them through the calibration;
//! 4. straight: RANSAC-fit both edges, intersect them at the vanishing point
//!    and rasterize the two segments; turning: rasterize both polylines;
//! 5. sweep the rows for crossings and report inconsistent rows.
//!
//! The generator holds no per-call state, so repeated calls with the same
//! angle return identical boundaries.

pub mod params;

pub use self::params::TrackLineParams;

use crate::boundary::{intersect, BoundaryArray, BoundaryPair};
use crate::calibration::{CalibrationTransform, PerspectiveProjector, ProjectedPath};
use crate::error::TrackLineError;
use crate::path::{PathPair, VehiclePathModel};
use crate::raster::{BresenhamRasterizer, Rasterizer};
use crate::ransac::RobustLineFitter;
use crate::steering::SteeringState;
use crate::types::{ConsistencyViolation, CornerPoints, VehicleGeometry};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Projected left and right wheel tracks.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectedPair {
    pub left: ProjectedPath,
    pub right: ProjectedPath,
}

/// Result of one `add_track_line` call.
#[derive(Clone, Debug, Serialize)]
pub struct TrackLine {
    pub steering: SteeringState,
    /// Nearest image row at which boundaries are kept.
    pub line_bottom_row: usize,
    pub boundaries: BoundaryPair,
    /// Corridor corners; only produced when driving straight.
    pub corners: Option<CornerPoints>,
    /// Row where the edges met, if they did.
    pub crossing_row: Option<usize>,
    /// Valid wheel-track samples as `(left, right)`.
    pub point_counts: (usize, usize),
    pub violations: Vec<ConsistencyViolation>,
    pub latency_ms: f64,
}

pub struct TrackLineGenerator<R = BresenhamRasterizer> {
    geometry: VehicleGeometry,
    calibration: CalibrationTransform,
    params: TrackLineParams,
    rasterizer: R,
}

impl TrackLineGenerator<BresenhamRasterizer> {
    pub fn new(
        geometry: VehicleGeometry,
        calibration: CalibrationTransform,
        params: TrackLineParams,
    ) -> Result<Self, TrackLineError> {
        Self::with_rasterizer(geometry, calibration, params, BresenhamRasterizer)
    }
}

impl<R: Rasterizer> TrackLineGenerator<R> {
    pub fn with_rasterizer(
        geometry: VehicleGeometry,
        calibration: CalibrationTransform,
        params: TrackLineParams,
        rasterizer: R,
    ) -> Result<Self, TrackLineError> {
        if let Some(field) = geometry.invalid_field() {
            return Err(TrackLineError::InvalidGeometry(field));
        }
        if calibration.width < 3 || calibration.height < 2 {
            return Err(TrackLineError::InvalidResolution {
                width: calibration.width,
                height: calibration.height,
            });
        }
        Ok(Self {
            geometry,
            calibration,
            params,
            rasterizer,
        })
    }

    pub fn geometry(&self) -> &VehicleGeometry {
        &self.geometry
    }

    pub fn calibration(&self) -> &CalibrationTransform {
        &self.calibration
    }

    pub fn params(&self) -> &TrackLineParams {
        &self.params
    }

    pub fn steering(&self, steer_angle: f64) -> SteeringState {
        SteeringState::rectify(steer_angle, &self.params.steering)
    }

    pub fn path_model(&self, steering: &SteeringState) -> PathPair {
        VehiclePathModel::new(&self.geometry, self.params.lookahead_m).generate(steering)
    }

    pub fn project(&self, paths: &PathPair) -> Result<ProjectedPair, TrackLineError> {
        let projector = self.projector();
        Ok(ProjectedPair {
            left: projector.project_path(&paths.left)?,
            right: projector.project_path(&paths.right)?,
        })
    }

    /// Predicts the corridor for `steer_angle` (radians, positive to the left).
    ///
    /// Straight results run through the same crossing sweep as turns, so rows
    /// at and beyond the vanishing point are cleared in the boundary arrays.
    /// `corners` are returned as fitted, unclipped.
    pub fn add_track_line(&self, steer_angle: f64) -> Result<TrackLine, TrackLineError> {
        let t0 = Instant::now();
        let steering = self.steering(steer_angle);
        let paths = self.path_model(&steering);
        let projected = self.project(&paths)?;
        let bottom = self.bottom_row(&projected)?;
        let (width, height) = (self.calibration.width, self.calibration.height);

        let (mut boundaries, corners) = if steering.direction.is_straight() {
            let corners = self.straight_corners(&projected, bottom)?;
            let left = self.rasterizer.rasterize_segment(
                corners.left_bottom,
                corners.vanishing_point,
                width,
                height,
            );
            let right = self.rasterizer.rasterize_segment(
                corners.vanishing_point,
                corners.right_bottom,
                width,
                height,
            );
            (BoundaryPair::new(left.into(), right.into()), Some(corners))
        } else {
            let left = self
                .rasterizer
                .rasterize_polyline(&projected.left.to_pixels(), width, height);
            let right = self
                .rasterizer
                .rasterize_polyline(&projected.right.to_pixels(), width, height);
            (
                BoundaryPair::new(BoundaryArray::from(left), BoundaryArray::from(right)),
                None,
            )
        };

        let crossing_row = boundaries.finalize(bottom, width, self.params.cross_threshold_px);
        let violations = boundaries.check_consistency();
        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "track line: {:?} magnitude={:.4} bottom_row={} crossing={:?} rows={}",
            steering.direction,
            steering.magnitude,
            bottom,
            crossing_row,
            boundaries.left.present_rows()
        );
        Ok(TrackLine {
            steering,
            line_bottom_row: bottom,
            boundaries,
            corners,
            crossing_row,
            point_counts: paths.counts(),
            violations,
            latency_ms,
        })
    }

    /// The three corners of the straight corridor, without rasterizing.
    /// Returns `None` when `steer_angle` does not rectify to straight.
    pub fn corner_points(&self, steer_angle: f64) -> Result<Option<CornerPoints>, TrackLineError> {
        let steering = self.steering(steer_angle);
        if !steering.direction.is_straight() {
            return Ok(None);
        }
        let projected = self.project(&self.path_model(&steering))?;
        let bottom = self.bottom_row(&projected)?;
        self.straight_corners(&projected, bottom).map(Some)
    }

    fn projector(&self) -> PerspectiveProjector<'_> {
        PerspectiveProjector::new(&self.calibration, self.geometry.head_height)
    }

    fn bottom_row(&self, projected: &ProjectedPair) -> Result<usize, TrackLineError> {
        if projected.right.is_empty() {
            return Err(TrackLineError::EmptyPath);
        }
        self.projector()
            .line_bottom_row(&projected.left)
            .ok_or(TrackLineError::EmptyPath)
    }

    fn straight_corners(
        &self,
        projected: &ProjectedPair,
        bottom: usize,
    ) -> Result<CornerPoints, TrackLineError> {
        let fitter = RobustLineFitter::new(self.params.ransac.clone());
        let left = fitter.fit(&projected.left.pixels)?;
        let right = fitter.fit(&projected.right.pixels)?;
        let vp = intersect(&left, &right)?;
        let row = bottom as f64;
        Ok(CornerPoints {
            left_bottom: [left.col_at(row) as i32, bottom as i32],
            vanishing_point: [vp[0] as i32, vp[1] as i32],
            right_bottom: [right.col_at(row) as i32, bottom as i32],
        })
    }
}

#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod boundary;
pub mod calibration;
pub mod config;
pub mod error;
pub mod generator;
pub mod image;
pub mod radar;
pub mod steering;
pub mod types;

// Building blocks of the pipeline, public for tools and tests.
pub mod path;
pub mod ransac;
pub mod raster;

// --- High-level re-exports -------------------------------------------------

// Main entry points: generator + results.
pub use crate::generator::{TrackLine, TrackLineGenerator, TrackLineParams};
pub use crate::error::TrackLineError;

// Inputs and outputs that most callers touch.
pub use crate::boundary::{BoundaryArray, BoundaryPair, NO_BOUNDARY};
pub use crate::calibration::CalibrationTransform;
pub use crate::steering::{Direction, SteeringOptions, SteeringState};
pub use crate::types::{CornerPoints, VehicleGeometry};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use nalgebra::{Matrix3, Vector3};
/// use track_line::prelude::*;
///
/// # fn main() -> Result<(), TrackLineError> {
/// let rotation = Matrix3::new(0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0);
/// let translation = -(rotation * Vector3::new(0.0, 0.0, 1.2));
/// let calibration = CalibrationTransform::from_parts(
///     [1000.0, 1000.0, 960.0, 540.0],
///     rotation,
///     translation,
///     1920,
///     1080,
/// );
/// let geometry = VehicleGeometry {
///     tread: 1.88,
///     wheelbase: 3.02,
///     front_overhang: 0.919,
///     head_height: 0.676,
/// };
///
/// let generator = TrackLineGenerator::new(geometry, calibration, TrackLineParams::default())?;
/// let line = generator.add_track_line(0.0)?;
/// println!("corners={:?} latency_ms={:.3}", line.corners, line.latency_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        CalibrationTransform, CornerPoints, TrackLine, TrackLineError, TrackLineGenerator,
        TrackLineParams, VehicleGeometry,
    };
}

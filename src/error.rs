use crate::types::Side;
use thiserror::Error;

/// Contract violations surfaced by the track-line pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackLineError {
    #[error("vehicle geometry field `{0}` must be a positive length")]
    InvalidGeometry(&'static str),
    #[error("image resolution {width}x{height} is too small")]
    InvalidResolution { width: u32, height: u32 },
    #[error("{side:?} path sample {index} projects onto the camera plane (w={w})")]
    DegenerateProjection { side: Side, index: usize, w: f64 },
    #[error("line fit needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("least-squares refit is degenerate over {inliers} inliers")]
    DegenerateFit { inliers: usize },
    #[error("left and right track lines are parallel (slope {slope})")]
    ParallelLines { slope: f64 },
    #[error("path model produced no samples over the lookahead range")]
    EmptyPath,
}

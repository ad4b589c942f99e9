//! Per-row corridor boundaries and their finalisation.
//!
//! Boundaries are swept from the row nearest the camera towards the horizon.
//! Once the left and right edges meet, the sweep latches into the crossed
//! state and every farther row is cleared.

use crate::error::TrackLineError;
use crate::ransac::LineFit;
use crate::types::ConsistencyViolation;
use log::{debug, warn};
use serde::Serialize;

/// Column value marking a row without boundary.
pub const NO_BOUNDARY: u32 = 0;

/// Minimum column gap the consistency check expects between the edges.
pub const MIN_SEPARATION: u32 = 2;

/// One column per image row; [`NO_BOUNDARY`] where the edge is absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoundaryArray(Vec<u32>);

impl BoundaryArray {
    pub fn empty(height: usize) -> Self {
        Self(vec![NO_BOUNDARY; height])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<u32> {
        self.0.get(row).copied().filter(|&c| c != NO_BOUNDARY)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of rows carrying a boundary.
    pub fn present_rows(&self) -> usize {
        self.0.iter().filter(|&&c| c != NO_BOUNDARY).count()
    }
}

impl From<Vec<u32>> for BoundaryArray {
    fn from(v: Vec<u32>) -> Self {
        Self(v)
    }
}

/// Sweep state: scanning until the edges meet, then latched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SweepState {
    Scanning,
    Crossed { row: usize },
}

/// Left and right boundaries of the predicted corridor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoundaryPair {
    pub left: BoundaryArray,
    pub right: BoundaryArray,
}

impl BoundaryPair {
    pub fn new(left: BoundaryArray, right: BoundaryArray) -> Self {
        debug_assert_eq!(left.len(), right.len());
        Self { left, right }
    }

    pub fn height(&self) -> usize {
        self.left.len()
    }

    /// Clears rows below `bottom_row` and everything beyond the first row where
    /// the edges come within `cross_threshold` columns. A row missing only one
    /// edge is completed with the frame border (`1` or `width - 2`).
    ///
    /// Returns the crossing row, if the edges met.
    pub fn finalize(&mut self, bottom_row: usize, width: u32, cross_threshold: u32) -> Option<usize> {
        let left = &mut self.left.0;
        let right = &mut self.right.0;
        let height = left.len();
        if height < 2 {
            left.fill(NO_BOUNDARY);
            right.fill(NO_BOUNDARY);
            return None;
        }
        // The sweep starts one row above the frame's last row.
        left[height - 1] = NO_BOUNDARY;
        right[height - 1] = NO_BOUNDARY;

        let mut state = SweepState::Scanning;
        for row in (0..height - 1).rev() {
            if row > bottom_row || matches!(state, SweepState::Crossed { .. }) {
                left[row] = NO_BOUNDARY;
                right[row] = NO_BOUNDARY;
                continue;
            }
            match (left[row] == NO_BOUNDARY, right[row] == NO_BOUNDARY) {
                (true, false) => left[row] = 1,
                (false, true) => right[row] = width.saturating_sub(2),
                _ => {}
            }
            let (l, r) = (left[row], right[row]);
            if l == NO_BOUNDARY || r <= l || r - l < cross_threshold {
                debug!("boundary: edges cross at row {row} (left={l}, right={r})");
                state = SweepState::Crossed { row };
                left[row] = NO_BOUNDARY;
                right[row] = NO_BOUNDARY;
            }
        }
        match state {
            SweepState::Crossed { row } => Some(row),
            SweepState::Scanning => None,
        }
    }

    /// Rows where a present left edge is not at least [`MIN_SEPARATION`]
    /// columns left of the right edge. Violations are logged, not enforced.
    pub fn check_consistency(&self) -> Vec<ConsistencyViolation> {
        let mut out = Vec::new();
        for (row, (&l, &r)) in self
            .left
            .0
            .iter()
            .zip(self.right.0.iter())
            .enumerate()
        {
            if l == NO_BOUNDARY {
                continue;
            }
            if l > r || r - l < MIN_SEPARATION {
                warn!("boundary: inconsistent row {row} (left={l}, right={r})");
                out.push(ConsistencyViolation {
                    row,
                    left: l,
                    right: r,
                });
            }
        }
        out
    }
}

/// Intersection `[col, row]` of two fitted lines `col = k * row + b`.
pub fn intersect(left: &LineFit, right: &LineFit) -> Result<[f64; 2], TrackLineError> {
    let dk = left.slope - right.slope;
    if dk.abs() <= f64::EPSILON * left.slope.abs().max(right.slope.abs()).max(1.0) {
        return Err(TrackLineError::ParallelLines { slope: left.slope });
    }
    let row = (right.intercept - left.intercept) / dk;
    Ok([left.slope * row + left.intercept, row])
}

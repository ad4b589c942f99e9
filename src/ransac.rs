//! Random-sample-consensus line fitting.
//!
//! Points are `[col, row]` pixels and the fitted model is
//! `col = slope * row + intercept`, which stays well conditioned for the
//! near-vertical track edges seen by a forward camera. RANSAC only selects the
//! inlier set; the returned parameters come from a least-squares refit over it.

use crate::error::TrackLineError;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// RANSAC knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacOptions {
    /// Maximum perpendicular distance (pixels) for a point to count as inlier.
    pub sigma: f64,
    /// Upper bound on sampled candidates.
    pub max_iterations: usize,
    /// Stop early once the inlier share exceeds this ratio.
    pub inlier_ratio: f64,
    /// Seed of the sampling RNG; fixed so repeated fits agree.
    pub seed: u64,
}

impl Default for RansacOptions {
    fn default() -> Self {
        Self {
            sigma: 3.0,
            max_iterations: 50,
            inlier_ratio: 0.8,
            seed: 0x7a3c_11e5,
        }
    }
}

/// Candidate line in general form `a * row + b * col + c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCandidate {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineCandidate {
    /// Line through two `[col, row]` points. Points sharing a row give the
    /// line `row = const`, which has no finite slope in this parametrisation.
    pub fn through(p: &[f64; 2], q: &[f64; 2]) -> Self {
        let (col1, row1) = (p[0], p[1]);
        let (col2, row2) = (q[0], q[1]);
        if row1 == row2 {
            return Self {
                a: 1.0,
                b: 0.0,
                c: -row1,
            };
        }
        let slope = (col2 - col1) / (row2 - row1);
        Self {
            a: slope,
            b: -1.0,
            c: col1 - slope * row1,
        }
    }

    #[inline]
    pub fn distance(&self, p: &[f64; 2]) -> f64 {
        (self.a * p[1] + self.b * p[0] + self.c).abs() / (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// Result of a robust fit.
#[derive(Clone, Debug, Serialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Indices of the best consensus set, ascending.
    pub inliers: Vec<usize>,
    pub iterations: usize,
}

impl LineFit {
    #[inline]
    pub fn col_at(&self, row: f64) -> f64 {
        self.slope * row + self.intercept
    }
}

/// Fits `col = slope * row + intercept` robust to outliers.
#[derive(Clone, Debug, Default)]
pub struct RobustLineFitter {
    pub options: RansacOptions,
}

impl RobustLineFitter {
    pub fn new(options: RansacOptions) -> Self {
        Self { options }
    }

    pub fn fit(&self, points: &[[f64; 2]]) -> Result<LineFit, TrackLineError> {
        let n = points.len();
        if n < 2 {
            return Err(TrackLineError::TooFewPoints(n));
        }
        let opts = &self.options;
        let mut rng = StdRng::seed_from_u64(opts.seed);
        let mut best: Vec<usize> = Vec::new();
        let mut iterations = 0usize;
        for _ in 0..opts.max_iterations.max(1) {
            iterations += 1;
            let pick = rand::seq::index::sample(&mut rng, n, 2);
            let candidate = LineCandidate::through(&points[pick.index(0)], &points[pick.index(1)]);
            let inliers: Vec<usize> = points
                .iter()
                .enumerate()
                .filter(|(_, p)| candidate.distance(p) < opts.sigma)
                .map(|(i, _)| i)
                .collect();
            if inliers.len() > best.len() {
                best = inliers;
            }
            if best.len() as f64 > opts.inlier_ratio * n as f64 {
                debug!(
                    "ransac: early exit after {} iterations with {}/{} inliers",
                    iterations,
                    best.len(),
                    n
                );
                break;
            }
        }
        let (slope, intercept) = least_squares(points, &best)?;
        Ok(LineFit {
            slope,
            intercept,
            inliers: best,
            iterations,
        })
    }
}

/// Ordinary least squares of `col` on `row` over the selected indices.
pub fn least_squares(points: &[[f64; 2]], indices: &[usize]) -> Result<(f64, f64), TrackLineError> {
    let degenerate = TrackLineError::DegenerateFit {
        inliers: indices.len(),
    };
    if indices.len() < 2 {
        return Err(degenerate);
    }
    let n = indices.len() as f64;
    let (mut sr, mut sc) = (0.0f64, 0.0f64);
    for &i in indices {
        sc += points[i][0];
        sr += points[i][1];
    }
    let (mean_r, mean_c) = (sr / n, sc / n);
    let (mut srr, mut src) = (0.0f64, 0.0f64);
    for &i in indices {
        let dr = points[i][1] - mean_r;
        srr += dr * dr;
        src += dr * (points[i][0] - mean_c);
    }
    if srr <= f64::EPSILON * n {
        return Err(degenerate);
    }
    let slope = src / srr;
    Ok((slope, mean_c - slope * mean_r))
}

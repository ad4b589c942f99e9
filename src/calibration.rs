use crate::error::TrackLineError;
use crate::path::Path;
use nalgebra::{Matrix3, Matrix3x4, Vector3, Vector4};
use serde::Serialize;

const EPS: f64 = 1e-9;

/// Vehicle-to-image projective transform plus the image resolution.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalibrationTransform {
    pub matrix: Matrix3x4<f64>,
    pub width: u32,
    pub height: u32,
}

impl CalibrationTransform {
    pub fn new(matrix: Matrix3x4<f64>, width: u32, height: u32) -> Self {
        Self {
            matrix,
            width,
            height,
        }
    }

    /// Compose `K · [R | t]` from pinhole intrinsics `[fx, fy, cx, cy]` and the
    /// vehicle-to-camera extrinsics.
    pub fn from_parts(
        intrinsics: [f64; 4],
        rotation: Matrix3<f64>,
        translation: Vector3<f64>,
        width: u32,
        height: u32,
    ) -> Self {
        let k = intrinsics_matrix(intrinsics);
        let mut rt = Matrix3x4::zeros();
        rt.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        rt.set_column(3, &translation);
        Self::new(k * rt, width, height)
    }

    /// Project a vehicle-frame point; `None` when it lies on the camera plane.
    /// Points behind the camera (`w < 0`) still project, mirrored.
    pub fn project(&self, p: &Vector3<f64>) -> Option<[f64; 2]> {
        let v = self.homogeneous(p);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        Some([v[0] / w, v[1] / w])
    }

    /// Like [`project`](Self::project), but `None` unless the point lies in
    /// front of the camera (`w > 0`).
    pub fn project_in_front(&self, p: &Vector3<f64>) -> Option<[f64; 2]> {
        if self.homogeneous(p)[2] <= EPS {
            return None;
        }
        self.project(p)
    }

    #[inline]
    pub fn homogeneous(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * Vector4::new(p[0], p[1], p[2], 1.0)
    }

    #[inline]
    pub fn contains(&self, px: &[f64; 2]) -> bool {
        px[0] >= 0.0 && px[1] >= 0.0 && px[0] <= self.width as f64 && px[1] <= self.height as f64
    }
}

pub fn intrinsics_matrix(intrinsics: [f64; 4]) -> Matrix3<f64> {
    let [fx, fy, cx, cy] = intrinsics;
    Matrix3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0)
}

/// Projected wheel track as `[col, row]` pixels, nearest first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProjectedPath {
    pub pixels: Vec<[f64; 2]>,
}

impl ProjectedPath {
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels truncated towards zero, the way a polyline rasterizer consumes them.
    pub fn to_pixels(&self) -> Vec<[i32; 2]> {
        self.pixels
            .iter()
            .map(|p| [p[0] as i32, p[1] as i32])
            .collect()
    }
}

/// Maps path samples at a fixed head height through the calibration.
#[derive(Clone, Debug)]
pub struct PerspectiveProjector<'a> {
    calibration: &'a CalibrationTransform,
    height: f64,
}

impl<'a> PerspectiveProjector<'a> {
    pub fn new(calibration: &'a CalibrationTransform, head_height: f64) -> Self {
        Self {
            calibration,
            height: head_height,
        }
    }

    pub fn project_path(&self, path: &Path) -> Result<ProjectedPath, TrackLineError> {
        let mut pixels = Vec::with_capacity(path.len());
        for (index, p) in path.points.iter().enumerate() {
            let world = Vector3::new(p.longitudinal, p.lateral, self.height);
            match self.calibration.project(&world) {
                Some(px) => pixels.push(px),
                None => {
                    let w = self.calibration.homogeneous(&world)[2];
                    return Err(TrackLineError::DegenerateProjection {
                        side: p.side,
                        index,
                        w,
                    });
                }
            }
        }
        Ok(ProjectedPath { pixels })
    }

    /// Lowest image row where boundaries are kept: the row of the nearest
    /// left sample, pulled back inside the frame when it falls below it.
    pub fn line_bottom_row(&self, left: &ProjectedPath) -> Option<usize> {
        let first = left.pixels.first()?;
        let h = self.calibration.height as i64;
        let row = first[1] as i64;
        let row = if row >= h { h - 2 } else { row };
        Some(row.max(0) as usize)
    }
}

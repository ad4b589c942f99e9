use crate::calibration::CalibrationTransform;
use nalgebra::{Matrix3, Matrix3x4, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Camera calibration as stored on disk.
///
/// Either `transform` (row-major 3x4 vehicle-to-image matrix) or all of
/// `intrinsics` (`[fx, fy, cx, cy]`), `rotation` (row-major 3x3
/// vehicle-to-camera) and `translation` must be present. When both are given
/// the precomposed `transform` wins.
#[derive(Clone, Debug, Deserialize)]
pub struct CalibrationConfig {
    pub resolution: Resolution,
    #[serde(default)]
    pub transform: Option<Vec<f64>>,
    #[serde(default)]
    pub intrinsics: Option<[f64; 4]>,
    #[serde(default)]
    pub rotation: Option<[f64; 9]>,
    #[serde(default)]
    pub translation: Option<[f64; 3]>,
}

impl CalibrationConfig {
    pub fn resolve(&self) -> Result<CalibrationTransform, String> {
        let Resolution { width, height } = self.resolution;
        if let Some(t) = &self.transform {
            if t.len() != 12 {
                return Err(format!(
                    "calibration transform needs 12 values (3x4), got {}",
                    t.len()
                ));
            }
            let matrix = Matrix3x4::from_row_slice(t);
            return Ok(CalibrationTransform::new(matrix, width, height));
        }
        match (&self.intrinsics, &self.rotation, &self.translation) {
            (Some(k), Some(r), Some(t)) => Ok(CalibrationTransform::from_parts(
                *k,
                Matrix3::from_row_slice(r),
                Vector3::from_row_slice(t),
                width,
                height,
            )),
            _ => Err(
                "calibration needs either `transform` or `intrinsics` + `rotation` + `translation`"
                    .to_string(),
            ),
        }
    }
}

pub fn load_calibration(path: &Path) -> Result<CalibrationTransform, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read calibration {}: {e}", path.display()))?;
    let config: CalibrationConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse calibration {}: {e}", path.display()))?;
    config.resolve()
}

use super::calibration::CalibrationConfig;
use crate::generator::TrackLineParams;
use crate::image::OverlayStyle;
use crate::radar::RadarObject;
use crate::types::VehicleGeometry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `track_overlay` tool.
#[derive(Debug, Deserialize)]
pub struct OverlayToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    pub calibration: CalibrationSource,
    pub vehicle: VehicleGeometry,
    /// Steering angles (radians) to evaluate, one overlay per angle.
    #[serde(default = "default_angles")]
    pub steering_angles: Vec<f64>,
    #[serde(default)]
    pub generator: TrackLineParams,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default)]
    pub radar_objects: Vec<RadarObject>,
    pub output: OverlayOutputConfig,
}

/// Calibration given inline or as a path to a separate JSON file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CalibrationSource {
    File(PathBuf),
    Inline(CalibrationConfig),
}

#[derive(Debug, Deserialize)]
pub struct OverlayOutputConfig {
    #[serde(rename = "dir")]
    pub dir: PathBuf,
}

fn default_angles() -> Vec<f64> {
    vec![0.0]
}

pub fn load_config(path: &Path) -> Result<OverlayToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

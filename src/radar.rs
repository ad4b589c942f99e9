//! Radar objects projected into the camera frame for overlay.

use crate::calibration::CalibrationTransform;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A radar track position in vehicle coordinates (metres).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadarObject {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A radar object with its pixel position inside the frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectedObject {
    pub object: RadarObject,
    pub pixel: [f64; 2],
}

/// Projects each object and keeps the ones in front of the camera that land
/// inside the frame.
pub fn project_radar_objects(
    calibration: &CalibrationTransform,
    objects: &[RadarObject],
) -> Vec<ProjectedObject> {
    objects
        .iter()
        .filter_map(|o| {
            let pixel = calibration.project_in_front(&Vector3::new(o.x, o.y, o.z))?;
            calibration.contains(&pixel).then(|| ProjectedObject {
                object: o.clone(),
                pixel,
            })
        })
        .collect()
}

use serde::{Deserialize, Serialize};

/// Body constants of the ego vehicle, in metres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleGeometry {
    /// Track width between the left and right wheels.
    pub tread: f64,
    /// Distance between the front and rear axles.
    pub wheelbase: f64,
    /// Distance from the front wheel centre to the vehicle head.
    pub front_overhang: f64,
    /// Height of the tracked point on the vehicle head.
    pub head_height: f64,
}

impl VehicleGeometry {
    /// Longitudinal distance from the rear axle to the vehicle head.
    #[inline]
    pub fn head_to_rear_axle(&self) -> f64 {
        self.wheelbase + self.front_overhang
    }

    /// Returns the name of the first length that is not strictly positive.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("tread", self.tread),
            ("wheelbase", self.wheelbase),
            ("front_overhang", self.front_overhang),
            ("head_height", self.head_height),
        ];
        fields
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
            .map(|(name, _)| name)
    }
}

/// Which wheel track a path point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Point on a wheel track in vehicle-body coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathPoint {
    /// Distance ahead of the rear axle.
    pub longitudinal: f64,
    /// Lateral offset, positive to the left.
    pub lateral: f64,
    pub side: Side,
}

/// Integer pixel position `[col, row]`.
pub type Pixel = [i32; 2];

/// The three corners describing a straight corridor in the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CornerPoints {
    pub left_bottom: Pixel,
    pub vanishing_point: Pixel,
    pub right_bottom: Pixel,
}

/// Row where the boundary pair fails the separation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConsistencyViolation {
    pub row: usize,
    pub left: u32,
    pub right: u32,
}

use nalgebra::{Matrix3, Vector3};
use track_line::{CalibrationTransform, TrackLineGenerator, TrackLineParams, VehicleGeometry};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 1920x1080 pinhole camera 1.2 m above the rear axle, looking straight ahead.
/// Principal point at the image centre, focal length 1000 px.
pub fn forward_camera() -> CalibrationTransform {
    let rotation = Matrix3::new(0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0);
    let translation = -(rotation * Vector3::new(0.0, 0.0, 1.2));
    CalibrationTransform::from_parts(
        [1000.0, 1000.0, 960.0, 540.0],
        rotation,
        translation,
        1920,
        1080,
    )
}

/// Full-size sedan: 1.88 m tread, 3.02 m wheelbase.
pub fn sedan() -> VehicleGeometry {
    VehicleGeometry {
        tread: 1.88,
        wheelbase: 3.02,
        front_overhang: 0.919,
        head_height: 0.676,
    }
}

pub fn sedan_generator() -> TrackLineGenerator {
    init_logger();
    TrackLineGenerator::new(sedan(), forward_camera(), TrackLineParams::default())
        .expect("valid generator setup")
}

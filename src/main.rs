use nalgebra::{Matrix3, Vector3};
use track_line::{CalibrationTransform, TrackLineGenerator, TrackLineParams, VehicleGeometry};

fn main() {
    // Demo stub: forward-looking 1080p camera 1.2 m above the rear axle
    let rotation = Matrix3::new(0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0);
    let translation = -(rotation * Vector3::new(0.0, 0.0, 1.2));
    let calibration = CalibrationTransform::from_parts(
        [1000.0, 1000.0, 960.0, 540.0],
        rotation,
        translation,
        1920,
        1080,
    );
    let geometry = VehicleGeometry {
        tread: 1.88,
        wheelbase: 3.02,
        front_overhang: 0.919,
        head_height: 0.676,
    };

    let generator = match TrackLineGenerator::new(geometry, calibration, TrackLineParams::default()) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    for angle in [0.0, 0.3, -0.3] {
        match generator.add_track_line(angle) {
            Ok(line) => println!(
                "angle={angle:+.2} dir={:?} bottom_row={} rows={} crossing={:?} latency_ms={:.3}",
                line.steering.direction,
                line.line_bottom_row,
                line.boundaries.left.present_rows(),
                line.crossing_row,
                line.latency_ms
            ),
            Err(err) => eprintln!("angle={angle:+.2} failed: {err}"),
        }
    }
}

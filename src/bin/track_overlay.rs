use rayon::prelude::*;
use std::env;
use std::path::Path;
use track_line::config::calibration::load_calibration;
use track_line::config::overlay::{self, CalibrationSource, OverlayToolConfig};
use track_line::image::io::{load_rgb_image, save_rgb_image, write_json_file};
use track_line::image::{draw_radar_objects, draw_track_line};
use track_line::radar::project_radar_objects;
use track_line::{CalibrationTransform, TrackLine, TrackLineError, TrackLineGenerator};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: track_overlay <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config_path = Path::new(&config_path);
    let config = overlay::load_config(config_path)?;
    let calibration = resolve_calibration(&config, config_path)?;

    let frame = load_rgb_image(&config.input)?;
    if frame.dimensions() != (calibration.width, calibration.height) {
        return Err(format!(
            "Frame {}x{} does not match calibrated resolution {}x{}",
            frame.width(),
            frame.height(),
            calibration.width,
            calibration.height
        ));
    }

    let objects = project_radar_objects(&calibration, &config.radar_objects);
    let generator = TrackLineGenerator::new(
        config.vehicle.clone(),
        calibration,
        config.generator.clone(),
    )
    .map_err(|e| e.to_string())?;

    let results: Vec<(f64, Result<TrackLine, TrackLineError>)> = config
        .steering_angles
        .par_iter()
        .map(|&angle| (angle, generator.add_track_line(angle)))
        .collect();

    for (idx, (angle, result)) in results.iter().enumerate() {
        let line = match result {
            Ok(line) => line,
            Err(err) => {
                eprintln!("angle {angle:+.3}: {err}");
                continue;
            }
        };
        print_summary(idx, *angle, line);

        let mut canvas = frame.clone();
        draw_track_line(&mut canvas, line, &config.style);
        draw_radar_objects(&mut canvas, &objects, &config.style);
        save_rgb_image(&canvas, &config.output.dir.join(format!("track_{idx}.png")))?;
        write_json_file(&config.output.dir.join(format!("track_{idx}.json")), line)?;
    }
    if !objects.is_empty() {
        write_json_file(&config.output.dir.join("radar_objects.json"), &objects)?;
    }
    println!("Overlays written to {}", config.output.dir.display());
    Ok(())
}

fn resolve_calibration(
    config: &OverlayToolConfig,
    config_path: &Path,
) -> Result<CalibrationTransform, String> {
    match &config.calibration {
        CalibrationSource::Inline(cal) => cal.resolve(),
        CalibrationSource::File(path) if path.is_relative() => {
            let base = config_path.parent().unwrap_or_else(|| Path::new("."));
            load_calibration(&base.join(path))
        }
        CalibrationSource::File(path) => load_calibration(path),
    }
}

fn print_summary(idx: usize, angle: f64, line: &TrackLine) {
    println!(
        "[{idx}] angle={angle:+.3} dir={:?} magnitude={:.4} samples={}/{} bottom_row={} latency_ms={:.3}",
        line.steering.direction,
        line.steering.magnitude,
        line.point_counts.0,
        line.point_counts.1,
        line.line_bottom_row,
        line.latency_ms
    );
    if let Some(c) = &line.corners {
        println!(
            "  corners: left_bottom={:?} vanishing_point={:?} right_bottom={:?}",
            c.left_bottom, c.vanishing_point, c.right_bottom
        );
    }
    println!(
        "  rows={} crossing={} violations={}",
        line.boundaries.left.present_rows(),
        line.crossing_row
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string()),
        line.violations.len()
    );
}

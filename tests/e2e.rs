mod common;

use common::fixtures::{forward_camera, sedan_generator};
use image::{Rgb, RgbImage};
use track_line::image::{draw_radar_objects, draw_track_line, OverlayStyle};
use track_line::radar::{project_radar_objects, RadarObject};
use track_line::{Direction, TrackLine, NO_BOUNDARY};

/// Rows nearer than the crossing and not below the bottom row hold both
/// edges in order; every other row is empty.
fn assert_corridor_shape(line: &TrackLine) {
    let b = &line.boundaries;
    let first_kept = line.crossing_row.map_or(0, |r| r + 1);
    for row in 0..b.height() {
        let (l, r) = (b.left.as_slice()[row], b.right.as_slice()[row]);
        if row < first_kept || row > line.line_bottom_row {
            assert_eq!((l, r), (NO_BOUNDARY, NO_BOUNDARY), "row {row} should be empty");
        } else {
            assert!(l != NO_BOUNDARY && r != NO_BOUNDARY, "row {row} missing an edge");
            assert!(r > l && r - l >= 2, "row {row}: left={l} right={r}");
        }
    }
    assert!(line.violations.is_empty(), "{:?}", line.violations);
}

#[test]
fn straight_corridor_meets_at_principal_point() {
    let generator = sedan_generator();

    let steering = generator.steering(0.0);
    let paths = generator.path_model(&steering);
    assert_eq!(paths.counts(), (97, 97));
    assert!(paths.left.points.iter().all(|p| p.lateral == 0.94));
    assert!(paths.right.points.iter().all(|p| p.lateral == -0.94));

    let line = generator.add_track_line(0.0).expect("straight track line");
    assert_eq!(line.steering.direction, Direction::Straight);
    assert_eq!(line.line_bottom_row, 673);

    let corners = line.corners.expect("straight result carries corners");
    let vp = corners.vanishing_point;
    assert!((vp[0] - 960).abs() <= 1 && (vp[1] - 540).abs() <= 1, "vp={vp:?}");
    assert_eq!(corners.left_bottom[1], 673);
    assert_eq!(corners.right_bottom[1], 673);
    assert!((corners.left_bottom[0] - 721).abs() <= 1, "{:?}", corners.left_bottom);
    assert!((corners.right_bottom[0] - 1198).abs() <= 1, "{:?}", corners.right_bottom);
    assert!(corners.left_bottom[0] < corners.right_bottom[0]);

    let crossing = line.crossing_row.expect("edges meet at the vanishing point");
    assert!((538..=543).contains(&crossing), "crossing at {crossing}");
    assert_corridor_shape(&line);
    assert_eq!(
        line.boundaries.left.get(673).zip(line.boundaries.right.get(673)),
        Some((721, 1198))
    );
}

#[test]
fn left_turn_truncates_and_closes_the_corridor() {
    let generator = sedan_generator();
    let line = generator.add_track_line(0.3).expect("left turn");

    assert_eq!(line.steering.direction, Direction::Left);
    assert!(line.corners.is_none());
    assert_eq!(line.point_counts, (6, 8));
    assert_eq!(line.line_bottom_row, 673);
    assert!(line.crossing_row.is_some());
    assert_corridor_shape(&line);

    // Both tracks bend towards the left half of the frame.
    let far = line.crossing_row.map(|r| r + 1).expect("crossing");
    let near = line.line_bottom_row;
    let b = &line.boundaries;
    assert!(b.right.get(far).expect("far right") < b.right.get(near).expect("near right"));
}

#[test]
fn right_turn_mirrors_sample_counts() {
    let generator = sedan_generator();
    let line = generator.add_track_line(-0.3).expect("right turn");
    assert_eq!(line.steering.direction, Direction::Right);
    assert_eq!(line.point_counts, (8, 6));
    assert!(line.crossing_row.is_some());
    assert_corridor_shape(&line);
}

#[test]
fn repeated_calls_are_identical() {
    let generator = sedan_generator();
    for angle in [0.0, 0.005, 0.12, -0.3] {
        let a = generator.add_track_line(angle).expect("first call");
        let b = generator.add_track_line(angle).expect("second call");
        assert_eq!(a.boundaries, b.boundaries, "angle {angle}");
        assert_eq!(a.corners, b.corners, "angle {angle}");
        assert_eq!(a.crossing_row, b.crossing_row, "angle {angle}");
    }
}

#[test]
fn gentle_turns_keep_corridor_shape() {
    let generator = sedan_generator();
    for angle in [0.02, 0.05, 0.1, -0.05, -0.1, 0.5, -0.5] {
        let line = generator.add_track_line(angle).expect("track line");
        assert!(!line.steering.direction.is_straight(), "angle {angle}");
        assert_corridor_shape(&line);
    }
}

#[test]
fn overlay_marks_corridor_and_radar_objects() {
    let generator = sedan_generator();
    let line = generator.add_track_line(0.0).expect("straight");
    let style = OverlayStyle::default();

    let mut canvas = RgbImage::new(1920, 1080);
    draw_track_line(&mut canvas, &line, &style);
    let corners = line.corners.expect("corners");
    let lb = corners.left_bottom;
    assert_eq!(canvas.get_pixel(lb[0] as u32, lb[1] as u32), &Rgb(style.line_color));
    assert_eq!(canvas.get_pixel(960, 900), &Rgb([0, 0, 0]));

    let objects = project_radar_objects(
        &forward_camera(),
        &[
            RadarObject { id: 1, x: 20.0, y: 0.0, z: 1.2 },
            RadarObject { id: 2, x: -5.0, y: 0.0, z: 1.0 },
        ],
    );
    assert_eq!(objects.len(), 1);
    draw_radar_objects(&mut canvas, &objects, &style);
    let [u, v] = objects[0].pixel;
    let edge = (u as u32 + style.marker_radius, v as u32);
    assert_eq!(canvas.get_pixel(edge.0, edge.1), &Rgb(style.marker_color));
}

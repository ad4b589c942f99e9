//! Diagnostic drawing of track lines and radar markers onto RGB frames.

use crate::generator::TrackLine;
use crate::radar::ProjectedObject;
use crate::raster::{clip_segment, line_pixels};
use crate::types::Pixel;
use image::{Rgb, RgbImage};
use serde::Deserialize;

/// Colours and sizes of the overlay.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub line_color: [u8; 3],
    pub line_thickness: u32,
    pub dot_radius: u32,
    pub marker_color: [u8; 3],
    pub marker_radius: u32,
    pub marker_thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: [0, 255, 0],
            line_thickness: 2,
            dot_radius: 1,
            marker_color: [255, 255, 0],
            marker_radius: 5,
            marker_thickness: 2,
        }
    }
}

#[inline]
fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u64) < img.width() as u64 && (y as u64) < img.height() as u64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Filled disk of `radius` pixels around `center`.
pub fn fill_disk(img: &mut RgbImage, center: Pixel, radius: u32, color: Rgb<u8>) {
    let r = radius as i64;
    let (cx, cy) = (center[0] as i64, center[1] as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Circle outline whose ring spans `thickness` pixels inwards from `radius`.
pub fn draw_ring(img: &mut RgbImage, center: Pixel, radius: u32, thickness: u32, color: Rgb<u8>) {
    let outer = radius as i64;
    let inner = radius as i64 - thickness.max(1) as i64;
    let inner2 = if inner < 0 { -1 } else { inner * inner };
    let (cx, cy) = (center[0] as i64, center[1] as i64);
    for dy in -outer..=outer {
        for dx in -outer..=outer {
            let d2 = dx * dx + dy * dy;
            if d2 <= outer * outer && d2 > inner2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Segment of the given thickness, clipped to the frame.
pub fn draw_segment(img: &mut RgbImage, a: Pixel, b: Pixel, thickness: u32, color: Rgb<u8>) {
    let Some((a, b)) = clip_segment(a, b, img.width(), img.height()) else {
        return;
    };
    let radius = thickness / 2;
    for p in line_pixels(a, b) {
        if radius == 0 {
            put(img, p[0] as i64, p[1] as i64, color);
        } else {
            fill_disk(img, p, radius, color);
        }
    }
}

/// Straight corridors are drawn as the two edges meeting at the vanishing
/// point; curved ones as a dot per boundary row.
pub fn draw_track_line(img: &mut RgbImage, line: &TrackLine, style: &OverlayStyle) {
    let color = Rgb(style.line_color);
    if let Some(c) = &line.corners {
        draw_segment(img, c.vanishing_point, c.left_bottom, style.line_thickness, color);
        draw_segment(img, c.vanishing_point, c.right_bottom, style.line_thickness, color);
        return;
    }
    let b = &line.boundaries;
    for row in 0..b.height().min(line.line_bottom_row) {
        if let (Some(l), Some(r)) = (b.left.get(row), b.right.get(row)) {
            fill_disk(img, [l as i32, row as i32], style.dot_radius, color);
            fill_disk(img, [r as i32, row as i32], style.dot_radius, color);
        }
    }
}

pub fn draw_radar_objects(img: &mut RgbImage, objects: &[ProjectedObject], style: &OverlayStyle) {
    let color = Rgb(style.marker_color);
    for o in objects {
        let center = [o.pixel[0] as i32, o.pixel[1] as i32];
        draw_ring(img, center, style.marker_radius, style.marker_thickness, color);
    }
}

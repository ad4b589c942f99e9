//! Line and polyline rasterization into per-row column arrays.
//!
//! A rasterizer renders a segment or an open polyline into a `width x height`
//! grid and reports, per row, the column of the first foreground pixel in
//! that row. Rows the line never reaches report `0`.

use crate::types::Pixel;

/// Per-row column of the first foreground pixel; `0` when the row is empty.
pub type RowColumns = Vec<u32>;

pub trait Rasterizer {
    fn rasterize_polyline(&self, points: &[Pixel], width: u32, height: u32) -> RowColumns;

    fn rasterize_segment(&self, start: Pixel, end: Pixel, width: u32, height: u32) -> RowColumns {
        self.rasterize_polyline(&[start, end], width, height)
    }
}

/// 8-connected Bresenham rasterizer, one pixel thick, clipped to the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct BresenhamRasterizer;

impl Rasterizer for BresenhamRasterizer {
    fn rasterize_polyline(&self, points: &[Pixel], width: u32, height: u32) -> RowColumns {
        let mut first: Vec<Option<u32>> = vec![None; height as usize];
        let mut mark = |x: i32, y: i32| {
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }
            let slot = &mut first[y as usize];
            let x = x as u32;
            *slot = Some(slot.map_or(x, |c| c.min(x)));
        };
        match points {
            [] => {}
            [p] => mark(p[0], p[1]),
            _ => {
                for w in points.windows(2) {
                    let Some((a, b)) = clip_segment(w[0], w[1], width, height) else {
                        continue;
                    };
                    for [x, y] in line_pixels(a, b) {
                        mark(x, y);
                    }
                }
            }
        }
        first.into_iter().map(|c| c.unwrap_or(0)).collect()
    }
}

/// Liang-Barsky clip of a segment to the pixel grid. Segments already inside
/// are returned untouched so their Bresenham walk is exact.
pub fn clip_segment(a: Pixel, b: Pixel, width: u32, height: u32) -> Option<(Pixel, Pixel)> {
    let inside = |p: Pixel| p[0] >= 0 && p[1] >= 0 && p[0] < width as i32 && p[1] < height as i32;
    if inside(a) && inside(b) {
        return Some((a, b));
    }
    let (x0, y0) = (a[0] as f64, a[1] as f64);
    let (dx, dy) = (b[0] as f64 - x0, b[1] as f64 - y0);
    let (xmax, ymax) = (width as f64 - 1.0, height as f64 - 1.0);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x0), (dx, xmax - x0), (-dy, y0), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let at = |t: f64| -> Pixel {
        [
            (x0 + t * dx).round().clamp(0.0, xmax) as i32,
            (y0 + t * dy).round().clamp(0.0, ymax) as i32,
        ]
    };
    Some((at(t0), at(t1)))
}

/// Pixels of the Bresenham line from `start` to `end`, both included.
pub fn line_pixels(start: Pixel, end: Pixel) -> LinePixels {
    let dx = (end[0] as i64 - start[0] as i64).abs();
    let dy = -(end[1] as i64 - start[1] as i64).abs();
    LinePixels {
        x: start[0] as i64,
        y: start[1] as i64,
        end: [end[0] as i64, end[1] as i64],
        dx,
        dy,
        sx: if start[0] < end[0] { 1 } else { -1 },
        sy: if start[1] < end[1] { 1 } else { -1 },
        err: dx + dy,
        done: false,
    }
}

pub struct LinePixels {
    x: i64,
    y: i64,
    end: [i64; 2],
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl Iterator for LinePixels {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.done {
            return None;
        }
        let out = [self.x as i32, self.y as i32];
        if self.x == self.end[0] && self.y == self.end[1] {
            self.done = true;
            return Some(out);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_pixels_include_both_endpoints() {
        let px: Vec<_> = line_pixels([0, 0], [4, 2]).collect();
        assert_eq!(px.first(), Some(&[0, 0]));
        assert_eq!(px.last(), Some(&[4, 2]));
        assert_eq!(px.len(), 5);
        assert!(px
            .windows(2)
            .all(|w| (w[1][0] - w[0][0]).abs() <= 1 && (w[1][1] - w[0][1]).abs() <= 1));
    }

    #[test]
    fn steep_segment_covers_every_row_once() {
        let cols = BresenhamRasterizer.rasterize_segment([10, 2], [14, 9], 32, 12);
        assert_eq!(cols.len(), 12);
        assert_eq!(&cols[..2], &[0, 0]);
        assert_eq!(cols[2], 10);
        assert_eq!(cols[9], 14);
        assert!(cols[2..=9].windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(&cols[10..], &[0, 0]);
    }

    #[test]
    fn shallow_segment_reports_first_column_per_row() {
        let cols = BresenhamRasterizer.rasterize_segment([20, 1], [2, 3], 32, 5);
        assert_eq!(cols[1], 16);
        assert_eq!(cols[3], 2);
        assert!(cols[2] > 2 && cols[2] < 16);
    }

    #[test]
    fn polyline_is_clipped_to_grid() {
        let cols = BresenhamRasterizer.rasterize_polyline(&[[-5, -5], [5, 5], [5, 40]], 8, 10);
        assert_eq!(cols[0], 0);
        assert_eq!(cols[1], 1);
        assert_eq!(cols[4], 4);
        assert!(cols[5..].iter().all(|&c| c == 5));
    }

    #[test]
    fn far_away_endpoints_are_clipped_before_walking() {
        let cols = BresenhamRasterizer.rasterize_segment([5, 5], [i32::MAX / 2, 5], 16, 8);
        assert_eq!(cols[5], 5);
        assert!(clip_segment([-10, -10], [-1, 40], 16, 8).is_none());
        assert_eq!(
            clip_segment([-4, 3], [20, 3], 16, 8),
            Some(([0, 3], [15, 3]))
        );
    }

    #[test]
    fn degenerate_inputs() {
        assert!(BresenhamRasterizer
            .rasterize_polyline(&[], 4, 3)
            .iter()
            .all(|&c| c == 0));
        assert_eq!(
            BresenhamRasterizer.rasterize_polyline(&[[2, 1]], 4, 3),
            vec![0, 2, 0]
        );
    }
}

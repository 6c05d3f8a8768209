// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinate mapping between display space (scaled canvas pixels) and image
// space (native pixels of the source photo).
//
// Every function takes the scale explicitly so the mapping can be tested
// without any rendering surface.

use serde::{Deserialize, Serialize};

use crate::types::{CONTOUR_VERTICES, Contour, Point};

/// A point in display space: pixels of the rendered, possibly shrunk, image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another display point.
    pub fn distance_to(self, other: DisplayPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Scale used to fit an image into a container without ever enlarging it:
/// `min(1, container_width / image_width)`.
///
/// Degenerate inputs (zero or non-finite widths) yield `1.0`.
pub fn fit_scale(container_width: f64, image_width: f64) -> f64 {
    if !(container_width.is_finite() && image_width.is_finite())
        || container_width <= 0.0
        || image_width <= 0.0
    {
        return 1.0;
    }
    (container_width / image_width).min(1.0)
}

/// `imagePoint = displayPoint / scale`.
pub fn to_image(point: DisplayPoint, scale: f64) -> Point {
    Point::new(point.x / scale, point.y / scale)
}

/// `displayPoint = imagePoint * scale`.
pub fn to_display(point: Point, scale: f64) -> DisplayPoint {
    DisplayPoint::new(point.x * scale, point.y * scale)
}

/// Project all four contour vertices into display space.
pub fn project_contour(contour: &Contour, scale: f64) -> [DisplayPoint; CONTOUR_VERTICES] {
    contour.points().map(|p| to_display(p, scale))
}

/// Displayed size of an image of `(width, height)` at `scale`.
pub fn display_size((width, height): (u32, u32), scale: f64) -> (f64, f64) {
    (f64::from(width) * scale, f64::from(height) * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: DisplayPoint, b: DisplayPoint) -> bool {
        (a.x - b.x).abs() <= EPS * a.x.abs().max(1.0) && (a.y - b.y).abs() <= EPS * a.y.abs().max(1.0)
    }

    #[test]
    fn display_image_round_trip() {
        let points = [
            DisplayPoint::new(0.0, 0.0),
            DisplayPoint::new(12.5, 300.25),
            DisplayPoint::new(799.9, 1.0e-3),
            DisplayPoint::new(-4.0, 17.0),
        ];
        for scale in [0.1, 0.333_333, 0.5, 1.0, 2.75] {
            for p in points {
                let back = to_display(to_image(p, scale), scale);
                assert!(close(back, p), "scale {scale}: {p:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn fit_scale_never_enlarges() {
        assert_eq!(fit_scale(800.0, 400.0), 1.0);
        assert_eq!(fit_scale(800.0, 1600.0), 0.5);
        assert!((fit_scale(800.0, 1920.0) - 800.0 / 1920.0).abs() < EPS);
    }

    #[test]
    fn fit_scale_degenerate_inputs() {
        assert_eq!(fit_scale(0.0, 1000.0), 1.0);
        assert_eq!(fit_scale(800.0, 0.0), 1.0);
        assert_eq!(fit_scale(f64::NAN, 1000.0), 1.0);
    }

    #[test]
    fn projects_each_vertex() {
        let contour = Contour::new([
            Point::new(10.0, 10.0),
            Point::new(100.0, 10.0),
            Point::new(100.0, 200.0),
            Point::new(10.0, 200.0),
        ]);
        let projected = project_contour(&contour, 0.5);
        assert_eq!(projected[0], DisplayPoint::new(5.0, 5.0));
        assert_eq!(projected[2], DisplayPoint::new(50.0, 100.0));
    }

    #[test]
    fn display_size_scales_both_axes() {
        assert_eq!(display_size((1920, 1080), 0.5), (960.0, 540.0));
    }
}

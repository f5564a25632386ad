// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection — simplify each contour, filter candidates by
// vertex count, area, and convexity, then score by normalized area and
// closeness to the ISO A-series aspect ratio.

use scanedge_core::{DetectionConfig, Point, Quadrilateral};
use tracing::{debug, instrument};

use crate::simplify::simplify;

/// ISO A-series paper ratio (sqrt(2)); favours common document shapes
/// without hard-rejecting others.
const REFERENCE_ASPECT: f32 = 1.41;

/// Pick the best document candidate across all contours.
///
/// Returns the winning quadrilateral (canonically ordered) and its score in
/// [0, 1], or `None` when no contour passes the filters.
#[instrument(skip(contours, config), fields(contour_count = contours.len()))]
pub fn select_best_quadrilateral(
    contours: &[Vec<Point>],
    frame_width: f32,
    frame_height: f32,
    config: &DetectionConfig,
) -> Option<(Quadrilateral, f32)> {
    let frame_area = frame_width * frame_height;
    if frame_area <= 0.0 {
        return None;
    }
    let min_area = config.min_area_ratio * frame_area;
    let max_area = config.max_area_ratio * frame_area;

    let mut best: Option<(Quadrilateral, f32)> = None;

    for contour in contours {
        let epsilon = config.simplify_epsilon_ratio * contour.len() as f32;
        let polygon = simplify(contour, epsilon);
        if polygon.len() < 4 || polygon.len() > 8 {
            continue;
        }

        let corners = if polygon.len() == 4 {
            [polygon[0], polygon[1], polygon[2], polygon[3]]
        } else {
            reduce_to_corners(&polygon)
        };

        let area = shoelace_area(&corners);
        // Inclusive on both bounds; see DESIGN.md.
        if area < min_area || area > max_area {
            continue;
        }
        if !is_convex(&corners) {
            continue;
        }

        let quad = order_corners(corners);
        let score = score_candidate(&quad, area, max_area);
        debug!(area, score, "Candidate quadrilateral scored");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((quad, score));
        }
    }

    best
}

/// Reduce a 5-8 vertex polygon to four corners by coordinate extremes:
/// min(x+y) top-left, max(x-y) top-right, max(x+y) bottom-right,
/// min(x-y) bottom-left. A heuristic, not a minimal-bounding-quadrilateral
/// fit; documents are near-rectangular and roughly frame-aligned.
fn reduce_to_corners(polygon: &[Point]) -> [Point; 4] {
    let mut top_left = polygon[0];
    let mut top_right = polygon[0];
    let mut bottom_right = polygon[0];
    let mut bottom_left = polygon[0];

    for &p in polygon {
        if p.x + p.y < top_left.x + top_left.y {
            top_left = p;
        }
        if p.x - p.y > top_right.x - top_right.y {
            top_right = p;
        }
        if p.x + p.y > bottom_right.x + bottom_right.y {
            bottom_right = p;
        }
        if p.x - p.y < bottom_left.x - bottom_left.y {
            bottom_left = p;
        }
    }

    [top_left, top_right, bottom_right, bottom_left]
}

/// Polygon area via the Shoelace formula (vertices in cyclic order).
pub fn shoelace_area(corners: &[Point; 4]) -> f32 {
    let mut area = 0.0f32;
    for i in 0..4 {
        let j = (i + 1) % 4;
        area += corners[i].x * corners[j].y;
        area -= corners[j].x * corners[i].y;
    }
    area.abs() / 2.0
}

/// Convexity test by consistent cross-product sign around the cycle.
/// Zero cross products (collinear triples) are skipped, not treated as a
/// sign change.
pub fn is_convex(corners: &[Point; 4]) -> bool {
    let mut sign = 0i8;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let c = corners[(i + 2) % 4];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross == 0.0 {
            continue;
        }
        let current = if cross > 0.0 { 1 } else { -1 };
        if sign == 0 {
            sign = current;
        } else if sign != current {
            return false;
        }
    }
    true
}

/// Canonical corner ordering: the two smallest-y points become the top pair
/// (left to right), the two largest-y points the bottom pair. The rest of
/// the system depends on this labelling absolutely.
pub fn order_corners(mut corners: [Point; 4]) -> Quadrilateral {
    corners.sort_by(|a, b| a.y.total_cmp(&b.y));

    let (mut top_left, mut top_right) = (corners[0], corners[1]);
    if top_left.x > top_right.x {
        std::mem::swap(&mut top_left, &mut top_right);
    }
    let (mut bottom_left, mut bottom_right) = (corners[2], corners[3]);
    if bottom_left.x > bottom_right.x {
        std::mem::swap(&mut bottom_left, &mut bottom_right);
    }

    Quadrilateral::new(top_left, top_right, bottom_right, bottom_left)
}

/// Score = 0.6 * normalized area + 0.4 * aspect closeness to A-series paper.
fn score_candidate(quad: &Quadrilateral, area: f32, max_area: f32) -> f32 {
    let (width, height) = quad_dimensions(quad);
    if width <= 0.0 || height <= 0.0 {
        return 0.0;
    }

    let area_score = (area / max_area).min(1.0);
    let aspect = width.max(height) / width.min(height);
    let aspect_score = 1.0 - ((aspect - REFERENCE_ASPECT).abs() / 2.0).min(1.0);

    0.6 * area_score + 0.4 * aspect_score
}

/// Width and height from corner distances (longer of each opposite pair).
fn quad_dimensions(quad: &Quadrilateral) -> (f32, f32) {
    let top = quad.top_left.distance(&quad.top_right);
    let bottom = quad.bottom_left.distance(&quad.bottom_right);
    let left = quad.top_left.distance(&quad.bottom_left);
    let right = quad.top_right.distance(&quad.bottom_right);
    (top.max(bottom), left.max(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense perimeter polyline of an axis-aligned rectangle, traced
    /// clockwise from (x0, y0) at unit steps.
    fn rect_contour(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
        let mut points = Vec::new();
        let mut x = x0;
        while x < x1 {
            points.push(Point::new(x, y0));
            x += 1.0;
        }
        let mut y = y0;
        while y < y1 {
            points.push(Point::new(x1, y));
            y += 1.0;
        }
        let mut x = x1;
        while x > x0 {
            points.push(Point::new(x, y1));
            x -= 1.0;
        }
        let mut y = y1;
        while y > y0 + 1.0 {
            points.push(Point::new(x0, y));
            y -= 1.0;
        }
        points
    }

    fn config() -> DetectionConfig {
        DetectionConfig::default()
    }

    #[test]
    fn orders_corners_canonically() {
        let quad = order_corners([
            Point::new(90.0, 80.0),
            Point::new(10.0, 10.0),
            Point::new(12.0, 85.0),
            Point::new(95.0, 12.0),
        ]);
        assert_eq!(quad.top_left, Point::new(10.0, 10.0));
        assert_eq!(quad.top_right, Point::new(95.0, 12.0));
        assert_eq!(quad.bottom_right, Point::new(90.0, 80.0));
        assert_eq!(quad.bottom_left, Point::new(12.0, 85.0));
    }

    #[test]
    fn shoelace_of_rectangle() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ];
        assert!((shoelace_area(&corners) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn convexity_detects_dart() {
        let convex = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(is_convex(&convex));

        // Reflex vertex pulled inside the triangle of the others.
        let dart = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(0.0, 10.0),
        ];
        assert!(!is_convex(&dart));
    }

    #[test]
    fn selects_rectangle_with_plausible_score() {
        let contour = rect_contour(30.0, 25.0, 270.0, 205.0);
        let result = select_best_quadrilateral(&[contour], 320.0, 240.0, &config());
        let (quad, score) = result.expect("rectangle should qualify");

        assert_eq!(quad.top_left, Point::new(30.0, 25.0));
        assert_eq!(quad.bottom_right, Point::new(270.0, 205.0));
        assert!(score > 0.3 && score <= 1.0, "score {}", score);
    }

    #[test]
    fn prefers_the_larger_of_two_candidates() {
        let small = rect_contour(10.0, 10.0, 110.0, 90.0);
        let large = rect_contour(20.0, 20.0, 300.0, 220.0);
        let (quad, _) =
            select_best_quadrilateral(&[small, large], 320.0, 240.0, &config()).unwrap();
        assert_eq!(quad.top_left, Point::new(20.0, 20.0));
    }

    #[test]
    fn area_bounds_are_inclusive() {
        // Ratios chosen exactly representable in binary so the boundary
        // areas land precisely on the bounds: frame 200x200 -> area 40000,
        // bounds 10000 (25%) and 30000 (75%).
        let mut cfg = config();
        cfg.min_area_ratio = 0.25;
        cfg.max_area_ratio = 0.75;

        let at_lower = rect_contour(0.0, 0.0, 100.0, 100.0); // exactly 10000
        assert!(select_best_quadrilateral(&[at_lower], 200.0, 200.0, &cfg).is_some());

        let at_upper = rect_contour(0.0, 0.0, 200.0, 150.0); // exactly 30000
        assert!(select_best_quadrilateral(&[at_upper], 200.0, 200.0, &cfg).is_some());

        let below = rect_contour(0.0, 0.0, 90.0, 100.0); // 9000 < 10000
        assert!(select_best_quadrilateral(&[below], 200.0, 200.0, &cfg).is_none());

        let above = rect_contour(0.0, 0.0, 200.0, 160.0); // 32000 > 30000
        assert!(select_best_quadrilateral(&[above], 200.0, 200.0, &cfg).is_none());
    }

    #[test]
    fn jagged_contours_are_rejected() {
        // Sawtooth: simplifies to far more than 8 vertices.
        let mut zigzag = Vec::new();
        for i in 0..200 {
            let x = i as f32;
            let y = if i % 2 == 0 { 0.0 } else { 40.0 };
            zigzag.push(Point::new(x, y));
        }
        assert!(
            select_best_quadrilateral(&[zigzag], 320.0, 240.0, &config()).is_none()
        );
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(select_best_quadrilateral(&[], 320.0, 240.0, &config()).is_none());
    }
}

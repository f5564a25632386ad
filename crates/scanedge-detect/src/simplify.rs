// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon simplification — Douglas-Peucker reduction. Implemented with an
// explicit work stack so call depth stays constant regardless of contour
// size; output is identical to the recursive formulation.

use scanedge_core::Point;

/// Reduce a polyline to the points that deviate from their simplifying chord
/// by more than `epsilon`. Endpoints are always kept.
pub fn simplify(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut spans = vec![(0usize, points.len() - 1)];
    while let Some((first, last)) = spans.pop() {
        if last <= first + 1 {
            continue;
        }

        let mut max_distance = 0.0f32;
        let mut max_index = first;
        for i in first + 1..last {
            let distance = perpendicular_distance(&points[i], &points[first], &points[last]);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            spans.push((first, max_index));
            spans.push((max_index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

/// Distance from `point` to the segment (`start`, `end`), via closed-form
/// projection. A zero-length chord degrades to plain point distance.
pub fn perpendicular_distance(point: &Point, start: &Point, end: &Point) -> f32 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return point.distance(start);
    }

    let t = ((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq;
    let t = t.clamp(0.0, 1.0);
    let projected = Point::new(start.x + t * dx, start.y + t * dy);
    point.distance(&projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_chain_collapses_to_endpoints() {
        let points: Vec<Point> = (0..20).map(|i| Point::new(i as f32, 0.0)).collect();
        let simplified = simplify(&points, 1.0);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0], Point::new(0.0, 0.0));
        assert_eq!(simplified[1], Point::new(19.0, 0.0));
    }

    #[test]
    fn corner_points_survive() {
        // L-shaped polyline: the corner at (10, 0) must be kept.
        let mut points: Vec<Point> = (0..=10).map(|i| Point::new(i as f32, 0.0)).collect();
        points.extend((1..=10).map(|i| Point::new(10.0, i as f32)));

        let simplified = simplify(&points, 1.0);
        assert_eq!(simplified.len(), 3);
        assert_eq!(simplified[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn rectangle_perimeter_reduces_to_corners() {
        let mut points = Vec::new();
        for x in 0..=100 {
            points.push(Point::new(x as f32, 0.0));
        }
        for y in 1..=60 {
            points.push(Point::new(100.0, y as f32));
        }
        for x in (0..100).rev() {
            points.push(Point::new(x as f32, 60.0));
        }
        for y in (1..60).rev() {
            points.push(Point::new(0.0, y as f32));
        }

        let simplified = simplify(&points, 0.02 * points.len() as f32);
        // First point, the three remaining corners, and the final point
        // (adjacent to the start on the closed ring).
        assert!(simplified.len() <= 6, "got {} points", simplified.len());
        assert!(simplified.contains(&Point::new(100.0, 0.0)));
        assert!(simplified.contains(&Point::new(100.0, 60.0)));
        assert!(simplified.contains(&Point::new(0.0, 60.0)));
    }

    #[test]
    fn below_epsilon_noise_is_removed() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.4),
            Point::new(10.0, -0.3),
            Point::new(15.0, 0.2),
            Point::new(20.0, 0.0),
        ];
        let simplified = simplify(&points, 1.0);
        assert_eq!(simplified.len(), 2);
    }

    #[test]
    fn zero_length_chord_uses_point_distance() {
        let p = Point::new(3.0, 4.0);
        let anchor = Point::new(0.0, 0.0);
        assert!((perpendicular_distance(&p, &anchor, &anchor) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn tiny_inputs_pass_through() {
        let points = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert_eq!(simplify(&points, 0.5), points);
    }
}

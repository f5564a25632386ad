// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — Moore-neighbour boundary tracing over the binary edge
// map. Deliberately simple outer-boundary tracing, not full topological
// contour analysis: only outer document boundaries matter here.

use scanedge_core::Point;
use tracing::{debug, instrument};

use crate::preprocess::EdgeMap;

/// 8-connected neighbourhood in clockwise order starting east.
const NEIGHBOURS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Trace closed boundaries in the edge map.
///
/// The map is scanned row-major; every unvisited edge pixel starts a trace
/// that follows the 8-neighbourhood clockwise, resuming one direction before
/// the previous incoming direction. A trace ends when it returns to its start
/// pixel, runs out of continuations, or hits `max_steps`. Contours shorter
/// than `min_points` are dropped as noise. Output order is discovery order.
#[instrument(skip(map), fields(width = map.width(), height = map.height()))]
pub fn find_contours(map: &EdgeMap, min_points: usize, max_steps: usize) -> Vec<Vec<Point>> {
    let width = map.width() as i64;
    let height = map.height() as i64;
    let mut visited = vec![false; (width * height) as usize];
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if map.is_edge(x, y) && !visited[idx] {
                let contour = trace_boundary(map, &mut visited, x, y, max_steps);
                if contour.len() >= min_points {
                    contours.push(contour);
                }
            }
        }
    }

    debug!(count = contours.len(), "Contours traced");
    contours
}

/// Follow one boundary starting at (sx, sy), marking pixels visited.
fn trace_boundary(
    map: &EdgeMap,
    visited: &mut [bool],
    sx: i64,
    sy: i64,
    max_steps: usize,
) -> Vec<Point> {
    let width = map.width() as i64;
    let mut contour = vec![Point::new(sx as f32, sy as f32)];
    visited[(sy * width + sx) as usize] = true;

    let (mut cx, mut cy) = (sx, sy);
    let mut search_start = 7usize;

    for _ in 0..max_steps {
        let mut advanced = false;
        for offset in 0..8 {
            let dir = (search_start + offset) % 8;
            let (dx, dy) = NEIGHBOURS[dir];
            let (nx, ny) = (cx + dx, cy + dy);
            if !map.is_edge(nx, ny) {
                continue;
            }
            if nx == sx && ny == sy {
                // Boundary closed.
                return contour;
            }
            let idx = (ny * width + nx) as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            contour.push(Point::new(nx as f32, ny as f32));
            (cx, cy) = (nx, ny);
            // Resume the search one direction before the incoming direction.
            search_start = (dir + 6) % 8;
            advanced = true;
            break;
        }
        if !advanced {
            break;
        }
    }

    contour
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an edge map whose edge pixels are the 1px boundary of the given
    /// rectangle (exclusive upper bounds).
    fn ring_map(width: u32, height: u32, x0: i64, y0: i64, x1: i64, y1: i64) -> EdgeMap {
        let mut data = vec![0u8; (width * height) as usize];
        let mut set = |x: i64, y: i64| {
            data[(y as u32 * width + x as u32) as usize] = 255;
        };
        for x in x0..x1 {
            set(x, y0);
            set(x, y1 - 1);
        }
        for y in y0..y1 {
            set(x0, y);
            set(x1 - 1, y);
        }
        EdgeMap::from_raw(width, height, data, 1.0)
    }

    #[test]
    fn empty_map_yields_no_contours() {
        let map = EdgeMap::from_raw(50, 50, vec![0; 2500], 1.0);
        assert!(find_contours(&map, 50, 10_000).is_empty());
    }

    #[test]
    fn rectangle_ring_traces_as_one_closed_contour() {
        let map = ring_map(100, 100, 20, 20, 80, 80);
        let contours = find_contours(&map, 50, 10_000);
        assert_eq!(contours.len(), 1);

        // Perimeter of a 60x60 ring traced 8-connected: corners are cut
        // diagonally, so expect slightly less than 4 * 59 points.
        let contour = &contours[0];
        assert!(contour.len() > 200, "got {} points", contour.len());
        assert_eq!(contour[0], Point::new(20.0, 20.0));

        // The trace must have reached the far corner region.
        assert!(
            contour
                .iter()
                .any(|p| p.x >= 78.0 && p.y >= 78.0)
        );
    }

    #[test]
    fn short_contours_are_discarded() {
        // 5x5 ring: 16 boundary pixels, below the 50-point floor.
        let map = ring_map(30, 30, 10, 10, 15, 15);
        assert!(find_contours(&map, 50, 10_000).is_empty());
    }

    #[test]
    fn step_cap_bounds_every_trace() {
        let map = ring_map(100, 100, 10, 10, 90, 90);
        let contours = find_contours(&map, 10, 40);
        assert!(!contours.is_empty());
        // 40 steps from the start pixel gives at most 41 points per trace.
        assert!(contours.iter().all(|c| c.len() <= 41));
    }
}

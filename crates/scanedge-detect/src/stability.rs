// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stability tracking — declares a detection stable once the quadrilateral
// has held still across enough consecutive frames. One tracker per scanning
// session; concurrent sessions need independent instances.

use scanedge_core::{DetectionConfig, Quadrilateral};
use tracing::debug;

/// Bounded history of recently accepted quadrilaterals.
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    history: Vec<Quadrilateral>,
    frames: usize,
    tolerance: f32,
}

impl StabilityTracker {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            history: Vec::new(),
            frames: config.stability_frames,
            tolerance: config.stability_tolerance,
        }
    }

    /// Record a successful detection and report whether it is stable.
    ///
    /// Stable means the history holds at least `frames` entries and every one
    /// of the most recent `frames` entries has all four corresponding corners
    /// (canonical order, not nearest-point matching) within `tolerance`
    /// pixels of the current quad. The history is trimmed to the newest
    /// `frames` entries once it exceeds twice that bound.
    pub fn observe(&mut self, quad: Quadrilateral) -> bool {
        self.history.push(quad);

        let stable = self.history.len() >= self.frames
            && self.history[self.history.len() - self.frames..]
                .iter()
                .all(|past| corners_within(past, &quad, self.tolerance));

        if self.history.len() > 2 * self.frames {
            let excess = self.history.len() - self.frames;
            self.history.drain(..excess);
        }

        if stable {
            debug!(frames = self.frames, "Detection stable");
        }
        stable
    }

    /// A frame with no detection resets stability from scratch: a single
    /// missed frame clears the whole history.
    pub fn miss(&mut self) {
        self.history.clear();
    }

    /// Clear unconditionally. Call when a scanning session ends so stale
    /// geometry cannot leak into the next session.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Corner-by-corner Euclidean comparison in canonical order.
fn corners_within(a: &Quadrilateral, b: &Quadrilateral, tolerance: f32) -> bool {
    a.corners()
        .iter()
        .zip(b.corners())
        .all(|(pa, pb)| pa.distance(&pb) <= tolerance)
}

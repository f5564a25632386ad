// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document detector — ties preprocessing, contour tracing, simplification,
// and quadrilateral selection together behind a single per-frame call, and
// annotates the result with temporal stability.
//
// Synchronous by contract: each call runs to completion on the calling
// thread. The caller owns the invocation cadence (typically 100-300ms
// between frames) and must not issue concurrent calls against one instance.

use image::DynamicImage;
use scanedge_core::DetectionConfig;
use scanedge_core::error::Result;
use scanedge_core::types::{DetectionResult, Quadrilateral};
use tracing::{debug, info, instrument, warn};

use crate::contour::find_contours;
use crate::preprocess::preprocess;
use crate::quad::select_best_quadrilateral;
use crate::stability::StabilityTracker;

/// Per-session document boundary detector.
///
/// Owns the mutable stability history, so independent scanning sessions get
/// independent detectors (or a `reset()` in between).
pub struct DocumentDetector {
    config: DetectionConfig,
    tracker: StabilityTracker,
}

impl DocumentDetector {
    pub fn new(config: DetectionConfig) -> Self {
        let tracker = StabilityTracker::new(&config);
        Self { config, tracker }
    }

    /// Run one detection pass over a frame.
    ///
    /// Never panics or propagates an error: a degenerate frame or an
    /// internal fault degrades to the "not detected" result so a live
    /// preview loop keeps running. Each non-detection also clears the
    /// stability history (a single missed frame resets the streak).
    #[instrument(skip(self, frame), fields(width = frame.width(), height = frame.height()))]
    pub fn detect(&mut self, frame: &DynamicImage) -> DetectionResult {
        match self.locate_quad(frame) {
            Ok(Some((quad, confidence))) => {
                let stable = self.tracker.observe(quad);
                info!(confidence, stable, "Document detected");
                DetectionResult::found(quad, confidence, stable)
            }
            Ok(None) => {
                debug!("No document boundary in frame");
                self.tracker.miss();
                DetectionResult::none()
            }
            Err(err) => {
                warn!(error = %err, "Detection pipeline fault; reporting not detected");
                self.tracker.miss();
                DetectionResult::none()
            }
        }
    }

    /// Clear the stability history. Call when a scanning session ends.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detection pipeline proper. Errors are distinguishable from a
    /// legitimate "no candidate" so `detect` can log faults before
    /// degrading them.
    fn locate_quad(&self, frame: &DynamicImage) -> Result<Option<(Quadrilateral, f32)>> {
        let map = preprocess(frame, self.config.analysis_width, self.config.edge_threshold)?;
        let contours = find_contours(
            &map,
            self.config.min_contour_points,
            self.config.max_trace_steps,
        );
        if contours.is_empty() {
            return Ok(None);
        }

        let selected = select_best_quadrilateral(
            &contours,
            map.width() as f32,
            map.height() as f32,
            &self.config,
        );

        // Detection runs at analysis resolution; results are reported in
        // full-frame coordinates.
        Ok(selected.map(|(quad, confidence)| (quad.scaled(map.frame_scale()), confidence)))
    }
}

impl Default for DocumentDetector {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

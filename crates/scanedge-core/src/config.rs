// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection pipeline configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the detection pipeline.
///
/// The defaults reproduce the reference scanner behaviour; hosts that persist
/// settings can serialize the whole struct alongside their other config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Frames wider than this are downscaled (aspect preserved) before
    /// analysis, bounding per-frame cost on constrained hardware.
    pub analysis_width: u32,
    /// Gradient magnitude cutoff for the binary edge map.
    pub edge_threshold: u8,
    /// Traced boundaries shorter than this many points are discarded as noise.
    pub min_contour_points: usize,
    /// Hard cap on boundary-trace steps, guarding against pathological maps.
    pub max_trace_steps: usize,
    /// Douglas-Peucker epsilon as a fraction of the contour point count.
    pub simplify_epsilon_ratio: f32,
    /// Candidate area must be at least this fraction of the frame area.
    pub min_area_ratio: f32,
    /// Candidate area must be at most this fraction of the frame area.
    pub max_area_ratio: f32,
    /// Consecutive consistent frames required before a detection is stable.
    pub stability_frames: usize,
    /// Per-corner movement tolerance in full-frame pixels.
    pub stability_tolerance: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            analysis_width: 640,
            edge_threshold: 50,
            min_contour_points: 50,
            max_trace_steps: 10_000,
            simplify_epsilon_ratio: 0.02,
            min_area_ratio: 0.10,
            max_area_ratio: 0.95,
            stability_frames: 5,
            stability_tolerance: 15.0,
        }
    }
}

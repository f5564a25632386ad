// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanedge engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanedgeError};

/// A 2D coordinate in the pixel space of a specific frame or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Four corners of a detected document boundary, in canonical cyclic order.
///
/// Produced only by the quadrilateral selector, which guarantees the corners
/// form a simple convex polygon in this order. Downstream geometry (the warp,
/// overlay drawing in the host app) relies on the labelling and does not
/// re-validate it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quadrilateral {
    pub fn new(
        top_left: Point,
        top_right: Point,
        bottom_right: Point,
        bottom_left: Point,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Corners in cyclic order: TL, TR, BR, BL.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Output canvas size implied by the quadrilateral's edge lengths:
    /// width is the longer of the top and bottom edges, height the longer of
    /// the left and right edges, both rounded to whole pixels.
    pub fn output_size(&self) -> (u32, u32) {
        let top = self.top_left.distance(&self.top_right);
        let bottom = self.bottom_left.distance(&self.bottom_right);
        let left = self.top_left.distance(&self.bottom_left);
        let right = self.top_right.distance(&self.bottom_right);

        let width = top.max(bottom).round() as u32;
        let height = left.max(right).round() as u32;
        (width, height)
    }

    /// Scale all four corners by a uniform factor (e.g. analysis resolution
    /// back to full frame resolution).
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |p: Point| Point::new(p.x * factor, p.y * factor);
        Self {
            top_left: scale(self.top_left),
            top_right: scale(self.top_right),
            bottom_right: scale(self.bottom_right),
            bottom_left: scale(self.bottom_left),
        }
    }
}

/// Outcome of one detection call on a single frame.
///
/// Invariants: `quad` is `None` iff `detected` is false, and `stable` is
/// always false when `detected` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether a plausible document boundary was found in this frame.
    pub detected: bool,
    /// The detected boundary, in full-frame pixel coordinates.
    pub quad: Option<Quadrilateral>,
    /// Score in [0, 1] combining normalized area and aspect-ratio closeness
    /// to the ISO A-series document ratio.
    pub confidence: f32,
    /// Whether the boundary has held still across recent frames.
    pub stable: bool,
}

impl DetectionResult {
    /// The "nothing detected" result (blank frame, degenerate input, or an
    /// internal fault degraded to a non-detection).
    pub fn none() -> Self {
        Self {
            detected: false,
            quad: None,
            confidence: 0.0,
            stable: false,
        }
    }

    pub fn found(quad: Quadrilateral, confidence: f32, stable: bool) -> Self {
        Self {
            detected: true,
            quad: Some(quad),
            confidence,
            stable,
        }
    }
}

/// Color treatment applied during document enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Keep the original RGB channels.
    Color,
    /// Collapse to luminance (R = G = B).
    Grayscale,
    /// Luminance thresholded at 128 to pure black or white.
    #[serde(rename = "bw")]
    BlackAndWhite,
}

/// Configuration for a document enhancement pass.
///
/// Every field must be supplied by the caller; the engine assumes no
/// defaults. `brightness` and `contrast` run 0–200 with 100 neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhancementOptions {
    pub mode: ColorMode,
    pub brightness: u32,
    pub contrast: u32,
    pub sharpen: bool,
    pub remove_background: bool,
}

impl EnhancementOptions {
    /// Reject out-of-range values up front rather than silently clamping.
    pub fn validate(&self) -> Result<()> {
        if self.brightness > 200 {
            return Err(ScanedgeError::InvalidOptions(format!(
                "brightness {} out of range 0-200",
                self.brightness
            )));
        }
        if self.contrast > 200 {
            return Err(ScanedgeError::InvalidOptions(format!(
                "contrast {} out of range 0-200",
                self.contrast
            )));
        }
        Ok(())
    }
}

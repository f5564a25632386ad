// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanedge-detect — Real-time document boundary detection.
//
// Pipeline: grayscale + Gaussian smoothing + Sobel gradients + thresholding
// (preprocess), Moore-neighbour boundary tracing (contour), Douglas-Peucker
// reduction (simplify), candidate filtering and scoring (quad), and temporal
// stability tracking across frames (stability). `DocumentDetector` ties the
// stages together behind a single per-frame call.

pub mod contour;
pub mod detector;
pub mod preprocess;
pub mod quad;
pub mod simplify;
pub mod stability;

// Re-export the primary entry points so callers can use `scanedge_detect::DocumentDetector`.
pub use detector::DocumentDetector;
pub use preprocess::EdgeMap;
pub use stability::StabilityTracker;

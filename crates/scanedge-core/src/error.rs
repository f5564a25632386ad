// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanedge.

use thiserror::Error;

/// Top-level error type for all Scanedge operations.
#[derive(Debug, Error)]
pub enum ScanedgeError {
    // -- Detection errors --
    #[error("frame has zero width or height")]
    EmptyFrame,

    #[error("detection pipeline failed: {0}")]
    Detection(String),

    // -- Correction errors --
    #[error("quadrilateral unsuitable for perspective correction: {0}")]
    DegenerateQuad(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Enhancement errors --
    #[error("invalid enhancement options: {0}")]
    InvalidOptions(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanedgeError>;

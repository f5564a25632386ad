// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanedge-correct — Capture-time geometry and pixel work: warping a
// detected quadrilateral onto an upright canvas (perspective) and applying
// scan-style visual enhancement (enhance).

pub mod enhance;
pub mod perspective;

pub use enhance::enhance_document;
pub use perspective::correct_perspective;

use image::{DynamicImage, RgbaImage};
use scanedge_core::error::Result;
use scanedge_core::types::{EnhancementOptions, Quadrilateral};
use tracing::instrument;

/// Warp and enhance in one call — the usual capture path.
///
/// Correction failures propagate so the caller can fall back to the
/// uncorrected capture instead of losing the photo.
#[instrument(skip(source, options))]
pub fn correct_and_enhance(
    source: &DynamicImage,
    quad: &Quadrilateral,
    output_size: Option<(u32, u32)>,
    options: &EnhancementOptions,
) -> Result<RgbaImage> {
    let mut corrected = correct_perspective(source, quad, output_size)?;
    enhance_document(&mut corrected, options)?;
    Ok(corrected)
}

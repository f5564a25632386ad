// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective correction — maps a detected quadrilateral onto an upright
// rectangular canvas. Direct inverse bilinear sampling rather than a full
// projective matrix: for document photos the depth distortion across the
// quad is adequately approximated by blending the four corners.

use image::{DynamicImage, Rgba, RgbaImage};
use scanedge_core::error::{Result, ScanedgeError};
use scanedge_core::types::Quadrilateral;
use tracing::{debug, info, instrument};

/// Warp the quad region of `source` into an upright rectangle.
///
/// When `output_size` is not supplied, dimensions derive from the quad's
/// edge lengths (`Quadrilateral::output_size`). For every destination pixel
/// the source coordinate is bilinearly interpolated from the four corners,
/// then sampled with 2x2 bilinear pixel interpolation per RGBA channel.
#[instrument(skip(source, quad), fields(src_w = source.width(), src_h = source.height()))]
pub fn correct_perspective(
    source: &DynamicImage,
    quad: &Quadrilateral,
    output_size: Option<(u32, u32)>,
) -> Result<RgbaImage> {
    if source.width() == 0 || source.height() == 0 {
        return Err(ScanedgeError::EmptyFrame);
    }

    let (out_w, out_h) = output_size.unwrap_or_else(|| quad.output_size());
    if out_w == 0 || out_h == 0 {
        return Err(ScanedgeError::DegenerateQuad(format!(
            "output canvas {}x{}",
            out_w, out_h
        )));
    }
    debug!(out_w, out_h, "Warping quadrilateral");

    let rgba = source.to_rgba8();
    let mut output = RgbaImage::new(out_w, out_h);

    for y in 0..out_h {
        // Guard the one-pixel axis: a single row/column samples the top/left edge.
        let v = if out_h > 1 {
            y as f32 / (out_h - 1) as f32
        } else {
            0.0
        };
        for x in 0..out_w {
            let u = if out_w > 1 {
                x as f32 / (out_w - 1) as f32
            } else {
                0.0
            };

            let src_x = (1.0 - u) * (1.0 - v) * quad.top_left.x
                + u * (1.0 - v) * quad.top_right.x
                + u * v * quad.bottom_right.x
                + (1.0 - u) * v * quad.bottom_left.x;
            let src_y = (1.0 - u) * (1.0 - v) * quad.top_left.y
                + u * (1.0 - v) * quad.top_right.y
                + u * v * quad.bottom_right.y
                + (1.0 - u) * v * quad.bottom_left.y;

            output.put_pixel(x, y, sample_bilinear(&rgba, src_x, src_y));
        }
    }

    info!(out_w, out_h, "Perspective correction applied");
    Ok(output)
}

/// 2x2 bilinear sample at a fractional source coordinate, clamping neighbour
/// indices to the image bounds.
fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let max_x = (image.width() - 1) as f32;
    let max_y = (image.height() - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = image.get_pixel(x0, y0).0;
    let p10 = image.get_pixel(x1, y0).0;
    let p01 = image.get_pixel(x0, y1).0;
    let p11 = image.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for channel in 0..4 {
        let top = p00[channel] as f32 * (1.0 - fx) + p10[channel] as f32 * fx;
        let bottom = p01[channel] as f32 * (1.0 - fx) + p11[channel] as f32 * fx;
        out[channel] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

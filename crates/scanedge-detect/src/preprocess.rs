// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame preprocessing — luminance grayscale, Gaussian smoothing, Sobel
// gradient magnitude, and binary thresholding. Produces the edge map the
// contour tracer walks.

use image::DynamicImage;
use image::imageops::FilterType;
use scanedge_core::error::{Result, ScanedgeError};
use tracing::{debug, instrument};

/// Binary edge map at analysis resolution.
///
/// `frame_scale` converts analysis coordinates back to full-frame pixel
/// coordinates (1.0 when the frame was small enough to analyse directly).
pub struct EdgeMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
    frame_scale: f32,
}

impl EdgeMap {
    /// Wrap a prebuilt binary map. `data` is row-major, one byte per pixel,
    /// 0 or 255.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>, frame_scale: f32) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data,
            frame_scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_scale(&self) -> f32 {
        self.frame_scale
    }

    /// Whether the pixel at (x, y) is an edge pixel. Out-of-bounds
    /// coordinates are not edges.
    pub fn is_edge(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.data[(y as u32 * self.width + x as u32) as usize] == 255
    }
}

/// Preprocess a frame into a binary edge map.
///
/// Frames wider than `analysis_width` are downscaled (aspect preserved)
/// before analysis. The stages run in fixed order: luminance grayscale,
/// 3x3 Gaussian smoothing (interior pixels only), Sobel gradient magnitude,
/// and a binary threshold at `edge_threshold`.
#[instrument(skip(frame), fields(width = frame.width(), height = frame.height()))]
pub fn preprocess(
    frame: &DynamicImage,
    analysis_width: u32,
    edge_threshold: u8,
) -> Result<EdgeMap> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(ScanedgeError::EmptyFrame);
    }

    let resized;
    let source: &DynamicImage = if frame.width() > analysis_width {
        resized = frame.resize(analysis_width, u32::MAX, FilterType::Triangle);
        &resized
    } else {
        frame
    };

    let rgba = source.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ScanedgeError::EmptyFrame);
    }
    let frame_scale = frame.width() as f32 / width as f32;
    debug!(width, height, frame_scale, "Frame scaled for analysis");

    // Luminance grayscale, ITU-R BT.601 weights.
    let mut gray = vec![0u8; (width * height) as usize];
    for (i, pixel) in rgba.pixels().enumerate() {
        let [r, g, b, _] = pixel.0;
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        gray[i] = luma.round().min(255.0) as u8;
    }

    let blurred = gaussian_3x3(&gray, width, height);
    let magnitude = sobel_magnitude(&blurred, width, height);

    let data: Vec<u8> = magnitude
        .iter()
        .map(|&m| if m > edge_threshold { 255 } else { 0 })
        .collect();

    debug!(
        edge_pixels = data.iter().filter(|&&v| v == 255).count(),
        "Edge map built"
    );

    Ok(EdgeMap {
        width,
        height,
        data,
        frame_scale,
    })
}

/// 3x3 Gaussian smoothing with kernel [1,2,1, 2,4,2, 1,2,1] / 16.
/// The 1-pixel border is left untouched.
fn gaussian_3x3(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut dst = src.to_vec();
    if w < 3 || h < 3 {
        return dst;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let at = |dx: isize, dy: isize| -> u32 {
                src[(y as isize + dy) as usize * w + (x as isize + dx) as usize] as u32
            };
            let sum = at(-1, -1)
                + 2 * at(0, -1)
                + at(1, -1)
                + 2 * at(-1, 0)
                + 4 * at(0, 0)
                + 2 * at(1, 0)
                + at(-1, 1)
                + 2 * at(0, 1)
                + at(1, 1);
            dst[y * w + x] = (sum / 16) as u8;
        }
    }
    dst
}

/// Sobel gradient magnitude, clamped to 255. The 1-pixel border stays zero.
fn sobel_magnitude(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut dst = vec![0u8; w * h];
    if w < 3 || h < 3 {
        return dst;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let at = |dx: isize, dy: isize| -> i32 {
                src[(y as isize + dy) as usize * w + (x as isize + dx) as usize] as i32
            };
            let gx = -at(-1, -1) + at(1, -1) - 2 * at(-1, 0) + 2 * at(1, 0) - at(-1, 1)
                + at(1, 1);
            let gy = -at(-1, -1) - 2 * at(0, -1) - at(1, -1)
                + at(-1, 1)
                + 2 * at(0, 1)
                + at(1, 1);
            let magnitude = ((gx * gx + gy * gy) as f32).sqrt().min(255.0);
            dst[y * w + x] = magnitude as u8;
        }
    }
    dst
}

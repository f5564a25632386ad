// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document enhancement — brightness/contrast/color-mode transform, optional
// midtone background flattening, optional convolution sharpening. Mutates
// the capture canvas in place.

use image::RgbaImage;
use scanedge_core::error::Result;
use scanedge_core::types::{ColorMode, EnhancementOptions};
use tracing::{debug, info, instrument};

/// Luminance weights, ITU-R BT.601.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Apply scan-style enhancement to an image in place.
///
/// Per pixel, in order: brightness (factor `brightness/100` on R, G, B),
/// contrast (linear remap around 128), color mode (grayscale collapses to
/// luminance, black-and-white additionally thresholds at 128), optional
/// midtone background flattening, then clamp and round. A separate sharpen
/// convolution pass runs afterwards when requested.
#[instrument(skip(image, options), fields(width = image.width(), height = image.height(), mode = ?options.mode))]
pub fn enhance_document(image: &mut RgbaImage, options: &EnhancementOptions) -> Result<()> {
    options.validate()?;

    let brightness_factor = options.brightness as f32 / 100.0;
    let contrast_factor = (options.contrast as f32 - 100.0) / 100.0 * 255.0;
    let contrast_scale = (255.0 + contrast_factor) / 255.0;

    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let mut r = r as f32 * brightness_factor;
        let mut g = g as f32 * brightness_factor;
        let mut b = b as f32 * brightness_factor;

        r = (r - 128.0) * contrast_scale + 128.0;
        g = (g - 128.0) * contrast_scale + 128.0;
        b = (b - 128.0) * contrast_scale + 128.0;

        match options.mode {
            ColorMode::Color => {}
            ColorMode::Grayscale => {
                let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
                r = luma;
                g = luma;
                b = luma;
            }
            ColorMode::BlackAndWhite => {
                let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
                let value = if luma >= 128.0 { 255.0 } else { 0.0 };
                r = value;
                g = value;
                b = value;
            }
        }

        if options.remove_background {
            // Flatten shadowed paper midtones without blowing out bright
            // regions or lifting ink.
            let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            if luma > 40.0 && luma < 180.0 {
                let boost = 1.0 + (180.0 - luma) / 400.0;
                r *= boost;
                g *= boost;
                b *= boost;
            }
        }

        pixel.0 = [quantize(r), quantize(g), quantize(b), a];
    }

    if options.sharpen {
        sharpen(image);
        debug!("Sharpen pass applied");
    }

    info!("Enhancement complete");
    Ok(())
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// 3x3 sharpen convolution [0,-1,0, -1,5,-1, 0,-1,0] on R, G, B.
///
/// Reads from a snapshot of the pre-pass pixels so already-rewritten
/// neighbours never feed back into the same pass. The outermost pixel ring
/// is left unconvolved, matching the preprocessing boundary policy.
fn sharpen(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return;
    }
    let snapshot = image.clone();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = snapshot.get_pixel(x, y).0;
            let left = snapshot.get_pixel(x - 1, y).0;
            let right = snapshot.get_pixel(x + 1, y).0;
            let above = snapshot.get_pixel(x, y - 1).0;
            let below = snapshot.get_pixel(x, y + 1).0;

            let mut out = center;
            for channel in 0..3 {
                let value = 5.0 * center[channel] as f32
                    - left[channel] as f32
                    - right[channel] as f32
                    - above[channel] as f32
                    - below[channel] as f32;
                out[channel] = quantize(value);
            }
            image.put_pixel(x, y, image::Rgba(out));
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the scanedge-detect crate. Benchmarks one full
// detection pass on a synthetic camera-sized frame, the realistic per-frame
// cost a live preview loop pays.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use scanedge_detect::DocumentDetector;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One detection pass on a 1280x960 frame holding a clear white rectangle.
///
/// The frame is downscaled to the 640px analysis width first, so this
/// exercises the scaling, edge map, tracing, and selection stages together.
fn bench_detect_document(c: &mut Criterion) {
    let (width, height) = (1280u32, 960u32);
    let mut img = RgbaImage::from_pixel(width, height, Rgba([20, 20, 20, 255]));
    for y in 120..840 {
        for x in 160..1120 {
            img.put_pixel(x, y, Rgba([240, 240, 240, 255]));
        }
    }
    let frame = DynamicImage::ImageRgba8(img);

    c.bench_function("detect_document (1280x960)", |b| {
        let mut detector = DocumentDetector::default();
        b.iter(|| {
            let result = detector.detect(black_box(&frame));
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_detect_document);
criterion_main!(benches);

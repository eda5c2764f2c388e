// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background normaliser — composites a segmented cutout onto an opaque
// white canvas, with automatic fallback to the local classifier.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::{debug, info, instrument, warn};

use passbild_core::config::ClassifierConfig;
use passbild_core::error::{PassbildError, Result};

use super::segmenter::{Segmenter, ThresholdSegmenter};

// Progress milestones reported to the callback. Strictly increasing so the
// wizard's progress bar never moves backwards.
const PROGRESS_START: u8 = 0;
const PROGRESS_PREPARED: u8 = 10;
const PROGRESS_SEGMENTED: u8 = 70;
const PROGRESS_COMPOSITED: u8 = 95;
const PROGRESS_DONE: u8 = 100;

/// Produces a copy of the source photo with the subject isolated on an
/// opaque white background.
///
/// The primary path delegates to the configured [`Segmenter`]; if that
/// fails for any reason the conservative [`ThresholdSegmenter`] takes over
/// so the user's photo is never dropped. Output dimensions always equal
/// input dimensions and every output pixel is fully opaque.
///
/// The normaliser holds no per-call state: overlapping calls cannot corrupt
/// each other, and a superseded call's result is simply discarded by the
/// caller (last resolved wins).
pub struct BackgroundNormalizer<S: Segmenter> {
    segmenter: S,
    fallback: ThresholdSegmenter,
}

impl<S: Segmenter> BackgroundNormalizer<S> {
    pub fn new(segmenter: S) -> Self {
        Self::with_classifier(segmenter, ClassifierConfig::default())
    }

    /// Use non-default thresholds for the fallback classifier.
    pub fn with_classifier(segmenter: S, config: ClassifierConfig) -> Self {
        Self {
            segmenter,
            fallback: ThresholdSegmenter::new(config),
        }
    }

    /// Isolate the subject and flatten it onto white.
    ///
    /// `on_progress` receives milestone values from 0 to 100, monotonically
    /// increasing, spanning the prepare / segment / composite phases.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub async fn normalize(
        &self,
        image: &DynamicImage,
        mut on_progress: impl FnMut(u8),
    ) -> Result<DynamicImage> {
        on_progress(PROGRESS_START);
        let canvas = white_canvas(image.width(), image.height())?;
        on_progress(PROGRESS_PREPARED);

        let cutout = match self.segmenter.segment(image).await {
            Ok(cutout) => {
                info!(segmenter = self.segmenter.name(), "Segmentation complete");
                cutout
            }
            Err(err) => {
                warn!(
                    segmenter = self.segmenter.name(),
                    error = %err,
                    "Segmentation failed, falling back to threshold classifier"
                );
                self.fallback.segment(image).await?
            }
        };
        on_progress(PROGRESS_SEGMENTED);

        let flattened = composite_onto(canvas, &cutout);
        on_progress(PROGRESS_COMPOSITED);

        debug!("Background normalisation complete");
        on_progress(PROGRESS_DONE);
        Ok(DynamicImage::ImageRgba8(flattened))
    }

    /// Skip mode: no classification at all, only flatten onto white.
    ///
    /// Handles source images that carry transparency. Deterministic: the
    /// same input always yields pixel-identical output.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn normalize_skipped(&self, image: &DynamicImage) -> Result<DynamicImage> {
        let canvas = white_canvas(image.width(), image.height())?;
        let flattened = composite_onto(canvas, &image.to_rgba8());
        debug!("Flattened image onto white without classification");
        Ok(DynamicImage::ImageRgba8(flattened))
    }
}

/// Allocate an opaque white canvas, failing with `SurfaceUnavailable` when
/// no sensible surface of that size can exist.
fn white_canvas(width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PassbildError::SurfaceUnavailable(format!(
            "cannot allocate a {}x{} canvas",
            width, height
        )));
    }
    Ok(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, 255]),
    ))
}

/// Alpha-composite `cutout` over the canvas, returning an opaque result.
fn composite_onto(mut canvas: RgbaImage, cutout: &RgbaImage) -> RgbaImage {
    for (x, y, pixel) in cutout.enumerate_pixels() {
        if x >= canvas.width() || y >= canvas.height() {
            continue;
        }
        let Rgba([r, g, b, a]) = *pixel;
        let blended = match a {
            255 => Rgba([r, g, b, 255]),
            0 => *canvas.get_pixel(x, y),
            _ => {
                let alpha = f32::from(a) / 255.0;
                let inv = 1.0 - alpha;
                let bg = canvas.get_pixel(x, y);
                Rgba([
                    (f32::from(r) * alpha + f32::from(bg[0]) * inv) as u8,
                    (f32::from(g) * alpha + f32::from(bg[1]) * inv) as u8,
                    (f32::from(b) * alpha + f32::from(bg[2]) * inv) as u8,
                    255,
                ])
            }
        };
        canvas.put_pixel(x, y, blended);
    }
    canvas
}

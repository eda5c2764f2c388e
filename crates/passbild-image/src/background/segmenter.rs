// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segmentation strategies — foreground extraction as an alpha-masked cutout.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use passbild_core::config::ClassifierConfig;
use passbild_core::error::Result;

/// A strategy that isolates the photo subject from its background.
///
/// Implementations return a cutout with the same dimensions as the input:
/// foreground pixels keep their colour and opacity, background pixels get
/// alpha 0. A remote/ML-backed capability plugs in through this trait; it
/// may fail or time out, in which case the normaliser falls back to the
/// local [`ThresholdSegmenter`].
#[allow(async_fn_in_trait)]
pub trait Segmenter {
    /// Strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Produce the foreground cutout.
    async fn segment(&self, image: &DynamicImage) -> Result<RgbaImage>;
}

/// Local heuristic classifier: near-white pixels become transparent.
///
/// A pixel is classified as background only when every RGB channel is at or
/// above `brightness_threshold` and the largest pairwise channel difference
/// is below `channel_tolerance`. The defaults (240/10) are deliberately
/// conservative: a looser threshold erases skin and hair highlights, which
/// looks far worse on the final print than a slightly grey background that
/// survives. Known limitation, not a bug.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdSegmenter {
    config: ClassifierConfig,
}

impl ThresholdSegmenter {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Whether a single pixel counts as background under this classifier.
    pub fn is_background(&self, r: u8, g: u8, b: u8) -> bool {
        let t = self.config.brightness_threshold;
        let bright = r >= t && g >= t && b >= t;
        let spread = r.abs_diff(g).max(g.abs_diff(b)).max(r.abs_diff(b));
        bright && spread < self.config.channel_tolerance
    }
}

impl Segmenter for ThresholdSegmenter {
    fn name(&self) -> &'static str {
        "threshold-classifier"
    }

    async fn segment(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let rgba = image.to_rgba8();
        let mut background_count = 0u64;

        let cutout = RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            if self.is_background(r, g, b) {
                background_count += 1;
                Rgba([r, g, b, 0])
            } else {
                Rgba([r, g, b, a])
            }
        });

        debug!(
            width = cutout.width(),
            height = cutout.height(),
            background_count,
            "Threshold classification complete"
        );
        Ok(cutout)
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::types::SheetFormat;
use crate::units::PRINT_DPI;

/// Tunable parameters of the photo pipeline.
///
/// The defaults reproduce the behaviour the rest of the documentation
/// describes; callers normally use `PipelineConfig::default()` and override
/// individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Print resolution in dots per inch.
    pub dpi: u32,
    pub classifier: ClassifierConfig,
    pub crop: CropConfig,
    pub sheet: SheetConfig,
}

/// Parameters of the conservative white-background classifier.
///
/// The defaults (240 brightness, 10 channel delta) were tuned empirically:
/// a lower threshold caused visible artifacting on skin and hair
/// highlights. There is no formal derivation behind the numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// A pixel counts as background only if every RGB channel is at or
    /// above this value.
    pub brightness_threshold: u8,
    /// ...and the largest pairwise channel difference is below this value.
    pub channel_tolerance: u8,
}

/// Crop-region sizing limits, in display pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CropConfig {
    /// Region width when a freshly loaded image is first shown.
    pub initial_width: f64,
    /// Lower bound of the size control.
    pub min_width: f64,
    /// Upper bound of the size control. Should not exceed the display
    /// width, or the region stops fitting inside the image.
    pub max_width: f64,
}

/// Print-sheet geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetConfig {
    pub format: SheetFormat,
    /// Gap between photo cells, in print pixels.
    pub margin_px: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dpi: PRINT_DPI,
            classifier: ClassifierConfig::default(),
            crop: CropConfig::default(),
            sheet: SheetConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            brightness_threshold: 240,
            channel_tolerance: 10,
        }
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            initial_width: 200.0,
            min_width: 100.0,
            max_width: 300.0,
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            format: SheetFormat::FourR,
            margin_px: 20,
        }
    }
}

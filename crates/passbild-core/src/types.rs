// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Passbild photo pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{PassbildError, Result};
use crate::units;

/// Per-country photo requirement: physical size plus compliance metadata.
///
/// Immutable reference data, normally supplied by the requirement catalog
/// (built-in or external via [`PhotoSpec::from_json`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSpec {
    /// Country or document the requirement applies to.
    pub country: String,
    /// Photo width in millimetres.
    pub width_mm: f64,
    /// Photo height in millimetres.
    pub height_mm: f64,
    /// Required background colour (almost always white).
    pub background: String,
    /// Required head height as a percentage of photo height, if specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_height_percent: Option<f64>,
    /// Free-form compliance notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PhotoSpec {
    /// Width-over-height aspect ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }

    /// Pixel dimensions of this photo at the given print resolution.
    pub fn dimensions_px(&self, dpi: u32) -> (u32, u32) {
        (
            units::mm_to_px(self.width_mm, dpi),
            units::mm_to_px(self.height_mm, dpi),
        )
    }

    /// Check the invariants the rest of the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if !(self.width_mm.is_finite() && self.width_mm > 0.0) {
            return Err(PassbildError::InvalidSpec(format!(
                "{}: width_mm must be positive and finite, got {}",
                self.country, self.width_mm
            )));
        }
        if !(self.height_mm.is_finite() && self.height_mm > 0.0) {
            return Err(PassbildError::InvalidSpec(format!(
                "{}: height_mm must be positive and finite, got {}",
                self.country, self.height_mm
            )));
        }
        Ok(())
    }

    /// Parse a spec from JSON supplied by an external requirement catalog.
    pub fn from_json(data: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(data)?;
        spec.validate()?;
        Ok(spec)
    }
}

/// On-screen size of the rendered source image, in display pixels.
///
/// Display space generally differs from the decoded bitmap's natural pixel
/// grid by a uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangular region of interest in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Width-over-height ratio of the region.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Standard photo-paper sheet formats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SheetFormat {
    /// 4R photo paper: 4" x 6", the fixed print target of the pipeline.
    FourR,
    Custom { width_in: f64, height_in: f64 },
}

impl SheetFormat {
    /// Sheet dimensions in inches (width, height).
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            Self::FourR => (4.0, 6.0),
            Self::Custom { width_in, height_in } => (*width_in, *height_in),
        }
    }

    /// Sheet dimensions in pixels at the given print resolution.
    ///
    /// 4R at 300 DPI is 1200 x 1800.
    pub fn dimensions_px(&self, dpi: u32) -> (u32, u32) {
        let (w_in, h_in) = self.dimensions_in();
        (
            (w_in * f64::from(dpi)).ceil() as u32,
            (h_in * f64::from(dpi)).ceil() as u32,
        )
    }
}

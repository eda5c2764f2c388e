// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background module — segmentation strategies and the white-background
// normaliser.

pub mod normalizer;
pub mod segmenter;

pub use normalizer::BackgroundNormalizer;
pub use segmenter::{Segmenter, ThresholdSegmenter};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// passbild-sheet — Print-sheet composition for the Passbild pipeline.
//
// Tiles a rendered photo into the maximal centered grid that fits on a 4R
// (4" x 6") sheet at print resolution, draws per-copy borders, dashed cut
// guides along the internal grid lines, and a bottom-centered caption.

pub mod composer;
pub mod draw;

pub use composer::{LayoutComposer, LayoutSheet};
pub use draw::CaptionFont;

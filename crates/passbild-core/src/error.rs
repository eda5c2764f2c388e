// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Passbild.

use thiserror::Error;

/// Top-level error type for all Passbild operations.
#[derive(Debug, Error)]
pub enum PassbildError {
    // -- Image errors --
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("could not allocate a drawing surface: {0}")]
    SurfaceUnavailable(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Background removal --
    #[error("background segmentation failed: {0}")]
    Segmentation(String),

    // -- Sheet composition --
    #[error("caption font unavailable: {0}")]
    Font(String),

    // -- Reference data --
    #[error("invalid photo spec: {0}")]
    InvalidSpec(String),

    // -- Storage / interchange --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PassbildError>;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Passbild — Core types, unit conversion, and error definitions shared
// across all crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;
pub mod units;

pub use config::PipelineConfig;
pub use error::PassbildError;
pub use types::*;

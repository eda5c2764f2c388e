// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in country requirement catalog.

use crate::types::PhotoSpec;

/// Raw catalog rows. Kept as `&'static str` so the table stays a plain
/// const; `builtin` materialises owned specs from it.
const ENTRIES: &[(&str, f64, f64, Option<f64>, &str)] = &[
    (
        "United States",
        35.0,
        45.0,
        Some(70.0),
        "Head must be between 25-35mm from chin to top of head",
    ),
    (
        "United Kingdom",
        35.0,
        45.0,
        Some(70.0),
        "Must be taken against a plain light grey or cream background",
    ),
    (
        "Canada",
        35.0,
        45.0,
        Some(70.0),
        "Head must measure 31-36mm from chin to crown",
    ),
    (
        "Australia",
        35.0,
        45.0,
        Some(70.0),
        "Head must be 32-36mm from bottom of chin to top of head",
    ),
    (
        "Germany",
        35.0,
        45.0,
        Some(70.0),
        "Biometric passport photo requirements",
    ),
    (
        "France",
        35.0,
        45.0,
        Some(70.0),
        "Must comply with ICAO standards",
    ),
    (
        "Japan",
        35.0,
        45.0,
        Some(70.0),
        "Photo must be taken within 6 months",
    ),
    (
        "China",
        33.0,
        48.0,
        Some(70.0),
        "Specific size requirements for Chinese visa",
    ),
    (
        "India",
        35.0,
        45.0,
        Some(70.0),
        "Must be recent and show full face",
    ),
    (
        "Singapore",
        35.0,
        45.0,
        Some(70.0),
        "Standard passport photo size",
    ),
];

/// All built-in country requirements.
pub fn builtin() -> Vec<PhotoSpec> {
    ENTRIES
        .iter()
        .map(|&(country, width_mm, height_mm, head, notes)| PhotoSpec {
            country: country.to_string(),
            width_mm,
            height_mm,
            background: "white".to_string(),
            head_height_percent: head,
            notes: Some(notes.to_string()),
        })
        .collect()
}

/// Look up a built-in requirement by country name (case-insensitive).
pub fn find(country: &str) -> Option<PhotoSpec> {
    builtin()
        .into_iter()
        .find(|spec| spec.country.eq_ignore_ascii_case(country))
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the photo wizard.
//
// Every technical error is mapped to plain English with a clear suggestion,
// so the presentation layer never shows a raw error string to the user.

use crate::error::PassbildError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worked around automatically (e.g. segmentation fell back to the
    /// local classifier) — inform, don't block.
    Degraded,
    /// User must do something (pick a different photo, fix the file).
    ActionRequired,
    /// Cannot be fixed by retrying or user action.
    Permanent,
}

/// A human-readable error with a plain English message and suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying the same step can help.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `PassbildError` into something the wizard can show directly.
pub fn humanize_error(err: &PassbildError) -> HumanError {
    match err {
        PassbildError::Decode(detail) => HumanError {
            message: "We couldn't read that photo.".into(),
            suggestion: format!(
                "Make sure the file is a JPEG or PNG image and try uploading it again. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PassbildError::SurfaceUnavailable(detail) => HumanError {
            message: "There isn't enough room to process this photo.".into(),
            suggestion: format!("Try a smaller photo, or restart the app. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        PassbildError::Encode(detail) => HumanError {
            message: "We couldn't save the finished image.".into(),
            suggestion: format!("Try generating it again. ({detail})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        PassbildError::Segmentation(detail) => HumanError {
            message: "Automatic background removal didn't work.".into(),
            suggestion: format!(
                "We used a simpler white-background cleanup instead. For best results, \
                 take the photo against a plain bright wall. ({detail})"
            ),
            retriable: true,
            severity: Severity::Degraded,
        },

        PassbildError::Font(detail) => HumanError {
            message: "The print sheet was created without its caption.".into(),
            suggestion: format!(
                "No usable caption font was found. The photos themselves are unaffected. ({detail})"
            ),
            retriable: false,
            severity: Severity::Degraded,
        },

        PassbildError::InvalidSpec(detail) => HumanError {
            message: "This country's photo requirements look wrong.".into(),
            suggestion: format!("Pick a different country, or report the problem. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        PassbildError::Io(detail) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check the file still exists and try again. ({detail})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        PassbildError::Serialization(detail) => HumanError {
            message: "The photo requirement data couldn't be understood.".into(),
            suggestion: format!("The catalog entry appears malformed. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

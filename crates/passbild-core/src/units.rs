// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unit conversion between millimetres, display pixels, natural-image
// pixels, and print dots.

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Print resolution used throughout the pipeline.
pub const PRINT_DPI: u32 = 300;

/// Convert a physical length in millimetres to a whole pixel count at the
/// given resolution.
///
/// Fractional pixel counts round up. The renderer and the sheet composer
/// both derive their dimensions from this function, so a photo cell can
/// never end up one pixel wider than the slot the composer reserved for it.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm * f64::from(dpi) / MM_PER_INCH).ceil() as u32
}

/// Map a coordinate from display space to natural-image space.
///
/// The on-screen rendering of an image is a uniformly scaled copy of the
/// decoded bitmap; `natural / display` is that scale factor per axis.
pub fn display_to_natural(value: f64, natural: u32, display: f64) -> f64 {
    value * f64::from(natural) / display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_to_px_rounds_up() {
        // 35 mm at 300 DPI is 413.39 dots; 45 mm is 531.50.
        assert_eq!(mm_to_px(35.0, 300), 414);
        assert_eq!(mm_to_px(45.0, 300), 532);
    }

    #[test]
    fn mm_to_px_exact_inches_need_no_rounding() {
        assert_eq!(mm_to_px(25.4, 300), 300);
        assert_eq!(mm_to_px(50.8, 300), 600);
        // The 4R sheet: 4" x 6".
        assert_eq!(mm_to_px(4.0 * 25.4, 300), 1200);
        assert_eq!(mm_to_px(6.0 * 25.4, 300), 1800);
    }

    #[test]
    fn mm_to_px_matches_ceil_formula() {
        for mm in [1.0_f64, 33.0, 35.0, 45.0, 48.0, 100.0] {
            let expected = (mm * 300.0 / 25.4).ceil() as u32;
            assert_eq!(mm_to_px(mm, 300), expected);
        }
    }

    #[test]
    fn display_to_natural_scales_linearly() {
        // A 640-wide image shown at 320 display units: factor 2.
        assert_eq!(display_to_natural(50.0, 640, 320.0), 100.0);
        // Identity when display equals natural size.
        assert_eq!(display_to_natural(123.0, 640, 640.0), 123.0);
    }
}

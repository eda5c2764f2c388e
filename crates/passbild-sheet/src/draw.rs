// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Low-level sheet drawing — dashed cut guides and caption text.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info};

use passbild_core::error::{PassbildError, Result};

/// Well-known font locations tried by [`CaptionFont::from_system`].
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// An owned TrueType/OpenType font used for the sheet caption.
#[derive(Debug)]
pub struct CaptionFont {
    font: FontVec,
}

impl CaptionFont {
    /// Parse a font from raw TTF/OTF bytes supplied by the caller.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|err| PassbildError::Font(format!("could not parse font data: {}", err)))?;
        Ok(Self { font })
    }

    /// Try a list of well-known system font paths, first parseable wins.
    pub fn from_system() -> Result<Self> {
        for path in SYSTEM_FONT_CANDIDATES {
            let Ok(data) = std::fs::read(path) else {
                continue;
            };
            match Self::from_bytes(data) {
                Ok(font) => {
                    info!(path, "Loaded caption font");
                    return Ok(font);
                }
                Err(err) => debug!(path, error = %err, "Font candidate rejected"),
            }
        }
        Err(PassbildError::Font(
            "no usable font found in the well-known system locations".into(),
        ))
    }

    pub(crate) fn as_font(&self) -> &FontVec {
        &self.font
    }
}

/// Measure the pixel width of a string at the given scale.
pub(crate) fn measure_text_width(font: &FontVec, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Draw text horizontally centered on the canvas, top edge at `y`.
pub(crate) fn draw_centered_text(
    canvas: &mut RgbaImage,
    font: &CaptionFont,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let text_width = measure_text_width(font.as_font(), scale, text) as i32;
    let x = ((canvas.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(canvas, color, x, y, scale, font.as_font(), text);
}

/// Draw a vertical dashed line spanning the full canvas height.
pub(crate) fn draw_dashed_vline(
    canvas: &mut RgbaImage,
    x: u32,
    dash_len: u32,
    gap_len: u32,
    color: Rgba<u8>,
) {
    if x >= canvas.width() {
        return;
    }
    let height = canvas.height();
    let mut y = 0u32;
    let mut drawing = true;

    while y < height {
        let segment = if drawing { dash_len } else { gap_len };
        if drawing {
            for dy in 0..segment.min(height - y) {
                canvas.put_pixel(x, y + dy, color);
            }
        }
        y += segment;
        drawing = !drawing;
    }
}

/// Draw a horizontal dashed line spanning the full canvas width.
pub(crate) fn draw_dashed_hline(
    canvas: &mut RgbaImage,
    y: u32,
    dash_len: u32,
    gap_len: u32,
    color: Rgba<u8>,
) {
    if y >= canvas.height() {
        return;
    }
    let width = canvas.width();
    let mut x = 0u32;
    let mut drawing = true;

    while x < width {
        let segment = if drawing { dash_len } else { gap_len };
        if drawing {
            for dx in 0..segment.min(width - x) {
                canvas.put_pixel(x + dx, y, color);
            }
        }
        x += segment;
        drawing = !drawing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: Rgba<u8> = Rgba([156, 163, 175, 255]);

    #[test]
    fn dashed_vline_alternates_dashes_and_gaps() {
        let mut canvas = RgbaImage::from_pixel(10, 20, Rgba([255, 255, 255, 255]));
        draw_dashed_vline(&mut canvas, 5, 5, 5, GUIDE);

        for y in 0..5 {
            assert_eq!(*canvas.get_pixel(5, y), GUIDE);
        }
        for y in 5..10 {
            assert_eq!(*canvas.get_pixel(5, y), Rgba([255, 255, 255, 255]));
        }
        for y in 10..15 {
            assert_eq!(*canvas.get_pixel(5, y), GUIDE);
        }
    }

    #[test]
    fn dashed_hline_stays_on_its_row() {
        let mut canvas = RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255]));
        draw_dashed_hline(&mut canvas, 3, 4, 2, GUIDE);

        assert_eq!(*canvas.get_pixel(0, 3), GUIDE);
        assert_eq!(*canvas.get_pixel(0, 2), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(0, 4), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn out_of_bounds_lines_are_ignored() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        draw_dashed_vline(&mut canvas, 10, 5, 5, GUIDE);
        draw_dashed_hline(&mut canvas, 99, 5, 5, GUIDE);
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let err = CaptionFont::from_bytes(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, PassbildError::Font(_)));
    }
}

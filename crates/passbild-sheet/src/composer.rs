// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout composer — tiles a rendered photo into a cut-ready grid on a
// fixed-size print sheet.

use ab_glyph::PxScale;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::{info, instrument, warn};

use passbild_core::config::SheetConfig;
use passbild_core::error::Result;
use passbild_core::types::PhotoSpec;
use passbild_image::{RenderedPhoto, encode_jpeg, encode_png};

use crate::draw::{CaptionFont, draw_centered_text, draw_dashed_hline, draw_dashed_vline};

/// 1 px border around each photo copy.
const BORDER_COLOR: Rgba<u8> = Rgba([229, 231, 235, 255]);

/// Dashed cut guides along internal grid lines.
const GUIDE_COLOR: Rgba<u8> = Rgba([156, 163, 175, 255]);
const GUIDE_DASH: u32 = 5;
const GUIDE_GAP: u32 = 5;

/// Caption text colour and sizes.
const CAPTION_COLOR: Rgba<u8> = Rgba([107, 114, 128, 255]);
const CAPTION_INFO_SIZE: f32 = 24.0;
const CAPTION_COUNT_SIZE: f32 = 18.0;

/// Composes print sheets from a single rendered photo.
///
/// Deterministic: identical inputs always produce the identical sheet.
pub struct LayoutComposer {
    config: SheetConfig,
    dpi: u32,
    font: Option<CaptionFont>,
}

impl LayoutComposer {
    pub fn new(config: SheetConfig, dpi: u32) -> Self {
        Self {
            config,
            dpi,
            font: None,
        }
    }

    /// Attach a caption font. Without one the sheet is composed normally
    /// but the caption is skipped.
    pub fn with_font(mut self, font: CaptionFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Tile `photo` into the maximal centered grid that fits the sheet.
    ///
    /// The grid count is `floor(sheet / (cell + margin))` per axis. A spec
    /// whose physical size exceeds the sheet yields an empty grid — that is
    /// a configuration error the caller prevents (catalog specs are
    /// bounded by design), so it is logged, not raised.
    #[instrument(skip_all, fields(country = %spec.country))]
    pub fn compose(&self, photo: &RenderedPhoto, spec: &PhotoSpec) -> Result<LayoutSheet> {
        spec.validate()?;

        let (sheet_w, sheet_h) = self.config.format.dimensions_px(self.dpi);
        let mut canvas = RgbaImage::from_pixel(sheet_w, sheet_h, Rgba([255, 255, 255, 255]));

        // Cell size comes from the same mm conversion the renderer used.
        let (cell_w, cell_h) = spec.dimensions_px(self.dpi);
        let margin = self.config.margin_px;
        let cols = sheet_w / (cell_w + margin);
        let rows = sheet_h / (cell_h + margin);
        if cols == 0 || rows == 0 {
            warn!(cell_w, cell_h, "Photo cell does not fit the sheet at all");
        }

        // A mismatched photo is resized into the cell rather than rejected.
        let cell = if (photo.width(), photo.height()) == (cell_w, cell_h) {
            photo.as_dynamic().to_rgba8()
        } else if cols > 0 && rows > 0 {
            warn!(
                photo_w = photo.width(),
                photo_h = photo.height(),
                cell_w,
                cell_h,
                "Photo does not match the spec's cell size, resizing"
            );
            photo
                .as_dynamic()
                .resize_exact(cell_w, cell_h, FilterType::Lanczos3)
                .to_rgba8()
        } else {
            photo.as_dynamic().to_rgba8()
        };

        // Center the grid on the sheet.
        let grid_w = cols * cell_w + cols.saturating_sub(1) * margin;
        let grid_h = rows * cell_h + rows.saturating_sub(1) * margin;
        let start_x = (sheet_w - grid_w) / 2;
        let start_y = (sheet_h - grid_h) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let x = start_x + col * (cell_w + margin);
                let y = start_y + row * (cell_h + margin);
                image::imageops::replace(&mut canvas, &cell, i64::from(x), i64::from(y));
                draw_hollow_rect_mut(
                    &mut canvas,
                    Rect::at(x as i32, y as i32).of_size(cell_w, cell_h),
                    BORDER_COLOR,
                );
            }
        }

        // Cut guides run the full sheet along internal grid lines, halfway
        // into the margin.
        for col in 1..cols {
            let x = start_x + col * (cell_w + margin) - margin / 2;
            draw_dashed_vline(&mut canvas, x, GUIDE_DASH, GUIDE_GAP, GUIDE_COLOR);
        }
        for row in 1..rows {
            let y = start_y + row * (cell_h + margin) - margin / 2;
            draw_dashed_hline(&mut canvas, y, GUIDE_DASH, GUIDE_GAP, GUIDE_COLOR);
        }

        self.draw_caption(&mut canvas, spec, cols, rows);

        info!(cols, rows, sheet_w, sheet_h, "Sheet composed");
        Ok(LayoutSheet {
            image: DynamicImage::ImageRgba8(canvas),
            cols,
            rows,
        })
    }

    fn draw_caption(&self, canvas: &mut RgbaImage, spec: &PhotoSpec, cols: u32, rows: u32) {
        let Some(font) = &self.font else {
            warn!("No caption font configured, skipping caption");
            return;
        };

        let (w_in, h_in) = self.config.format.dimensions_in();
        let info_line = format!(
            "{} Visa Photos - {}mm × {}mm",
            spec.country, spec.width_mm, spec.height_mm
        );
        let count_line = format!("{cols}×{rows} photos on {w_in}\"×{h_in}\" paper");

        let h = canvas.height() as i32;
        draw_centered_text(
            canvas,
            font,
            PxScale::from(CAPTION_COUNT_SIZE),
            h - 78,
            &count_line,
            CAPTION_COLOR,
        );
        draw_centered_text(
            canvas,
            font,
            PxScale::from(CAPTION_INFO_SIZE),
            h - 54,
            &info_line,
            CAPTION_COLOR,
        );
    }
}

/// The terminal artifact of the pipeline: a cut-ready print sheet.
pub struct LayoutSheet {
    image: DynamicImage,
    cols: u32,
    rows: u32,
}

impl LayoutSheet {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Photo copies per row.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Photo rows on the sheet.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total photo copies on the sheet.
    pub fn copies(&self) -> u32 {
        self.cols * self.rows
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Encode as PNG bytes for the download/print collaborator.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    /// Encode as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        encode_jpeg(&self.image, quality)
    }

    /// Write the sheet to a file; format inferred from the extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            passbild_core::PassbildError::Encode(format!(
                "failed to save sheet to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

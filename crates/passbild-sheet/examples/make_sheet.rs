// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end pipeline demo: synthetic portrait -> background normalisation
// -> centered crop -> 300 DPI render -> 4R sheet. Writes `sheet.png` to the
// current directory.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

use passbild_core::{PipelineConfig, catalog, types::DisplaySize};
use passbild_image::{BackgroundNormalizer, CropRegionModel, ThresholdSegmenter, render};
use passbild_sheet::{CaptionFont, LayoutComposer};

/// A stand-in portrait: dark oval on a slightly off-white wall.
fn synthetic_portrait(width: u32, height: u32) -> DynamicImage {
    let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let (rx, ry) = (f64::from(width) / 4.0, f64::from(height) / 3.0);
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = (f64::from(x) - cx) / rx;
        let dy = (f64::from(y) - cy) / ry;
        if dx * dx + dy * dy <= 1.0 {
            Rgba([120, 90, 70, 255])
        } else {
            Rgba([248, 247, 249, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = PipelineConfig::default();
    let spec = catalog::find("United States").expect("built-in spec");

    let source = synthetic_portrait(640, 480);
    let display = DisplaySize::new(640.0, 480.0);

    // Local classifier doubles as the primary strategy here; a remote
    // capability would plug in through the same Segmenter trait.
    let normalizer = BackgroundNormalizer::new(ThresholdSegmenter::new(config.classifier));
    let normalized = normalizer
        .normalize(&source, |p| info!(progress = p, "normalizing"))
        .await?;

    let mut crop = CropRegionModel::new(display, spec.aspect_ratio(), config.crop);
    crop.set_width(260.0);

    let photo = render(&normalized, &crop.region(), display, &spec, config.dpi)?;
    info!(width = photo.width(), height = photo.height(), "photo rendered");

    let mut composer = LayoutComposer::new(config.sheet, config.dpi);
    match CaptionFont::from_system() {
        Ok(font) => composer = composer.with_font(font),
        Err(err) => info!(%err, "composing without caption"),
    }

    let sheet = composer.compose(&photo, &spec)?;
    sheet.save("sheet.png")?;
    info!(copies = sheet.copies(), "wrote sheet.png");
    Ok(())
}

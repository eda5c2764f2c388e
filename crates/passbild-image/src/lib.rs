// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// passbild-image — Per-photo pixel work for the Passbild pipeline.
//
// Provides the background normaliser (pluggable segmentation with a
// conservative local fallback), the aspect-locked crop-region model, and
// the single-resample photo renderer. Each stage produces a fresh image;
// stages never mutate an input they did not create.

pub mod background;
pub mod crop;
pub mod render;

pub use background::{BackgroundNormalizer, Segmenter, ThresholdSegmenter};
pub use crop::CropRegionModel;
pub use render::{RenderedPhoto, render};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use passbild_core::error::{PassbildError, Result};

/// Decode an image from raw encoded bytes (JPEG, PNG, etc.).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| PassbildError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(img)
}

/// Load an image from a file path.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_image(path: impl AsRef<std::path::Path>) -> Result<DynamicImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        PassbildError::Decode(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    encode_to_format(image, ImageFormat::Png)
}

/// Encode an image as JPEG bytes with the given quality (1-100).
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let rgb = image.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| PassbildError::Encode(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| PassbildError::Encode(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PassbildError::Decode(_)));
    }

    #[test]
    fn png_bytes_round_trip() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            3,
            image::Rgba([10, 20, 30, 255]),
        ));
        let bytes = encode_png(&img).unwrap();
        let back = decode_image(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (4, 3));
    }

    #[test]
    fn jpeg_encoding_produces_bytes() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            8,
            image::Rgba([200, 200, 200, 255]),
        ));
        let bytes = encode_jpeg(&img, 90).unwrap();
        assert!(!bytes.is_empty());
    }
}

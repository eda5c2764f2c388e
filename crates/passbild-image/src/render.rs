// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo renderer — maps the display-space crop region into the source
// image and resamples it to the spec's physical size at print resolution.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, instrument};

use passbild_core::error::Result;
use passbild_core::types::{CropRegion, DisplaySize, PhotoSpec};
use passbild_core::units;

use crate::{encode_jpeg, encode_png};

/// A single finished visa photo at exact physical dimensions.
///
/// Immutable once produced: `mm_to_px(width_mm) x mm_to_px(height_mm)`
/// pixels at the requested DPI, regardless of source image size.
pub struct RenderedPhoto {
    image: DynamicImage,
    spec: PhotoSpec,
    dpi: u32,
}

impl RenderedPhoto {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The spec this photo was rendered against.
    pub fn spec(&self) -> &PhotoSpec {
        &self.spec
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Borrow the underlying bitmap.
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

    /// Write the photo to a file; format inferred from the extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            passbild_core::PassbildError::Encode(format!(
                "failed to save photo to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

/// Crop and resample the source image into a print-ready photo.
///
/// The display-space `region` is mapped into natural pixels via the
/// per-axis `natural / display` scale, clamped to the image bounds, and
/// stretched into the full output canvas in a single Lanczos3 resample.
/// That one resample performs both the crop and the DPI scaling, so no
/// further quality loss happens downstream.
#[instrument(skip(image, spec, display), fields(country = %spec.country, dpi))]
pub fn render(
    image: &DynamicImage,
    region: &CropRegion,
    display: DisplaySize,
    spec: &PhotoSpec,
    dpi: u32,
) -> Result<RenderedPhoto> {
    spec.validate()?;
    let (out_width, out_height) = spec.dimensions_px(dpi);

    let source = natural_source_rect(region, display, image.width(), image.height());
    debug!(
        src_x = source.0,
        src_y = source.1,
        src_w = source.2,
        src_h = source.3,
        out_width,
        out_height,
        "Resampling crop region"
    );

    let (x, y, w, h) = source;
    let cropped = image.crop_imm(x, y, w, h);
    let resampled = cropped.resize_exact(out_width, out_height, FilterType::Lanczos3);

    info!(out_width, out_height, "Photo rendered");
    Ok(RenderedPhoto {
        image: resampled,
        spec: spec.clone(),
        dpi,
    })
}

/// Map the display-space region into a whole-pixel source rectangle,
/// clamped so it always lies inside the image.
fn natural_source_rect(
    region: &CropRegion,
    display: DisplaySize,
    natural_width: u32,
    natural_height: u32,
) -> (u32, u32, u32, u32) {
    let sx = units::display_to_natural(region.x, natural_width, display.width);
    let sy = units::display_to_natural(region.y, natural_height, display.height);
    let sw = units::display_to_natural(region.width, natural_width, display.width);
    let sh = units::display_to_natural(region.height, natural_height, display.height);

    let x = (sx.max(0.0) as u32).min(natural_width.saturating_sub(1));
    let y = (sy.max(0.0) as u32).min(natural_height.saturating_sub(1));
    let w = (sw.round().max(1.0) as u32).min(natural_width - x);
    let h = (sh.round().max(1.0) as u32).min(natural_height - y);
    (x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn us_spec() -> PhotoSpec {
        PhotoSpec {
            country: "United States".into(),
            width_mm: 35.0,
            height_mm: 45.0,
            background: "white".into(),
            head_height_percent: Some(70.0),
            notes: None,
        }
    }

    /// 640x480 source: left half red, right half blue.
    fn two_tone_source() -> DynamicImage {
        let img = RgbaImage::from_fn(640, 480, |x, _| {
            if x < 320 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn output_dimensions_are_exact_regardless_of_source_size() {
        let spec = us_spec();
        let region = CropRegion {
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 257.0,
        };
        for (w, h) in [(640u32, 480u32), (3000, 2000), (320, 240)] {
            let img = DynamicImage::ImageRgba8(RgbaImage::new(w, h));
            let display = DisplaySize::new(640.0, 480.0 * f64::from(h) / f64::from(w));
            let photo = render(&img, &region, display, &spec, 300).unwrap();
            assert_eq!((photo.width(), photo.height()), (414, 532));
        }
    }

    #[test]
    fn content_comes_from_the_mapped_source_rectangle() {
        // Display equals natural size, so the mapping is the identity. A
        // region entirely inside the red half must render pure red.
        let img = two_tone_source();
        let display = DisplaySize::new(640.0, 480.0);
        let region = CropRegion {
            x: 20.0,
            y: 20.0,
            width: 200.0,
            height: 257.0,
        };
        let photo = render(&img, &region, display, &us_spec(), 300).unwrap();
        let rgba = photo.as_dynamic().to_rgba8();
        for pixel in rgba.pixels() {
            assert_eq!(pixel.0, [255, 0, 0, 255]);
        }
    }

    #[test]
    fn display_scale_factor_is_applied() {
        // Display is half the natural width: a region at display x=170..270
        // maps to natural 340..540, which is entirely in the blue half.
        let img = two_tone_source();
        let display = DisplaySize::new(320.0, 240.0);
        let region = CropRegion {
            x: 170.0,
            y: 20.0,
            width: 100.0,
            height: 128.6,
        };
        let photo = render(&img, &region, display, &us_spec(), 300).unwrap();
        let rgba = photo.as_dynamic().to_rgba8();
        for pixel in rgba.pixels() {
            assert_eq!(pixel.0, [0, 0, 255, 255]);
        }
    }

    #[test]
    fn out_of_bounds_region_is_clamped_not_an_error() {
        let img = two_tone_source();
        let display = DisplaySize::new(640.0, 480.0);
        let region = CropRegion {
            x: 600.0,
            y: 460.0,
            width: 200.0,
            height: 257.0,
        };
        let photo = render(&img, &region, display, &us_spec(), 300).unwrap();
        assert_eq!((photo.width(), photo.height()), (414, 532));
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let mut spec = us_spec();
        spec.height_mm = 0.0;
        let img = two_tone_source();
        let region = CropRegion {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        };
        assert!(render(&img, &region, DisplaySize::new(640.0, 480.0), &spec, 300).is_err());
    }

    #[test]
    fn save_writes_a_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");

        let img = two_tone_source();
        let region = CropRegion {
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 257.0,
        };
        let photo = render(&img, &region, DisplaySize::new(640.0, 480.0), &us_spec(), 300).unwrap();
        photo.save(&path).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (414, 532));
    }
}

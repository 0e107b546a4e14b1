//! Extraction of the image region under a path.

use crate::shapes::PathGeometry;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;
use kurbo::{Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned for paths whose bounding box has no area.
pub const EMPTY_DATA_URI: &str = "data:,";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Raster format of extracted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

/// Encoding options for extracted images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// 0.0..=1.0; only lossy formats use it.
    pub quality: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: 0.96,
        }
    }
}

/// Crop `image` to the path's bounding box and clip it to the outline.
///
/// `image` is the full-resolution base image; it is sampled at the path's
/// display size. Pixels outside the outline or the image are transparent
/// (black for JPEG).
pub fn extract_path_image(
    path: &PathGeometry,
    image: &RgbaImage,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    match clip_path_image(path, image) {
        Some(clipped) => encode_data_uri(&clipped, options),
        None => Ok(EMPTY_DATA_URI.to_string()),
    }
}

/// The clipped region, or `None` when it has no pixels.
pub fn clip_path_image(path: &PathGeometry, image: &RgbaImage) -> Option<RgbaImage> {
    let size = path.size();
    let bounds = path.get_boundaries();
    if bounds.is_zero_area() || size.width <= 0.0 || size.height <= 0.0 {
        return None;
    }
    if image.width() == 0 || image.height() == 0 {
        return None;
    }

    // The canvas spans the whole bounding box, even past the container edge.
    let rect = bounds.to_rect();
    let (x0, y0) = (rect.x0.floor(), rect.y0.floor());
    let (x1, y1) = (rect.x1.ceil(), rect.y1.ceil());

    let outline = path.outline();
    let scale_x = f64::from(image.width()) / size.width;
    let scale_y = f64::from(image.height()) / size.height;
    let max_x = image.width() - 1;
    let max_y = image.height() - 1;

    let mut clipped = RgbaImage::new((x1 - x0) as u32, (y1 - y0) as u32);
    for (px, py, pixel) in clipped.enumerate_pixels_mut() {
        let center = Point::new(x0 + f64::from(px) + 0.5, y0 + f64::from(py) + 0.5);
        if !outline.contains(center) {
            continue;
        }
        if center.x < 0.0 || center.y < 0.0 || center.x >= size.width || center.y >= size.height {
            continue;
        }
        let sx = ((center.x * scale_x) as u32).min(max_x);
        let sy = ((center.y * scale_y) as u32).min(max_y);
        *pixel = *image.get_pixel(sx, sy);
    }
    Some(clipped)
}

/// Encode `image` as a base64 data URI.
pub fn encode_data_uri(image: &RgbaImage, options: &ExportOptions) -> Result<String, ExportError> {
    let bytes = match options.format {
        ExportFormat::Png => encode_png(image)?,
        ExportFormat::Jpeg => encode_jpeg(image, options.quality)?,
    };
    Ok(format!(
        "data:{};base64,{}",
        options.format.mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Encode RGBA8 pixels as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(png_data)
}

/// Encode as JPEG at `quality` (0.0..=1.0). Alpha is dropped.
pub fn encode_jpeg(image: &RgbaImage, quality: f64) -> Result<Vec<u8>, ExportError> {
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut jpeg_data = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_data, quality);
    encoder.encode_image(&rgb)?;
    Ok(jpeg_data)
}

//! Placeholder image synthesis.
//!
//! Turns an [`ImageSpec`] into pixels and then into encoded bytes: a solid
//! fill, the requested text centered over it, and optionally a dimension
//! caption under the midline.

mod text;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

pub use text::{draw_text, fold_fullwidth, glyph_scale, text_width, GLYPH_SIZE};

/// Everything needed to draw one placeholder image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    pub text: String,
    pub font_size: f64,
    /// Draw a `"{width} x {height}"` caption under the main text.
    pub show_dimensions: bool,
    pub text_color: Rgba<u8>,
    pub fill_color: Rgba<u8>,
}

impl Default for ImageSpec {
    fn default() -> Self {
        Self {
            width: 180,
            height: 120,
            text: String::new(),
            font_size: 14.0,
            show_dimensions: false,
            text_color: Rgba([0xff, 0xff, 0xff, 0xff]),
            fill_color: Rgba([0xcc, 0xcc, 0xcc, 0xff]),
        }
    }
}

/// Encodings the service can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
}

impl OutputFormat {
    /// Resolves the `t` query value. Unknown or missing values fall back to
    /// jpeg.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            Some("png") => OutputFormat::Png,
            Some("gif") => OutputFormat::Gif,
            _ => OutputFormat::Jpeg,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Gif => "image/gif",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Gif => ImageFormat::Gif,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Rasterizes the spec into an RGBA buffer.
///
/// The main text is centered. With `show_dimensions` set the text moves
/// fully above the midline and the caption, at 0.8x the font size, sits
/// below it. Text wider than the image is clipped on both sides.
pub fn render(spec: &ImageSpec) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(spec.width, spec.height, spec.fill_color);

    let scale = glyph_scale(spec.font_size);
    let text_h = (GLYPH_SIZE * scale) as i32;
    let text_x = (spec.width as i32 - text_width(&spec.text, scale) as i32) / 2;
    let mid = spec.height as i32 / 2;

    if spec.show_dimensions {
        draw_text(&mut img, text_x, mid - text_h, &spec.text, spec.text_color, scale);

        let caption = format!("{} x {}", spec.width, spec.height);
        let caption_scale = glyph_scale(spec.font_size * 0.8);
        let caption_h = (GLYPH_SIZE * caption_scale) as i32;
        let caption_x = (spec.width as i32 - text_width(&caption, caption_scale) as i32) / 2;
        draw_text(
            &mut img,
            caption_x,
            mid + caption_h,
            &caption,
            spec.text_color,
            caption_scale,
        );
    } else {
        draw_text(
            &mut img,
            text_x,
            mid - text_h / 2,
            &spec.text,
            spec.text_color,
            scale,
        );
    }

    img
}

/// Serializes the buffer in the requested format.
pub fn encode_image(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Cursor::new(Vec::new());
    match format {
        // The jpeg encoder has no alpha support.
        OutputFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut bytes, ImageFormat::Jpeg)?,
        other => image.write_to(&mut bytes, other.image_format())?,
    }
    Ok(bytes.into_inner())
}

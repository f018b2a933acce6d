//! Decoding, encoding and data URI helpers

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, ImageFormat, RgbImage, RgbaImage};

use crate::error::{ImagingError, ImagingResult};

const JPEG_QUALITY: u8 = 90;

/// A decoded upload together with the container format it arrived in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Detect the container format and decode to RGBA8
pub fn decode(bytes: &[u8]) -> ImagingResult<DecodedImage> {
    if bytes.is_empty() {
        return Err(ImagingError::Decode("empty input".to_string()));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| ImagingError::Decode(format!("unrecognised image data: {e}")))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImagingError::Decode(e.to_string()))?;

    Ok(DecodedImage {
        pixels: decoded.to_rgba8(),
        format,
    })
}

/// Encode an RGBA buffer as PNG or JPEG.
///
/// JPEG has no alpha channel, so translucent pixels are composited onto white.
pub fn encode(pixels: &RgbaImage, format: ImageFormat) -> ImagingResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(
                    pixels.as_raw(),
                    pixels.width(),
                    pixels.height(),
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| ImagingError::Encode(e.to_string()))?;
        }
        ImageFormat::Jpeg => {
            let flattened = flatten_onto_white(pixels);
            JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
                .write_image(
                    flattened.as_raw(),
                    flattened.width(),
                    flattened.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| ImagingError::Encode(e.to_string()))?;
        }
        other => {
            return Err(ImagingError::UnsupportedOutput(format!("{other:?}")));
        }
    }
    Ok(buffer)
}

fn flatten_onto_white(pixels: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(pixels.width(), pixels.height());
    for (dst, px) in out.pixels_mut().zip(pixels.pixels()) {
        let [r, g, b, a] = px.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        dst.0 = [blend(r), blend(g), blend(b)];
    }
    out
}

/// MIME type for a container format, falling back to a generic binary type
pub fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::WebP => "image/webp",
        _ => "application/octet-stream",
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

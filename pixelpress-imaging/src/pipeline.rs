//! Decode, filter and re-encode a single upload

use image::ImageFormat;
use serde::Serialize;

use crate::codec::{self, data_uri, mime_type};
use crate::error::ImagingResult;
use crate::filter::{apply, FilterKind};

/// Result of running one upload through a filter
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedImage {
    /// The uploaded bytes, untouched, as a data URI
    pub original_uri: String,
    pub processed_uri: String,
    pub width: u32,
    pub height: u32,
}

pub fn process_image(
    bytes: &[u8],
    filter: FilterKind,
    output: ImageFormat,
) -> ImagingResult<ProcessedImage> {
    let decoded = codec::decode(bytes)?;
    let filtered = apply(&decoded.pixels, filter);
    let encoded = codec::encode(&filtered, output)?;

    Ok(ProcessedImage {
        original_uri: data_uri(mime_type(decoded.format), bytes),
        processed_uri: data_uri(mime_type(output), &encoded),
        width: filtered.width(),
        height: filtered.height(),
    })
}

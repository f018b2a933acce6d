//! Image filter engine for Pixelpress
//!
//! Filters are pure functions from an RGBA buffer to a fresh RGBA buffer of
//! the same dimensions. They hold no state and can be called from any number
//! of worker threads at once. The [`codec`] module wraps decoding, encoding
//! and data URI construction, and [`pipeline::process_image`] chains the
//! three for one uploaded file.

pub mod codec;
pub mod error;
pub mod filter;
pub mod pipeline;
mod transforms;

pub use codec::{data_uri, decode, encode, mime_type, DecodedImage};
pub use error::{ImagingError, ImagingResult};
pub use filter::{apply, FilterKind};
pub use pipeline::{process_image, ProcessedImage};

/// Re-exported so callers can name pixel buffers without depending on `image`
pub use image::{ImageFormat, Rgba, RgbaImage};

//! Filter selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImagingError;
use crate::transforms;
use image::RgbaImage;

/// The transform applied to every image of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Grayscale,
    Blur,
    Sharpen,
    Sepia,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Grayscale,
        FilterKind::Blur,
        FilterKind::Sharpen,
        FilterKind::Sepia,
    ];

    /// Wire identifier used by the dashboard
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Blur => "blur",
            FilterKind::Sharpen => "sharpen",
            FilterKind::Sepia => "sepia",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = ImagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grayscale" => Ok(FilterKind::Grayscale),
            "blur" => Ok(FilterKind::Blur),
            "sharpen" => Ok(FilterKind::Sharpen),
            "sepia" => Ok(FilterKind::Sepia),
            _ => Err(ImagingError::UnknownFilter(s.to_string())),
        }
    }
}

/// Apply `filter` to `pixels`, returning a new buffer.
///
/// The input is never modified and the output always has the input's
/// dimensions and RGBA layout.
pub fn apply(pixels: &RgbaImage, filter: FilterKind) -> RgbaImage {
    match filter {
        FilterKind::Grayscale => transforms::grayscale(pixels),
        FilterKind::Blur => transforms::gaussian_blur(pixels, transforms::BLUR_SIGMA),
        FilterKind::Sharpen => transforms::sharpen(pixels),
        FilterKind::Sepia => transforms::sepia(pixels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_str() {
        assert_eq!("grayscale".parse::<FilterKind>().unwrap(), FilterKind::Grayscale);
        assert_eq!("Blur".parse::<FilterKind>().unwrap(), FilterKind::Blur);
        assert_eq!(" sepia ".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
        assert_eq!(
            "emboss".parse::<FilterKind>(),
            Err(ImagingError::UnknownFilter("emboss".to_string()))
        );
    }

    #[test]
    fn test_wire_names_match_serde() {
        for filter in FilterKind::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
            assert_eq!(filter.as_str().parse::<FilterKind>().unwrap(), filter);
        }
    }
}

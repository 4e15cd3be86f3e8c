use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::utils::ExplorerError;

/// Image formats accepted for upload. Output is always PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
}

impl FromStr for ImageFormat {
    type Err = ExplorerError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            _ => Err(ExplorerError::unsupported_format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Sniffs the upload format from the raw bytes.
///
/// Extension hints from the filename are not trusted; the magic bytes decide.
pub fn format_from_bytes(bytes: &[u8]) -> Result<ImageFormat, ExplorerError> {
    let guessed = image::guess_format(bytes)
        .map_err(|e| ExplorerError::unsupported_format(format!("Unrecognized image data: {}", e)))?;

    match guessed {
        image::ImageFormat::Jpeg => Ok(ImageFormat::JPEG),
        image::ImageFormat::Png => Ok(ImageFormat::PNG),
        image::ImageFormat::WebP => Ok(ImageFormat::WebP),
        other => Err(ExplorerError::unsupported_format(format!(
            "Unsupported image format: {:?}", other
        ))),
    }
}

/// Get format from a filename's extension, when one is present.
pub fn format_from_extension(filename: &str) -> Option<ImageFormat> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?;

    ImageFormat::from_str(ext).ok()
}

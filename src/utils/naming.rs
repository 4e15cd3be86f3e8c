//! Download filename composition.

use std::path::Path;
use crate::core::Style;

/// Returns the uploaded filename without its directory part or extension.
///
/// A filename with no extension is used as-is; an empty result falls back
/// to "image" so the download name is never degenerate.
pub fn base_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .trim();

    if stem.is_empty() {
        "image".to_string()
    } else {
        stem.to_string()
    }
}

/// Composes the download filename as `<base>_<style>.png`.
///
/// The style identifier is always appended, including `none`.
pub fn download_name(base: &str, style: Style) -> String {
    format!("{}_{}.png", base, style.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension() {
        assert_eq!(base_name("vacation.jpg"), "vacation");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn handles_missing_extension() {
        assert_eq!(base_name("photo"), "photo");
    }

    #[test]
    fn falls_back_for_degenerate_names() {
        assert_eq!(base_name(""), "image");
        assert_eq!(base_name("  "), "image");
    }

    #[test]
    fn composes_download_names() {
        assert_eq!(download_name(&base_name("vacation.jpg"), Style::Bw), "vacation_bw.png");
        assert_eq!(download_name(&base_name("photo"), Style::None), "photo_none.png");
        assert_eq!(
            download_name(&base_name("pic.webp"), Style::AutoEnhance),
            "pic_auto-enhance.png"
        );
    }
}

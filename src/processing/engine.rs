//! Style engine: decode, resize-for-processing, dispatch, encode.
//!
//! Rendering is one synchronous pass. Commands run it inside
//! `spawn_blocking` so the async runtime is never blocked; the engine
//! itself has no state and no side effects.

use std::io::Cursor;

use image::{imageops, imageops::FilterType, RgbaImage};
use tracing::debug;

use crate::core::{Quality, Style, StyleParams};
use crate::processing::filters;
use crate::utils::{ExplorerError, ExplorerResult};

/// Longest-side cap in fast mode.
pub const FAST_MAX_DIM: u32 = 600;
/// Longest-side cap in high-quality mode.
pub const HIGH_MAX_DIM: u32 = 1200;

/// Kernel size used by the blur style in fast mode, where the slider is
/// ignored in favor of a fixed small kernel.
const FAST_BLUR_KERNEL: u32 = 5;

/// The before/after pair produced by one render, PNG-encoded.
pub struct RenderedPair {
    /// The decoded original after resize-for-processing
    pub original_png: Vec<u8>,
    /// The styled output at the same dimensions
    pub styled_png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Applies `style` at `quality` to `image`, producing a new image.
///
/// Dispatch is total over the closed style enum; unknown identifiers never
/// reach this function because they fail to parse at the command boundary.
/// Fast mode substitutes fixed cheap kernels; high quality reads `params`.
pub fn apply(style: Style, quality: Quality, image: &RgbaImage, params: &StyleParams) -> RgbaImage {
    match (style, quality) {
        (Style::None, _) => filters::identity(image),

        (Style::Bw, Quality::Fast) => filters::grayscale(image),
        (Style::Bw, Quality::High) => filters::equalized_grayscale(image),

        (Style::Sketch, Quality::Fast) => filters::sketch_approx(image),
        (Style::Sketch, Quality::High) => filters::sketch_detailed(image),

        (Style::Cartoon, Quality::Fast) => filters::cartoon(image, false),
        (Style::Cartoon, Quality::High) => filters::cartoon(image, true),

        (Style::Blur, Quality::Fast) => filters::gaussian(image, FAST_BLUR_KERNEL),
        (Style::Blur, Quality::High) => filters::gaussian(image, params.blur_radius),

        (Style::Painting, Quality::Fast) => filters::painting_approx(image),
        (Style::Painting, Quality::High) => {
            filters::painting(image, params.painting_detail, params.painting_color_smooth)
        }

        (Style::AutoEnhance, Quality::Fast) => filters::contrast(image, 15.0),
        (Style::AutoEnhance, Quality::High) => {
            filters::saturate(&filters::contrast(image, 15.0), 0.2)
        }

        (Style::Vivid, Quality::Fast) => filters::saturate(image, 0.35),
        (Style::Vivid, Quality::High) => filters::contrast(&filters::saturate(image, 0.35), 10.0),

        (Style::Vintage, Quality::Fast) => filters::sepia(image),
        (Style::Vintage, Quality::High) => filters::vignette(&filters::sepia(image), 0.45, 0.75),
    }
}

/// Decodes uploaded bytes into an RGBA buffer.
pub fn decode_image(bytes: &[u8]) -> ExplorerResult<RgbaImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ExplorerError::unsupported_format(format!("Could not decode image: {}", e)))?;
    Ok(decoded.to_rgba8())
}

/// Resizes so the longest side is at most `max_dim` (bilinear).
/// Images already within the cap are returned unchanged; never upscales.
pub fn resize_for_processing(image: &RgbaImage, max_dim: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if longest <= max_dim {
        return image.clone();
    }

    let scale = max_dim as f64 / longest as f64;
    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);
    imageops::resize(image, new_w, new_h, FilterType::Triangle)
}

/// The processing-size cap for a quality mode.
pub fn max_dim_for(quality: Quality) -> u32 {
    match quality {
        Quality::Fast => FAST_MAX_DIM,
        Quality::High => HIGH_MAX_DIM,
    }
}

/// Runs the full render pass: decode, resize, style, PNG-encode both the
/// resized original and the styled output.
pub fn render(
    bytes: &[u8],
    style: Style,
    quality: Quality,
    params: &StyleParams,
) -> ExplorerResult<RenderedPair> {
    let decoded = decode_image(bytes)?;
    let original = resize_for_processing(&decoded, max_dim_for(quality));
    let (width, height) = original.dimensions();
    debug!(
        "Rendering {}x{} image with style {} ({:?})",
        width, height, style, quality
    );

    let styled = apply(style, quality, &original, params);

    Ok(RenderedPair {
        original_png: encode_png(&original)?,
        styled_png: encode_png(&styled)?,
        width,
        height,
    })
}

/// PNG-encodes an RGBA buffer.
pub fn encode_png(image: &RgbaImage) -> ExplorerResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| ExplorerError::processing(format!("PNG encoding failed: {}", e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
        })
    }

    #[test]
    fn apply_none_is_identity_for_all_qualities() {
        let image = sample_image(20, 12);
        let params = StyleParams::default();
        assert_eq!(apply(Style::None, Quality::Fast, &image, &params), image);
        assert_eq!(apply(Style::None, Quality::High, &image, &params), image);
    }

    #[test]
    fn apply_is_pure_for_every_style() {
        let image = sample_image(20, 12);
        let before = image.clone();
        let params = StyleParams::default();

        for style in Style::ALL {
            for quality in [Quality::Fast, Quality::High] {
                let first = apply(style, quality, &image, &params);
                let second = apply(style, quality, &image, &params);
                assert_eq!(first, second, "style {} is not deterministic", style);
                assert_eq!(image, before, "style {} mutated its input", style);
            }
        }
    }

    #[test]
    fn resize_caps_longest_side_without_upscaling() {
        let wide = sample_image(1800, 900);
        let resized = resize_for_processing(&wide, FAST_MAX_DIM);
        assert_eq!(resized.dimensions(), (600, 300));

        let small = sample_image(320, 200);
        assert_eq!(resize_for_processing(&small, FAST_MAX_DIM).dimensions(), (320, 200));
    }

    #[test]
    fn render_round_trips_through_png() {
        let image = sample_image(64, 48);
        let bytes = encode_png(&image).unwrap();

        let pair = render(&bytes, Style::Bw, Quality::Fast, &StyleParams::default()).unwrap();
        assert_eq!((pair.width, pair.height), (64, 48));

        let original = decode_image(&pair.original_png).unwrap();
        assert_eq!(original, image);

        let styled = decode_image(&pair.styled_png).unwrap();
        assert!(styled.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn garbage_bytes_are_an_unsupported_format() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ExplorerError::UnsupportedFormat(_)));
    }

    #[test]
    fn blur_params_change_the_high_quality_output_only() {
        let image = sample_image(40, 30);
        let narrow = StyleParams { blur_radius: 3, ..Default::default() };
        let wide = StyleParams { blur_radius: 31, ..Default::default() };

        assert_ne!(
            apply(Style::Blur, Quality::High, &image, &narrow),
            apply(Style::Blur, Quality::High, &image, &wide)
        );
        assert_eq!(
            apply(Style::Blur, Quality::Fast, &image, &narrow),
            apply(Style::Blur, Quality::Fast, &image, &wide)
        );
    }
}

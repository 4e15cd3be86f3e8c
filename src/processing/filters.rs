//! Filter primitives over `RgbaImage`.
//!
//! Every function is pure: it reads the input image and returns a new
//! buffer, so repeated calls with identical inputs produce identical
//! output. Alpha is carried through untouched; only RGB channels are
//! transformed.

use image::{imageops, GrayImage, Rgba, RgbaImage};
use imageproc::contrast::{adaptive_threshold, equalize_histogram};
use imageproc::edges::canny;
use imageproc::filter::{bilateral_filter, gaussian_blur_f32, median_filter};
use imageproc::gradients::sobel_gradients;

/// Rec. 601 luma weights, matching the grayscale conversion used by the
/// processing libraries this mirrors.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

// ── Helpers ─────────────────────────────────────────────────────────────────

fn luma_u8(pixel: &Rgba<u8>) -> u8 {
    (LUMA[0] * pixel[0] as f32 + LUMA[1] * pixel[1] as f32 + LUMA[2] * pixel[2] as f32) as u8
}

/// Rebuilds an RGBA image from a gray plane, taking alpha from the source.
fn gray_to_rgba(gray: &GrayImage, source: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgba([v, v, v, source.get_pixel(x, y)[3]])
    })
}

// ── Basic filters ───────────────────────────────────────────────────────────

/// Return the original image (no filter).
pub fn identity(image: &RgbaImage) -> RgbaImage {
    image.clone()
}

/// Luminance grayscale.
pub fn grayscale(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let gray = luma_u8(pixel);
        pixel[0] = gray;
        pixel[1] = gray;
        pixel[2] = gray;
    }
    out
}

/// Grayscale with histogram equalization for contrast normalization.
pub fn equalized_grayscale(image: &RgbaImage) -> RgbaImage {
    let gray = imageops::grayscale(image);
    let equalized = equalize_histogram(&gray);
    gray_to_rgba(&equalized, image)
}

/// Gaussian blur with an odd kernel size.
///
/// The sigma is derived from the kernel size the same way OpenCV does when
/// asked to pick one: `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian(image: &RgbaImage, kernel_size: u32) -> RgbaImage {
    let ksize = kernel_size.max(3) | 1;
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    gaussian_blur_f32(image, sigma)
}

/// Posterize each RGB channel down to `levels` values.
pub fn posterize(image: &RgbaImage, levels: u8) -> RgbaImage {
    let levels = levels.max(2) as f32;
    let step = 255.0 / (levels - 1.0);

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = ((pixel[0] as f32 / step).round() * step).clamp(0.0, 255.0) as u8;
        pixel[1] = ((pixel[1] as f32 / step).round() * step).clamp(0.0, 255.0) as u8;
        pixel[2] = ((pixel[2] as f32 / step).round() * step).clamp(0.0, 255.0) as u8;
    }
    out
}

// ── Sketch ──────────────────────────────────────────────────────────────────

/// Sketch approximation from Sobel gradient magnitude: dark strokes where
/// gradients are strong, white paper elsewhere.
pub fn sketch_approx(image: &RgbaImage) -> RgbaImage {
    let gray = imageops::grayscale(image);
    let gradients = sobel_gradients(&gray);

    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let magnitude = (gradients.get_pixel(x, y)[0] / 4).min(255) as u8;
        let v = 255 - magnitude;
        Rgba([v, v, v, image.get_pixel(x, y)[3]])
    })
}

/// Full sketch: Gaussian pre-blur, Canny edges, plus a Sobel shading pass
/// for the soft detail the hard Canny lines miss. Inverted to ink-on-paper.
pub fn sketch_detailed(image: &RgbaImage) -> RgbaImage {
    let gray = imageops::grayscale(image);
    let blurred = gaussian_blur_f32(&gray, 1.4);
    let edges = canny(&blurred, 50.0, 150.0);
    let shading = sobel_gradients(&gray);

    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let line = edges.get_pixel(x, y)[0];
        let shade = (shading.get_pixel(x, y)[0] / 8).min(96) as u8;
        let ink = line.max(shade);
        let v = 255 - ink;
        Rgba([v, v, v, image.get_pixel(x, y)[3]])
    })
}

// ── Cartoon ─────────────────────────────────────────────────────────────────

/// Cartoon effect: quantized colors masked by dark edge lines.
///
/// `fine` switches to the high-quality variant: bilateral color smoothing
/// before quantization and a tighter edge neighborhood.
pub fn cartoon(image: &RgbaImage, fine: bool) -> RgbaImage {
    let color = if fine {
        posterize(&bilateral_smooth(image, 9, 75.0, 75.0), 8)
    } else {
        posterize(image, 6)
    };

    // Edge mask in the adaptive-threshold style: pixels darker than their
    // neighborhood mean become the line work.
    let gray = imageops::grayscale(image);
    let (median_radius, block_radius) = if fine { (3, 4) } else { (1, 8) };
    let smoothed = median_filter(&gray, median_radius, median_radius);
    let mask = adaptive_threshold(&smoothed, block_radius);

    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let c = color.get_pixel(x, y);
        if mask.get_pixel(x, y)[0] == 0 {
            Rgba([0, 0, 0, c[3]])
        } else {
            *c
        }
    })
}

/// Edge-preserving color smoothing, applied per channel.
fn bilateral_smooth(image: &RgbaImage, window: u32, sigma_color: f32, sigma_spatial: f32) -> RgbaImage {
    let width = image.width();
    let height = image.height();

    let channel = |index: usize| {
        GrayImage::from_fn(width, height, |x, y| {
            image::Luma([image.get_pixel(x, y)[index]])
        })
    };

    let planes: Vec<GrayImage> = (0..3)
        .map(|i| bilateral_filter(&channel(i), window, sigma_color, sigma_spatial))
        .collect();

    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            planes[0].get_pixel(x, y)[0],
            planes[1].get_pixel(x, y)[0],
            planes[2].get_pixel(x, y)[0],
            image.get_pixel(x, y)[3],
        ])
    })
}

// ── Painting ────────────────────────────────────────────────────────────────

/// Painting effect.
///
/// `detail` (10-200) drives how aggressively colors collapse into flat
/// regions; `color_smooth` (0.1-1.0) drives the pre-smoothing that melts
/// neighboring colors together. The high-quality pass finishes with a
/// subtle diagonal canvas grain.
pub fn painting(image: &RgbaImage, detail: u32, color_smooth: f64) -> RgbaImage {
    let sigma = 0.8 + color_smooth as f32 * 1.6;
    let smoothed = gaussian_blur_f32(image, sigma);

    // More detail = fewer levels = stronger effect.
    let levels = (12u32.saturating_sub(detail / 20)).clamp(3, 10) as u8;
    let flattened = posterize(&smoothed, levels);

    canvas_overlay(&flattened, 0.05)
}

/// Quick painting approximation: posterization with a handful of levels.
pub fn painting_approx(image: &RgbaImage) -> RgbaImage {
    posterize(image, 4)
}

/// Modulates brightness along diagonal bands to suggest canvas texture.
fn canvas_overlay(image: &RgbaImage, amplitude: f32) -> RgbaImage {
    const PERIOD: u32 = 7;

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let phase = ((x + y) % PERIOD) as f32 / (PERIOD - 1) as f32;
        let factor = 1.0 + amplitude * (phase - 0.5);
        pixel[0] = (pixel[0] as f32 * factor).clamp(0.0, 255.0) as u8;
        pixel[1] = (pixel[1] as f32 * factor).clamp(0.0, 255.0) as u8;
        pixel[2] = (pixel[2] as f32 * factor).clamp(0.0, 255.0) as u8;
    }
    out
}

// ── Tonal adjustments ───────────────────────────────────────────────────────

/// Contrast adjustment: `new = (old - 128) * (1 + contrast/100) + 128`.
pub fn contrast(image: &RgbaImage, contrast: f32) -> RgbaImage {
    let factor = 1.0 + contrast / 100.0;

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for i in 0..3 {
            let val = pixel[i] as f32;
            pixel[i] = ((val - 128.0) * factor + 128.0).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Saturation adjustment by interpolating each pixel against its luma.
/// `amount` > 0 increases saturation, < 0 washes it out.
pub fn saturate(image: &RgbaImage, amount: f32) -> RgbaImage {
    let adjustment = 1.0 + amount;

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let gray = luma_u8(pixel) as f32;
        for i in 0..3 {
            let val = pixel[i] as f32;
            pixel[i] = (gray + (val - gray) * adjustment).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Classic sepia toning matrix.
pub fn sepia(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let (r, g, b) = (pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
        pixel[0] = (0.393 * r + 0.769 * g + 0.189 * b).clamp(0.0, 255.0) as u8;
        pixel[1] = (0.349 * r + 0.686 * g + 0.168 * b).clamp(0.0, 255.0) as u8;
        pixel[2] = (0.272 * r + 0.534 * g + 0.131 * b).clamp(0.0, 255.0) as u8;
    }
    out
}

/// Darkens pixels by their distance from the image center.
pub fn vignette(image: &RgbaImage, strength: f32, radius: f32) -> RgbaImage {
    let width = image.width();
    let center_x = width as f32 / 2.0;
    let center_y = image.height() as f32 / 2.0;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();

        let normalized = distance / (max_distance * radius);
        let factor = 1.0 - (normalized * strength).clamp(0.0, strength);

        pixel[0] = (pixel[0] as f32 * factor) as u8;
        pixel[1] = (pixel[1] as f32 * factor) as u8;
        pixel[2] = (pixel[2] as f32 * factor) as u8;
    }
    out
}

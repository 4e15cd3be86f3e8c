//! End-to-end pass over the session store and style engine: the same
//! sequence of operations the UI shell drives, minus the webview.

use image::{Rgba, RgbaImage};
use style_explorer_lib::core::{ParamKey, Quality, SessionStore, Style, UploadedImage};
use style_explorer_lib::processing;
use style_explorer_lib::utils::{base_name, download_name, format_from_bytes, ExplorerError, StoreError};

fn sample_png(w: u32, h: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    processing::encode_png(&image).unwrap()
}

fn upload_from(filename: &str, bytes: Vec<u8>) -> UploadedImage {
    let format = format_from_bytes(&bytes).unwrap();
    UploadedImage {
        base_name: base_name(filename),
        bytes,
        format,
    }
}

#[test]
fn upload_style_render_download_flow() {
    let mut store = SessionStore::new();

    // The seeded blank discussion is the upload target.
    let id = store.create_blank(None).unwrap();
    store
        .upload_image(id, upload_from("vacation.jpg", sample_png(800, 500)))
        .unwrap();
    assert_eq!(store.get(id).unwrap().name, "vacation");

    // Configure the style the way slider interactions would.
    store.update_style(id, Style::Blur).unwrap();
    store.update_quality(id, Quality::High).unwrap();
    store.update_param(id, ParamKey::BlurRadius, 15.0).unwrap();

    // Render with the stored configuration.
    let discussion = store.get(id).unwrap();
    let image = discussion.image.as_ref().unwrap();
    let pair = processing::render(
        &image.bytes,
        discussion.style,
        discussion.quality,
        &discussion.params,
    )
    .unwrap();

    // High quality caps the longest side at 1200 and never upscales.
    assert_eq!((pair.width, pair.height), (800, 500));
    processing::decode_image(&pair.styled_png).unwrap();

    assert_eq!(
        download_name(&image.base_name, discussion.style),
        "vacation_blur.png"
    );
}

#[test]
fn fast_mode_shrinks_the_processing_size() {
    let mut store = SessionStore::new();
    let id = store.create_blank(None).unwrap();
    store
        .upload_image(id, upload_from("big.png", sample_png(1500, 900)))
        .unwrap();

    let discussion = store.get(id).unwrap();
    let image = discussion.image.as_ref().unwrap();

    let fast = processing::render(&image.bytes, Style::None, Quality::Fast, &discussion.params).unwrap();
    assert_eq!((fast.width, fast.height), (600, 360));

    let high = processing::render(&image.bytes, Style::None, Quality::High, &discussion.params).unwrap();
    assert_eq!((high.width, high.height), (1200, 720));
}

#[test]
fn styling_one_discussion_leaves_the_other_untouched() {
    let mut store = SessionStore::new();

    let a = store.create_blank(None).unwrap();
    store.upload_image(a, upload_from("first.png", sample_png(64, 64))).unwrap();
    let b = store.create_blank(None).unwrap();
    store.upload_image(b, upload_from("second.png", sample_png(64, 64))).unwrap();

    store.update_style(a, Style::Vintage).unwrap();
    store.update_param(a, ParamKey::PaintingDetail, 150.0).unwrap();

    let b_record = store.get(b).unwrap();
    assert_eq!(b_record.style, Style::None);
    assert_eq!(b_record.params.painting_detail, 60);
    assert_eq!(b_record.name, "second");
}

#[test]
fn rejected_operations_leave_prior_state_unchanged() {
    let mut store = SessionStore::new();
    let id = store.create_blank(None).unwrap();
    store.upload_image(id, upload_from("keep.png", sample_png(32, 32))).unwrap();

    // Re-upload is rejected, prior image kept.
    let err = store
        .upload_image(id, upload_from("replace.png", sample_png(32, 32)))
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyHasImage(_)));
    assert_eq!(store.get(id).unwrap().name, "keep");

    // Unknown style identifiers fail to parse before any store write.
    let err = "watercolor".parse::<Style>().unwrap_err();
    assert!(matches!(err, ExplorerError::UnknownStyle(_)));

    // Corrupt uploads are rejected at decode.
    let err = format_from_bytes(b"not an image").unwrap_err();
    assert!(matches!(err, ExplorerError::UnsupportedFormat(_)));
}

#[test]
fn every_style_renders_every_quality() {
    let png = sample_png(96, 64);
    let params = style_explorer_lib::core::StyleParams::default();

    for style in Style::ALL {
        for quality in [Quality::Fast, Quality::High] {
            let pair = processing::render(&png, style, quality, &params)
                .unwrap_or_else(|e| panic!("style {} ({:?}) failed: {}", style, quality, e));
            assert_eq!((pair.width, pair.height), (96, 64));
        }
    }
}

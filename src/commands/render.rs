//! Tauri command handler for rendering styled previews.

use serde::Serialize;
use tauri::State;
use tracing::debug;

use crate::core::{AppState, DiscussionId};
use crate::processing;
use crate::utils::{download_name, ExplorerError, ExplorerResult, StoreError};

/// One rendered before/after pair plus the composed download filename.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledPreview {
    pub discussion_id: DiscussionId,
    /// Resized original, PNG-encoded, for the "before" panel
    pub original_png: Vec<u8>,
    /// Styled output, PNG-encoded, for the "after" panel and download
    pub styled_png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// `<baseName>_<style>.png`
    pub download_filename: String,
}

/// Renders a discussion's image with its stored style configuration.
///
/// Reads the discussion under the store lock, then releases it before the
/// filter work so other interactions are not blocked behind a render. The
/// filter pass runs on a blocking worker thread.
///
/// # Returns
/// PNG bytes for the before/after panels and the download filename.
#[tauri::command]
pub async fn render_styled_image(
    state: State<'_, AppState>,
    id: DiscussionId,
) -> ExplorerResult<StyledPreview> {
    debug!("Received render_styled_image command for discussion {}", id);

    // Snapshot everything the render needs, then drop the lock.
    let (bytes, base_name, style, quality, params) = {
        let store = state.store().await;
        let discussion = store.get(id)?;
        let image = discussion.image.as_ref().ok_or_else(|| {
            StoreError::invalid_state(format!("Discussion {} has no image to render", id))
        })?;
        (
            image.bytes.clone(),
            image.base_name.clone(),
            discussion.style,
            discussion.quality,
            discussion.params.clone(),
        )
    };

    let pair = tokio::task::spawn_blocking(move || {
        processing::render(&bytes, style, quality, &params)
    })
    .await
    .map_err(|e| ExplorerError::processing(format!("Task panicked: {e}")))??;

    debug!(
        "Render complete for discussion {}: {}x{}, {} bytes styled",
        id,
        pair.width,
        pair.height,
        pair.styled_png.len()
    );

    Ok(StyledPreview {
        discussion_id: id,
        original_png: pair.original_png,
        styled_png: pair.styled_png,
        width: pair.width,
        height: pair.height,
        download_filename: download_name(&base_name, style),
    })
}

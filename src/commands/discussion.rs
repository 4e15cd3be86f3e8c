//! Tauri command handlers for the discussion lifecycle.

use serde::Serialize;
use tauri::State;
use tracing::{debug, warn};

use crate::core::{
    AppState, Discussion, DiscussionId, ParamKey, ProjectId, Quality, Style, StyleParams,
    UploadedImage,
};
use crate::utils::{base_name, format_from_bytes, format_from_extension, ExplorerResult};

/// Discussion view for sidebar listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionSummary {
    pub id: DiscussionId,
    pub name: String,
    pub project: Option<ProjectId>,
    pub is_blank: bool,
}

/// Full discussion view: everything the styling panel needs. The image
/// bytes stay on the backend; only the metadata crosses the boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionSnapshot {
    pub id: DiscussionId,
    pub name: String,
    pub project: Option<ProjectId>,
    pub is_blank: bool,
    pub style: Style,
    pub quality: Quality,
    pub params: StyleParams,
    pub image_name: Option<String>,
}

impl From<&Discussion> for DiscussionSummary {
    fn from(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id,
            name: discussion.name.clone(),
            project: discussion.project,
            is_blank: discussion.is_blank(),
        }
    }
}

impl From<&Discussion> for DiscussionSnapshot {
    fn from(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id,
            name: discussion.name.clone(),
            project: discussion.project,
            is_blank: discussion.is_blank(),
            style: discussion.style,
            quality: discussion.quality,
            params: discussion.params.clone(),
            image_name: discussion.image.as_ref().map(|i| i.base_name.clone()),
        }
    }
}

/// Creates a new blank discussion, or returns the existing blank one.
///
/// # Arguments
/// * `project` - Project to create the discussion in, `None` for the global list
#[tauri::command]
pub async fn create_discussion(
    state: State<'_, AppState>,
    project: Option<ProjectId>,
) -> ExplorerResult<DiscussionId> {
    debug!("Received create_discussion command (project: {:?})", project);
    let mut store = state.store().await;
    Ok(store.create_blank(project)?)
}

/// Uploads an image into a blank discussion.
///
/// The bytes are decoded up front so corrupt uploads are rejected before
/// any state changes; on success the discussion takes the filename's base
/// name as its own, permanently.
#[tauri::command]
pub async fn upload_image(
    state: State<'_, AppState>,
    id: DiscussionId,
    filename: String,
    image_data: Vec<u8>,
) -> ExplorerResult<DiscussionSnapshot> {
    debug!(
        "Received upload_image command for discussion {} ('{}', {} bytes)",
        id,
        filename,
        image_data.len()
    );

    let format = format_from_bytes(&image_data)?;
    if let Some(claimed) = format_from_extension(&filename) {
        if claimed != format {
            warn!(
                "Upload '{}' claims {:?} but decodes as {:?}; trusting the bytes",
                filename, claimed, format
            );
        }
    }

    // Full decode to catch truncated or corrupt data, not just bad magic.
    let image_data = tokio::task::spawn_blocking(move || {
        crate::processing::decode_image(&image_data).map(|_| image_data)
    })
    .await
    .map_err(|e| crate::utils::ExplorerError::processing(format!("Task panicked: {e}")))??;

    let upload = UploadedImage {
        bytes: image_data,
        base_name: base_name(&filename),
        format,
    };

    let mut store = state.store().await;
    store.upload_image(id, upload)?;
    Ok(store.get(id)?.into())
}

/// Selects the active discussion.
#[tauri::command]
pub async fn select_discussion(state: State<'_, AppState>, id: DiscussionId) -> ExplorerResult<()> {
    let mut store = state.store().await;
    Ok(store.select(id)?)
}

/// Sets a discussion's style from its wire identifier.
///
/// The identifier is parsed against the closed style set here, so an
/// unknown name surfaces as a selection error and the stored style is
/// untouched.
#[tauri::command]
pub async fn update_style(
    state: State<'_, AppState>,
    id: DiscussionId,
    style: String,
) -> ExplorerResult<()> {
    let style: Style = style.parse()?;
    let mut store = state.store().await;
    Ok(store.update_style(id, style)?)
}

/// Sets a discussion's rendering quality mode.
#[tauri::command]
pub async fn update_quality(
    state: State<'_, AppState>,
    id: DiscussionId,
    quality: Quality,
) -> ExplorerResult<()> {
    let mut store = state.store().await;
    Ok(store.update_quality(id, quality)?)
}

/// Sets one slider value on a discussion.
#[tauri::command]
pub async fn update_param(
    state: State<'_, AppState>,
    id: DiscussionId,
    key: ParamKey,
    value: f64,
) -> ExplorerResult<()> {
    let mut store = state.store().await;
    store.update_param(id, key, value)
}

/// Lists every discussion in creation order.
#[tauri::command]
pub async fn list_discussions(state: State<'_, AppState>) -> ExplorerResult<Vec<DiscussionSummary>> {
    let store = state.store().await;
    Ok(store.list().map(DiscussionSummary::from).collect())
}

/// Lists the discussions outside any project, in creation order. This is
/// the sidebar's always-visible list; project discussions are fetched per
/// project instead.
#[tauri::command]
pub async fn global_discussions(
    state: State<'_, AppState>,
) -> ExplorerResult<Vec<DiscussionSummary>> {
    let store = state.store().await;
    Ok(store.global_discussions().map(DiscussionSummary::from).collect())
}

/// Fetches one discussion.
#[tauri::command]
pub async fn get_discussion(
    state: State<'_, AppState>,
    id: DiscussionId,
) -> ExplorerResult<DiscussionSnapshot> {
    let store = state.store().await;
    Ok(store.get(id)?.into())
}

/// The currently selected discussion, if any.
#[tauri::command]
pub async fn current_discussion(
    state: State<'_, AppState>,
) -> ExplorerResult<Option<DiscussionSnapshot>> {
    let store = state.store().await;
    Ok(store.current().map(DiscussionSnapshot::from))
}

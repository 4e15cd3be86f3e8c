//! Tauri command handlers for project management.

use serde::Serialize;
use tauri::State;
use tracing::debug;

use crate::commands::discussion::DiscussionSummary;
use crate::core::{AppState, Project, ProjectId};
use crate::utils::ExplorerResult;

/// Project view for the sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub discussion_count: usize,
}

impl ProjectSummary {
    fn new(project: &Project, discussion_count: usize) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            discussion_count,
        }
    }
}

/// Creates a project and enters it with no discussion selected.
/// The name must be non-empty after trimming.
#[tauri::command]
pub async fn create_project(state: State<'_, AppState>, name: String) -> ExplorerResult<ProjectId> {
    debug!("Received create_project command ('{}')", name);
    let mut store = state.store().await;
    store.create_project(&name)
}

/// Enters a project (`None` returns to the global list) and clears the
/// discussion selection.
#[tauri::command]
pub async fn open_project(
    state: State<'_, AppState>,
    project: Option<ProjectId>,
) -> ExplorerResult<()> {
    let mut store = state.store().await;
    Ok(store.open_project(project)?)
}

/// Lists every project in creation order.
#[tauri::command]
pub async fn list_projects(state: State<'_, AppState>) -> ExplorerResult<Vec<ProjectSummary>> {
    let store = state.store().await;
    Ok(store
        .projects()
        .map(|project| {
            let count = store
                .project_discussions(project.id)
                .map(|discussions| discussions.count())
                .unwrap_or(0);
            ProjectSummary::new(project, count)
        })
        .collect())
}

/// Lists one project's discussions in creation order.
#[tauri::command]
pub async fn project_discussions(
    state: State<'_, AppState>,
    id: ProjectId,
) -> ExplorerResult<Vec<DiscussionSummary>> {
    let store = state.store().await;
    Ok(store
        .project_discussions(id)?
        .map(DiscussionSummary::from)
        .collect())
}

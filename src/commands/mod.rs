//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the webview frontend:
//! - Discussion lifecycle: [`create_discussion`], [`upload_image`], [`select_discussion`]
//! - Style configuration: [`update_style`], [`update_quality`], [`update_param`]
//! - Projects: [`create_project`], [`open_project`], [`list_projects`]
//! - Rendering: [`render_styled_image`]

mod discussion;
mod project;
mod render;

pub use discussion::*;
pub use project::*;
pub use render::*;

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for the Image Style Explorer application.
// The lib.rs file serves only as a public API for external consumers.

mod utils;
mod core;
mod processing;
mod commands;

use tracing::{info, debug};
use crate::core::AppState;
use crate::commands::{
    create_discussion, upload_image, select_discussion, update_style, update_quality,
    update_param, list_discussions, global_discussions, get_discussion, current_discussion,
    create_project, open_project, list_projects, project_discussions, render_styled_image,
};

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)         // Keep colored output
        .with_writer(std::io::stdout)
        .compact();              // Use compact formatter instead of pretty

    subscriber.init();

    info!("=== Application Starting ===");

    let app = tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            create_discussion,
            upload_image,
            select_discussion,
            update_style,
            update_quality,
            update_param,
            list_discussions,
            global_discussions,
            get_discussion,
            current_discussion,
            create_project,
            open_project,
            list_projects,
            project_discussions,
            render_styled_image,
        ])
        .setup(|app| {
            use tauri::Manager;

            // One session store per application instance, seeded with the
            // initial blank discussion.
            app.manage(AppState::new());
            debug!("✓ AppState initialized");

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}

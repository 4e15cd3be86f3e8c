//! Error types for the style explorer.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;
use serde::Serialize;

use crate::core::{DiscussionId, ProjectId};

/// Errors raised by the session store when an operation addresses a record
/// that does not exist or cannot accept the mutation.
#[derive(Error, Debug, Serialize)]
pub enum StoreError {
    /// Operation referenced a discussion id that is not in the store
    #[error("Discussion not found: {0}")]
    NotFound(DiscussionId),
    /// Operation referenced a project id that is not in the store
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The addressed discussion exists but is in the wrong state for the
    /// operation (e.g. rendering a discussion with no image)
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Upload attempted on a discussion that already holds an image
    #[error("Discussion {0} already has an image; create a new discussion instead")]
    AlreadyHasImage(DiscussionId),
}

/// Main error type for the explorer application.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum ExplorerError {
    /// Store lifecycle rule was violated
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Style identifier not in the dispatch table
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Uploaded bytes could not be decoded as a supported image
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Slider value outside its allowed range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Filter application or encoding failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

// Helper methods for error creation
impl ExplorerError {
    pub fn unknown_style<T: Into<String>>(style: T) -> Self {
        Self::UnknownStyle(style.into())
    }

    pub fn unsupported_format<T: Into<String>>(msg: T) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn invalid_parameter<T: Into<String>>(msg: T) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

impl StoreError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

// Convert std::io::Error to ExplorerError
impl From<io::Error> for ExplorerError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

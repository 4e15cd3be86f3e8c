//! Discussion records: one uploaded image plus its style configuration.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::core::project::ProjectId;
use crate::core::types::{Quality, Style, StyleParams};
use crate::utils::ImageFormat;

/// Placeholder name given to a discussion until an image is uploaded.
pub const PLACEHOLDER_NAME: &str = "New Discussion";

/// Identifier of a discussion, stable for the session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionId(pub u64);

impl fmt::Display for DiscussionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The uploaded image owned by a discussion. Immutable once set.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Raw bytes exactly as uploaded
    pub bytes: Vec<u8>,
    /// Filename without directory or extension; becomes the discussion name
    pub base_name: String,
    /// Format detected from the magic bytes
    pub format: ImageFormat,
}

/// An isolated session unit: one image, one style configuration.
///
/// All mutable fields are read and written only through the store operation
/// that addresses this record, so discussions never share state.
#[derive(Debug, Clone)]
pub struct Discussion {
    pub id: DiscussionId,
    pub name: String,
    /// Owning project, or `None` for the global list
    pub project: Option<ProjectId>,
    pub image: Option<UploadedImage>,
    pub style: Style,
    pub quality: Quality,
    pub params: StyleParams,
}

impl Discussion {
    /// Creates a blank discussion with the placeholder name and defaults.
    pub fn new(id: DiscussionId, project: Option<ProjectId>) -> Self {
        Self {
            id,
            name: PLACEHOLDER_NAME.to_string(),
            project,
            image: None,
            style: Style::default(),
            quality: Quality::default(),
            params: StyleParams::default(),
        }
    }

    /// True while no image has been uploaded; blank discussions are the
    /// upload target and at most one exists store-wide.
    pub fn is_blank(&self) -> bool {
        self.image.is_none()
    }
}

//! In-memory session store for discussions and projects.
//!
//! Owns the ordered collections (insertion order = creation order) and the
//! active discussion/project pointers. All mutations are synchronous and
//! immediately visible to subsequent reads; nothing here is persisted.

use tracing::debug;

use crate::core::discussion::{Discussion, DiscussionId, UploadedImage};
use crate::core::project::{Project, ProjectId};
use crate::core::types::{ParamKey, Quality, Style};
use crate::utils::{validate_param, ExplorerResult, StoreError};

/// Per-session store. Each user session owns exactly one instance; there is
/// no cross-session sharing.
#[derive(Debug)]
pub struct SessionStore {
    discussions: Vec<Discussion>,
    projects: Vec<Project>,
    next_discussion_id: u64,
    next_project_id: u64,
    active_discussion: Option<DiscussionId>,
    active_project: Option<ProjectId>,
}

impl SessionStore {
    /// Creates a store seeded with one blank discussion, selected.
    pub fn new() -> Self {
        let mut store = Self {
            discussions: Vec::new(),
            projects: Vec::new(),
            next_discussion_id: 1,
            next_project_id: 1,
            active_discussion: None,
            active_project: None,
        };

        let id = store
            .create_blank(None)
            .expect("seeding the initial discussion cannot fail");
        debug!("Session store initialized with blank discussion {}", id);
        store
    }

    // ── Discussion lifecycle ────────────────────────────────────────────────

    /// Creates a blank discussion, or returns the existing blank one.
    ///
    /// At most one blank discussion exists store-wide, so if any discussion
    /// is still awaiting an upload its id is returned and nothing is created.
    /// Otherwise the new discussion is appended and selected.
    pub fn create_blank(&mut self, project: Option<ProjectId>) -> Result<DiscussionId, StoreError> {
        if let Some(project_id) = project {
            self.project(project_id)?;
        }

        if let Some(blank) = self.discussions.iter().find(|d| d.is_blank()) {
            debug!("Reusing blank discussion {} instead of creating another", blank.id);
            return Ok(blank.id);
        }

        let id = DiscussionId(self.next_discussion_id);
        self.next_discussion_id += 1;

        self.discussions.push(Discussion::new(id, project));
        self.active_discussion = Some(id);
        self.active_project = project;
        debug!("Created discussion {} (project: {:?})", id, project);
        Ok(id)
    }

    /// Attaches an uploaded image to a blank discussion and renames it to
    /// the upload's base name. The rename happens exactly once: a second
    /// upload is rejected with `AlreadyHasImage` and changes nothing.
    pub fn upload_image(
        &mut self,
        id: DiscussionId,
        image: UploadedImage,
    ) -> Result<(), StoreError> {
        let discussion = self
            .discussions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::invalid_state(format!("No discussion {} to upload into", id)))?;

        if !discussion.is_blank() {
            return Err(StoreError::AlreadyHasImage(id));
        }

        debug!(
            "Upload into discussion {}: '{}' ({:?}, {} bytes)",
            id,
            image.base_name,
            image.format,
            image.bytes.len()
        );
        discussion.name = image.base_name.clone();
        discussion.image = Some(image);
        Ok(())
    }

    /// Sets the active discussion pointer and syncs the active project to
    /// the discussion's project. On failure the pointers are unchanged.
    pub fn select(&mut self, id: DiscussionId) -> Result<(), StoreError> {
        let project = self.get(id)?.project;
        self.active_project = project;
        self.active_discussion = Some(id);
        debug!("Selected discussion {}", id);
        Ok(())
    }

    // ── Discussion mutation ─────────────────────────────────────────────────

    pub fn update_style(&mut self, id: DiscussionId, style: Style) -> Result<(), StoreError> {
        let discussion = self.get_mut(id)?;
        discussion.style = style;
        debug!("Discussion {} style set to {}", id, style);
        Ok(())
    }

    pub fn update_quality(&mut self, id: DiscussionId, quality: Quality) -> Result<(), StoreError> {
        let discussion = self.get_mut(id)?;
        discussion.quality = quality;
        debug!("Discussion {} quality set to {:?}", id, quality);
        Ok(())
    }

    /// Writes one slider value after range validation; out-of-range values
    /// leave the stored parameter unchanged.
    pub fn update_param(&mut self, id: DiscussionId, key: ParamKey, value: f64) -> ExplorerResult<()> {
        validate_param(key, value)?;
        let discussion = self.get_mut(id)?;
        discussion.params.set(key, value);
        debug!("Discussion {} param {:?} set to {}", id, key, value);
        Ok(())
    }

    // ── Read-only accessors ─────────────────────────────────────────────────

    pub fn get(&self, id: DiscussionId) -> Result<&Discussion, StoreError> {
        self.discussions
            .iter()
            .find(|d| d.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// All discussions in creation order.
    pub fn list(&self) -> impl Iterator<Item = &Discussion> {
        self.discussions.iter()
    }

    pub fn active_discussion(&self) -> Option<DiscussionId> {
        self.active_discussion
    }

    pub fn active_project(&self) -> Option<ProjectId> {
        self.active_project
    }

    /// The currently selected discussion, if any.
    pub fn current(&self) -> Option<&Discussion> {
        self.active_discussion.and_then(|id| self.get(id).ok())
    }

    // ── Projects ────────────────────────────────────────────────────────────

    /// Creates a project from a trimmed, non-empty name and enters it with
    /// no discussion selected.
    pub fn create_project(&mut self, name: &str) -> ExplorerResult<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(crate::utils::ExplorerError::invalid_parameter(
                "Project name must not be empty",
            ));
        }

        let id = ProjectId(self.next_project_id);
        self.next_project_id += 1;

        self.projects.push(Project {
            id,
            name: name.to_string(),
        });
        self.active_project = Some(id);
        self.active_discussion = None;
        debug!("Created project {} ('{}')", id, name);
        Ok(id)
    }

    /// Enters a project (`None` = global mode) and clears the discussion
    /// selection. On failure both pointers are unchanged.
    pub fn open_project(&mut self, project: Option<ProjectId>) -> Result<(), StoreError> {
        if let Some(id) = project {
            self.project(id)?;
        }
        self.active_project = project;
        self.active_discussion = None;
        debug!("Opened project {:?}", project);
        Ok(())
    }

    pub fn project(&self, id: ProjectId) -> Result<&Project, StoreError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::ProjectNotFound(id))
    }

    /// All projects in creation order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// The discussions belonging to one project, in creation order.
    pub fn project_discussions(
        &self,
        id: ProjectId,
    ) -> Result<impl Iterator<Item = &Discussion>, StoreError> {
        self.project(id)?;
        Ok(self.discussions.iter().filter(move |d| d.project == Some(id)))
    }

    /// The discussions outside any project, in creation order.
    pub fn global_discussions(&self) -> impl Iterator<Item = &Discussion> {
        self.discussions.iter().filter(|d| d.project.is_none())
    }

    fn get_mut(&mut self, id: DiscussionId) -> Result<&mut Discussion, StoreError> {
        self.discussions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StyleParams;
    use crate::utils::{ExplorerError, ImageFormat};

    fn upload(name: &str) -> UploadedImage {
        UploadedImage {
            bytes: vec![0u8; 16],
            base_name: crate::utils::base_name(name),
            format: ImageFormat::PNG,
        }
    }

    #[test]
    fn starts_with_one_selected_blank_discussion() {
        let store = SessionStore::new();
        let all: Vec<_> = store.list().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_blank());
        assert_eq!(all[0].name, "New Discussion");
        assert_eq!(store.active_discussion(), Some(all[0].id));
    }

    #[test]
    fn never_more_than_one_blank_discussion() {
        let mut store = SessionStore::new();
        let first = store.create_blank(None).unwrap();

        for _ in 0..5 {
            assert_eq!(store.create_blank(None).unwrap(), first);
        }
        assert_eq!(store.list().count(), 1);

        store.upload_image(first, upload("a.png")).unwrap();
        let second = store.create_blank(None).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.list().filter(|d| d.is_blank()).count(), 1);
    }

    #[test]
    fn blank_reuse_crosses_project_boundaries() {
        let mut store = SessionStore::new();
        let blank = store.create_blank(None).unwrap();
        let project = store.create_project("Travel").unwrap();

        // The global blank is reused even while a project is active.
        assert_eq!(store.create_blank(Some(project)).unwrap(), blank);
    }

    #[test]
    fn upload_renames_exactly_once() {
        let mut store = SessionStore::new();
        let id = store.create_blank(None).unwrap();

        store.upload_image(id, upload("vacation.jpg")).unwrap();
        let discussion = store.get(id).unwrap();
        assert_eq!(discussion.name, "vacation");
        assert!(!discussion.is_blank());

        let err = store.upload_image(id, upload("other.png")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyHasImage(found) if found == id));
        // Name and image are untouched by the rejected upload.
        let discussion = store.get(id).unwrap();
        assert_eq!(discussion.name, "vacation");
        assert_eq!(discussion.image.as_ref().unwrap().base_name, "vacation");
    }

    #[test]
    fn upload_into_missing_discussion_is_invalid_state() {
        let mut store = SessionStore::new();
        let err = store
            .upload_image(DiscussionId(999), upload("a.png"))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn select_missing_id_leaves_pointer_unchanged() {
        let mut store = SessionStore::new();
        let active = store.active_discussion();

        let err = store.select(DiscussionId(42)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == DiscussionId(42)));
        assert_eq!(store.active_discussion(), active);
    }

    #[test]
    fn discussions_are_isolated() {
        let mut store = SessionStore::new();
        let a = store.create_blank(None).unwrap();
        store.upload_image(a, upload("a.png")).unwrap();
        let b = store.create_blank(None).unwrap();
        store.upload_image(b, upload("b.png")).unwrap();

        store.update_style(a, Style::Cartoon).unwrap();
        store.update_quality(a, Quality::High).unwrap();
        store.update_param(a, ParamKey::BlurRadius, 21.0).unwrap();

        let b_record = store.get(b).unwrap();
        assert_eq!(b_record.style, Style::None);
        assert_eq!(b_record.quality, Quality::Fast);
        assert_eq!(b_record.params, StyleParams::default());
        assert_eq!(b_record.image.as_ref().unwrap().base_name, "b");
    }

    #[test]
    fn out_of_range_param_is_rejected_and_unchanged() {
        let mut store = SessionStore::new();
        let id = store.create_blank(None).unwrap();

        let err = store.update_param(id, ParamKey::BlurRadius, 100.0).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidParameter(_)));
        assert_eq!(store.get(id).unwrap().params.blur_radius, 9);
    }

    #[test]
    fn list_preserves_creation_order() {
        let mut store = SessionStore::new();
        let mut ids = vec![store.active_discussion().unwrap()];
        for name in ["a.png", "b.png", "c.png"] {
            let id = store.create_blank(None).unwrap();
            // First iteration reuses the seeded blank.
            store.upload_image(id, upload(name)).unwrap();
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }

        let listed: Vec<_> = store.list().map(|d| d.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn project_listings_are_scoped() {
        let mut store = SessionStore::new();
        // Populate the seeded global blank so project blanks can be created.
        let global = store.active_discussion().unwrap();
        store.upload_image(global, upload("global.png")).unwrap();

        let travel = store.create_project("Travel").unwrap();
        let travel_disc = store.create_blank(Some(travel)).unwrap();
        store.upload_image(travel_disc, upload("beach.jpg")).unwrap();

        let work = store.create_project("Work").unwrap();
        let work_disc = store.create_blank(Some(work)).unwrap();
        store.upload_image(work_disc, upload("chart.png")).unwrap();

        let travel_ids: Vec<_> = store
            .project_discussions(travel)
            .unwrap()
            .map(|d| d.id)
            .collect();
        assert_eq!(travel_ids, vec![travel_disc]);

        let global_ids: Vec<_> = store.global_discussions().map(|d| d.id).collect();
        assert_eq!(global_ids, vec![global]);
    }

    #[test]
    fn selecting_a_project_discussion_syncs_the_project_pointer() {
        let mut store = SessionStore::new();
        let global = store.active_discussion().unwrap();
        store.upload_image(global, upload("global.png")).unwrap();

        let project = store.create_project("Travel").unwrap();
        let disc = store.create_blank(Some(project)).unwrap();

        store.select(global).unwrap();
        assert_eq!(store.active_project(), None);

        store.select(disc).unwrap();
        assert_eq!(store.active_project(), Some(project));
    }

    #[test]
    fn empty_project_name_is_rejected() {
        let mut store = SessionStore::new();
        assert!(store.create_project("   ").is_err());
        assert_eq!(store.projects().count(), 0);
    }

    #[test]
    fn open_missing_project_leaves_pointers_unchanged() {
        let mut store = SessionStore::new();
        let active = store.active_discussion();

        let err = store.open_project(Some(ProjectId(7))).unwrap_err();
        assert!(matches!(err, StoreError::ProjectNotFound(_)));
        assert_eq!(store.active_discussion(), active);
        assert_eq!(store.active_project(), None);
    }
}

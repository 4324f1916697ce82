// Form controller.
// Owns the workspace (document, template, colors), persists it on every mutation and hands
// preview renders to the debouncing scheduler. Mutations are async because the store write is
// awaited on the blocking pool before the method returns.

pub mod avatar;
pub mod handlers;
pub mod scheduler;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::document::{
    CvDocument, FieldError, FieldValue, PersonalField, RemoveOutcome, Section,
};
use crate::models::template::{AccentColor, ColorMap, TemplateId};
use crate::render::{self, Markup};
use crate::storage::Persistence;

use avatar::{AvatarOutcome, AvatarTicket, TicketBook};
use scheduler::{RenderJob, RenderScheduler};

/// The complete editable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workspace {
    pub document: CvDocument,
    pub template: TemplateId,
    pub colors: ColorMap,
}

impl Workspace {
    /// Restores saved state; each record falls back to its default independently.
    pub fn load(persistence: &Persistence) -> Self {
        Self {
            document: persistence.load().unwrap_or_default(),
            template: persistence.load_template_id(),
            colors: persistence.load_color_map().unwrap_or_default(),
        }
    }

    pub fn accent(&self) -> &AccentColor {
        self.colors.get(self.template)
    }
}

/// How a mutation reaches the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refresh {
    Debounced,
    Immediate,
}

pub struct FormController {
    workspace: Workspace,
    persistence: Persistence,
    scheduler: RenderScheduler,
    tickets: TicketBook,
}

impl FormController {
    /// Loads saved state and renders the first preview right away.
    pub fn new(persistence: Persistence, scheduler: RenderScheduler) -> Self {
        let workspace = Workspace::load(&persistence);
        info!(
            "Workspace loaded: template {}, accent {}",
            workspace.template,
            workspace.accent()
        );
        let mut controller = Self {
            workspace,
            persistence,
            scheduler,
            tickets: TicketBook::default(),
        };
        let job = controller.render_job();
        controller.scheduler.render_now(job);
        controller
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn render_job(&self) -> RenderJob {
        RenderJob {
            document: self.workspace.document.clone(),
            template: self.workspace.template,
            accent: self.workspace.accent().clone(),
        }
    }

    /// The current surface, rendered synchronously.
    pub fn render_surface(&self) -> Markup {
        render::render(
            &self.workspace.document,
            self.workspace.template,
            self.workspace.accent(),
        )
    }

    /// `CV-<name>.pdf`, whitespace runs in the name collapsed to `-`.
    pub fn export_filename(&self) -> String {
        let name = self
            .workspace
            .document
            .personal
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        if name.is_empty() {
            "CV-my-cv.pdf".to_string()
        } else {
            format!("CV-{name}.pdf")
        }
    }

    // ── document edits ──────────────────────────────────────────────────────

    pub async fn set_personal(&mut self, field: PersonalField, value: String) {
        self.workspace.document.set_personal(field, value);
        self.commit(Refresh::Debounced).await;
    }

    pub async fn set_objective(&mut self, value: String) {
        self.workspace.document.objective = value;
        self.commit(Refresh::Debounced).await;
    }

    pub async fn add_item(&mut self, section: Section) -> usize {
        let index = self.workspace.document.add_item(section);
        debug!("Added {} item #{index}", section.as_str());
        self.commit(Refresh::Debounced).await;
        index
    }

    /// Lists never shrink below one entry; only an actual removal counts as a mutation.
    pub async fn remove_item(&mut self, section: Section, index: usize) -> RemoveOutcome {
        let outcome = self.workspace.document.remove_item(section, index);
        if outcome == RemoveOutcome::Removed {
            self.commit(Refresh::Debounced).await;
        }
        outcome
    }

    pub async fn set_item_field(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: FieldValue,
    ) -> Result<(), FieldError> {
        self.workspace
            .document
            .set_item_field(section, index, field, value)?;
        self.commit(Refresh::Debounced).await;
        Ok(())
    }

    // ── template & colors ────────────────────────────────────────────────────

    pub async fn select_template(&mut self, template: TemplateId) {
        self.workspace.template = template;
        self.commit(Refresh::Immediate).await;
    }

    /// Sets the accent of the current template. Swatch picks pass `immediate`; raw picker
    /// input goes through the debouncer.
    pub async fn set_color(&mut self, color: AccentColor, immediate: bool) {
        self.workspace.colors.set(self.workspace.template, color);
        let refresh = if immediate {
            Refresh::Immediate
        } else {
            Refresh::Debounced
        };
        self.commit(refresh).await;
    }

    pub async fn reset_color(&mut self) {
        self.workspace.colors.reset(self.workspace.template);
        self.commit(Refresh::Immediate).await;
    }

    // ── avatar ──────────────────────────────────────────────────────────────

    pub fn begin_avatar(&mut self) -> AvatarTicket {
        self.tickets.issue()
    }

    /// Applies a fully read upload, unless it is not an image or a newer avatar request was
    /// made in the meantime.
    pub async fn complete_avatar(
        &mut self,
        ticket: AvatarTicket,
        content_type: Option<&str>,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> AvatarOutcome {
        if !self.tickets.is_current(ticket) {
            debug!("Dropping superseded avatar upload");
            return AvatarOutcome::Superseded;
        }
        let Some(mime) = avatar::image_mime(content_type, file_name) else {
            debug!("Ignoring non-image avatar upload {file_name:?} ({content_type:?})");
            return AvatarOutcome::Ignored;
        };
        self.workspace.document.personal.avatar = avatar::to_data_uri(&mime, bytes);
        self.commit(Refresh::Debounced).await;
        AvatarOutcome::Applied
    }

    /// Also invalidates any upload still being read.
    pub async fn remove_avatar(&mut self) {
        self.tickets.issue();
        self.workspace.document.personal.avatar.clear();
        self.commit(Refresh::Debounced).await;
    }

    // ── reset ───────────────────────────────────────────────────────────────

    pub async fn clear(&mut self, confirmed: bool) -> Result<(), AppError> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(
                "Clearing deletes all CV data; resend with confirm=true".to_string(),
            ));
        }
        self.persistence.clear_all().await;
        self.tickets.issue();
        self.workspace = Workspace::default();
        info!("Workspace cleared");
        let job = self.render_job();
        self.scheduler.render_now(job);
        Ok(())
    }

    /// Returns once the new state is on disk.
    async fn commit(&mut self, refresh: Refresh) {
        self.persist().await;
        let job = self.render_job();
        match refresh {
            Refresh::Debounced => self.scheduler.schedule(job),
            Refresh::Immediate => self.scheduler.render_now(job),
        }
    }

    // Store I/O is blocking; it runs on the blocking pool while the caller awaits.
    async fn persist(&self) {
        self.persistence
            .save_all(
                self.workspace.document.clone(),
                self.workspace.template,
                self.workspace.colors.clone(),
            )
            .await;
    }
}

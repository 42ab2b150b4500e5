use std::sync::Arc;
use std::time::Instant;

use crate::assets::TemplateSource;
use crate::catalog::{Catalog, ColorOption, GarmentType, GarmentView, HexColor};
use crate::designer::dialog::{ConfirmationDialog, PendingAction};
use crate::designer::toast::Toast;
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::pages::DesignerQuery;
use crate::render::MockupImage;
use crate::scene::ObjectId;
use crate::session::{CanvasSession, CommandOutcome, DesignUpload, SessionCommand, SessionConfig};

const UPLOAD_OK: &str = "Design uploaded successfully!";
const UPLOAD_FAILED: &str = "Failed to upload design. Please try again with a different file.";
const COLOR_OK: &str = "Color updated successfully!";
const COLOR_FAILED: &str = "Failed to change color. Please try again.";
const VIEW_OK: &str = "View changed successfully!";
const VIEW_FAILED: &str = "Failed to change view. Please try again.";
const DOWNLOAD_OK: &str = "Mockup downloaded successfully!";
const DOWNLOAD_FAILED: &str = "Failed to download mockup. Please try again.";
const TEMPLATE_FAILED: &str = "Failed to load template. Please try again.";
const EDIT_FAILED: &str = "Failed to update design. Please try again.";
const DELETE_FAILED: &str = "Failed to delete design. Please try again.";

/// Lifecycle of the designer's canvas session.
#[derive(Debug, Default)]
pub enum SessionState {
    /// Not mounted yet.
    #[default]
    Absent,
    /// Mounted and usable.
    Present(CanvasSession),
    /// Torn down by unmount.
    Disposed,
}

impl SessionState {
    fn take(&mut self) -> Option<CanvasSession> {
        match std::mem::replace(self, SessionState::Disposed) {
            SessionState::Present(s) => Some(s),
            SessionState::Absent => {
                *self = SessionState::Absent;
                None
            }
            SessionState::Disposed => None,
        }
    }
}

/// The design layer the user uploaded most recently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentDesign {
    /// Scene object holding the design.
    pub id: ObjectId,
    /// File name of the upload.
    pub name: String,
}

/// Result of confirming the pending dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum Confirmed {
    /// No dialog was open.
    Nothing,
    /// The design was replaced by a new layer.
    DesignReplaced(ObjectId),
    /// The mockup is ready to save as [`MockupImage::file_name`].
    Download(MockupImage),
    /// The session was recreated.
    Reloaded,
    /// The action failed; an error toast is showing.
    Failed,
}

/// Controller behind the designer page.
///
/// Every action catches its own failure, reports it through a toast and leaves the previous
/// state in place. Canvas mutations go through [`CanvasSession::apply`].
pub struct Designer {
    config: SessionConfig,
    catalog: Arc<Catalog>,
    source: Arc<dyn TemplateSource>,
    session: SessionState,
    query: DesignerQuery,
    garment: GarmentType,
    view: GarmentView,
    color: HexColor,
    design: Option<CurrentDesign>,
    toast: Option<Toast>,
    dialog: Option<ConfirmationDialog>,
}

impl std::fmt::Debug for Designer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Designer")
            .field("session", &self.session)
            .field("garment", &self.garment)
            .field("view", &self.view)
            .field("color", &self.color)
            .field("design", &self.design)
            .field("toast", &self.toast)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

impl Designer {
    /// Unmounted designer.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<Catalog>,
        source: Arc<dyn TemplateSource>,
    ) -> Self {
        let garment = GarmentType::Tshirt;
        let color = catalog.default_color(garment);
        Self {
            config,
            catalog,
            source,
            session: SessionState::Absent,
            query: DesignerQuery::default(),
            garment,
            view: GarmentView::default(),
            color,
            design: None,
            toast: None,
            dialog: None,
        }
    }

    /// Create the session for `query` and load its template.
    ///
    /// A query without a template mounts an empty canvas. A template that fails to load leaves
    /// the session mounted without a background and shows an error toast.
    #[tracing::instrument(skip(self))]
    pub fn mount(&mut self, query: &DesignerQuery) -> MockwearResult<()> {
        let mut session = CanvasSession::new(
            self.config.clone(),
            Arc::clone(&self.catalog),
            Arc::clone(&self.source),
        )?;
        if let Some(old) = self.session.take() {
            old.dispose();
        }

        self.query = query.clone();
        self.garment = query.garment;
        self.view = query.view;
        self.color = self.catalog.default_color(query.garment);
        self.design = None;
        self.dialog = None;

        if query.template.is_some() {
            let load = SessionCommand::LoadTemplate {
                garment: self.garment,
                view: self.view,
            };
            if let Err(err) = session.apply(load) {
                tracing::error!(error = %err, "template load failed");
                self.toast = Some(Toast::error(TEMPLATE_FAILED));
            }
        }
        self.session = SessionState::Present(session);
        Ok(())
    }

    /// Dispose the session.
    pub fn unmount(&mut self) {
        if let Some(session) = self.session.take() {
            session.dispose();
        }
        self.session = SessionState::Disposed;
        self.dialog = None;
        self.design = None;
    }

    /// Session lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.session
    }

    /// Mounted session, if any.
    pub fn session(&self) -> Option<&CanvasSession> {
        match &self.session {
            SessionState::Present(s) => Some(s),
            _ => None,
        }
    }

    /// Query the designer was mounted with.
    pub fn query(&self) -> &DesignerQuery {
        &self.query
    }

    /// Selected garment.
    pub fn garment(&self) -> GarmentType {
        self.garment
    }

    /// Selected view.
    pub fn view(&self) -> GarmentView {
        self.view
    }

    /// Selected color.
    pub fn color(&self) -> HexColor {
        self.color
    }

    /// Colors offered for the selected garment.
    pub fn palette(&self) -> &[ColorOption] {
        self.catalog.palette(self.garment)
    }

    /// Most recent design upload.
    pub fn current_design(&self) -> Option<&CurrentDesign> {
        self.design.as_ref()
    }

    /// Visible toast.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Open confirmation dialog.
    pub fn dialog(&self) -> Option<&ConfirmationDialog> {
        self.dialog.as_ref()
    }

    /// Whether the download action is enabled.
    pub fn can_download(&self) -> bool {
        self.session().is_some_and(CanvasSession::has_template)
    }

    /// Close the toast by hand.
    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Drop the toast once its duration has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
    }

    /// Add a design, or ask before replacing the current one.
    pub fn upload_design(&mut self, upload: DesignUpload) {
        if self.design.is_some() {
            self.dialog = Some(ConfirmationDialog::replace_design(upload));
            return;
        }
        let name = upload.name.clone();
        match self.apply(SessionCommand::AddImage(upload)).and_then(object_of) {
            Ok(id) => {
                self.design = Some(CurrentDesign { id, name });
                self.toast = Some(Toast::success(UPLOAD_OK));
            }
            Err(err) => {
                tracing::warn!(error = %err, "design upload failed");
                self.toast = Some(Toast::error(UPLOAD_FAILED));
            }
        }
    }

    /// Tint the garment.
    pub fn change_color(&mut self, color: HexColor) {
        match self.apply(SessionCommand::SetTint(color)) {
            Ok(_) => {
                self.color = color;
                self.toast = Some(Toast::success(COLOR_OK));
            }
            Err(err) => {
                tracing::warn!(error = %err, "color change failed");
                self.toast = Some(Toast::error(COLOR_FAILED));
            }
        }
    }

    /// Switch the view, reloading the template.
    pub fn change_view(&mut self, view: GarmentView) {
        let load = SessionCommand::LoadTemplate {
            garment: self.garment,
            view,
        };
        let result = self
            .apply(load)
            .map_err(|e| MockwearError::view(format!("switch to {view}: {e}")));
        match result {
            Ok(_) => {
                self.view = view;
                self.query.view = view;
                self.toast = Some(Toast::success(VIEW_OK));
            }
            Err(err) => {
                tracing::warn!(error = %err, "view change failed");
                self.toast = Some(Toast::error(VIEW_FAILED));
            }
        }
    }

    /// Ask before downloading. Returns `false` when downloading is disabled.
    pub fn request_download(&mut self) -> bool {
        if !self.can_download() {
            return false;
        }
        self.dialog = Some(ConfirmationDialog::download());
        true
    }

    /// Ask before reloading the designer.
    pub fn request_reload(&mut self) {
        self.dialog = Some(ConfirmationDialog::reload());
    }

    /// Dismiss the dialog without acting.
    pub fn cancel(&mut self) {
        self.dialog = None;
    }

    /// Run the pending dialog action.
    pub fn confirm(&mut self) -> Confirmed {
        let Some(dialog) = self.dialog.take() else {
            return Confirmed::Nothing;
        };
        match dialog.action {
            PendingAction::ReplaceDesign(upload) => self.replace_design(upload),
            PendingAction::Download => self.download(),
            PendingAction::Reload => {
                let query = self.query.clone();
                match self.mount(&query) {
                    Ok(()) => Confirmed::Reloaded,
                    Err(err) => {
                        tracing::error!(error = %err, "reload failed");
                        Confirmed::Failed
                    }
                }
            }
        }
    }

    /// Rotate the selected design by the configured step.
    pub fn rotate(&mut self) -> bool {
        let step = self.config.rotate_step_deg;
        self.edit_selection(SessionCommand::RotateSelection(step))
    }

    /// Enlarge the selected design.
    pub fn zoom_in(&mut self) -> bool {
        let factor = self.config.zoom_in_factor;
        self.edit_selection(SessionCommand::ScaleSelection(factor))
    }

    /// Shrink the selected design.
    pub fn zoom_out(&mut self) -> bool {
        let factor = self.config.zoom_out_factor;
        self.edit_selection(SessionCommand::ScaleSelection(factor))
    }

    /// Delete the selected design.
    pub fn delete_selected(&mut self) -> bool {
        match self.apply(SessionCommand::DeleteSelection) {
            Ok(CommandOutcome::Object(id)) => {
                if self.design.as_ref().is_some_and(|d| d.id == id) {
                    self.design = None;
                }
                true
            }
            Ok(_) => false,
            Err(err) => {
                tracing::warn!(error = %err, "design delete failed");
                self.toast = Some(Toast::error(DELETE_FAILED));
                false
            }
        }
    }

    /// Route one mutation to the mounted session.
    fn apply(&mut self, command: SessionCommand) -> MockwearResult<CommandOutcome> {
        match &mut self.session {
            SessionState::Present(s) => s.apply(command),
            _ => Err(MockwearError::session("designer is not mounted")),
        }
    }

    fn edit_selection(&mut self, command: SessionCommand) -> bool {
        match self.apply(command) {
            Ok(CommandOutcome::Done) => true,
            Ok(_) => false,
            Err(err) => {
                tracing::warn!(error = %err, "design edit failed");
                self.toast = Some(Toast::error(EDIT_FAILED));
                false
            }
        }
    }

    fn replace_design(&mut self, upload: DesignUpload) -> Confirmed {
        let Some(old) = self.design.as_ref().map(|d| d.id) else {
            return Confirmed::Nothing;
        };
        let still_there = self
            .session()
            .is_some_and(|s| s.scene().get(old).is_some());
        let name = upload.name.clone();
        let command = if still_there {
            SessionCommand::ReplaceImage { old, upload }
        } else {
            SessionCommand::AddImage(upload)
        };
        match self.apply(command).and_then(object_of) {
            Ok(id) => {
                self.design = Some(CurrentDesign { id, name });
                self.toast = Some(Toast::success(UPLOAD_OK));
                Confirmed::DesignReplaced(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "design replace failed");
                self.toast = Some(Toast::error(UPLOAD_FAILED));
                Confirmed::Failed
            }
        }
    }

    fn download(&mut self) -> Confirmed {
        match self.apply(SessionCommand::Export) {
            Ok(CommandOutcome::Exported(Some(mockup))) => {
                self.toast = Some(Toast::success(DOWNLOAD_OK));
                Confirmed::Download(mockup)
            }
            Ok(_) => Confirmed::Nothing,
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.toast = Some(Toast::error(DOWNLOAD_FAILED));
                Confirmed::Failed
            }
        }
    }
}

fn object_of(outcome: CommandOutcome) -> MockwearResult<ObjectId> {
    match outcome {
        CommandOutcome::Object(id) => Ok(id),
        other => Err(MockwearError::session(format!(
            "expected a design object, got {other:?}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designer/controller.rs"]
mod tests;

use crate::catalog::{GarmentType, GarmentView, HexColor};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::MockwearResult;
use crate::render::MockupImage;
use crate::scene::ObjectId;
use crate::session::canvas_session::CanvasSession;
use crate::session::upload::DesignUpload;

/// One mutation of a [`CanvasSession`].
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    /// Replace the background with a garment/view template.
    LoadTemplate {
        /// Garment to load.
        garment: GarmentType,
        /// View of the garment.
        view: GarmentView,
    },
    /// Tint the background.
    SetTint(HexColor),
    /// Remove the background tint.
    ClearTint,
    /// Add a design above the background and select it.
    AddImage(DesignUpload),
    /// Swap an existing design for a new one.
    ReplaceImage {
        /// Design being replaced.
        old: ObjectId,
        /// Replacement payload.
        upload: DesignUpload,
    },
    /// Remove the selected design.
    DeleteSelection,
    /// Rotate the selection by degrees.
    RotateSelection(f64),
    /// Multiply the selection's scale.
    ScaleSelection(f64),
    /// Translate the selection.
    MoveSelection(Vec2),
    /// Select a design by id.
    Select(ObjectId),
    /// Select the topmost design under a canvas point.
    SelectAt(Point),
    /// Drop the selection.
    ClearSelection,
    /// Rasterize and encode the mockup.
    Export,
}

/// What applying a [`SessionCommand`] produced.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The command ran and changed nothing worth reporting.
    Done,
    /// An object was created, removed or selected.
    Object(ObjectId),
    /// The command targets the selection and nothing was selected.
    NoSelection,
    /// Export result; `None` when no template was loaded.
    Exported(Option<MockupImage>),
}

impl CanvasSession {
    /// Apply a single command. This is the one entry point front ends route events through.
    pub fn apply(&mut self, command: SessionCommand) -> MockwearResult<CommandOutcome> {
        tracing::trace!(?command, "apply");
        self.commands_applied += 1;
        let selection = |changed: bool| {
            if changed {
                CommandOutcome::Done
            } else {
                CommandOutcome::NoSelection
            }
        };
        Ok(match command {
            SessionCommand::LoadTemplate { garment, view } => {
                CommandOutcome::Object(self.load_template(garment, view)?)
            }
            SessionCommand::SetTint(color) => {
                self.set_tint_color(color)?;
                CommandOutcome::Done
            }
            SessionCommand::ClearTint => {
                self.clear_tint()?;
                CommandOutcome::Done
            }
            SessionCommand::AddImage(upload) => {
                CommandOutcome::Object(self.add_user_image(&upload.bytes, Some(upload.name.as_str()))?)
            }
            SessionCommand::ReplaceImage { old, upload } => CommandOutcome::Object(
                self.replace_user_image(old, &upload.bytes, Some(upload.name.as_str()))?,
            ),
            SessionCommand::DeleteSelection => match self.delete_selection()? {
                Some(id) => CommandOutcome::Object(id),
                None => CommandOutcome::NoSelection,
            },
            SessionCommand::RotateSelection(deg) => selection(self.rotate_selection(deg)?),
            SessionCommand::ScaleSelection(factor) => selection(self.scale_selection(factor)?),
            SessionCommand::MoveSelection(d) => selection(self.move_selection(d.x, d.y)?),
            SessionCommand::Select(id) => {
                self.select(id)?;
                CommandOutcome::Object(id)
            }
            SessionCommand::SelectAt(p) => match self.select_at(p) {
                Some(id) => CommandOutcome::Object(id),
                None => CommandOutcome::NoSelection,
            },
            SessionCommand::ClearSelection => {
                self.clear_selection();
                CommandOutcome::Done
            }
            SessionCommand::Export => CommandOutcome::Exported(self.export_png()?),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/command.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::session::DesignUpload;

/// Visual weight of a confirmation dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// Destructive but recoverable.
    #[default]
    Warning,
    /// Loses unsaved work.
    Danger,
    /// Informational.
    Info,
}

/// What happens when the dialog is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Swap the current design for this upload.
    ReplaceDesign(DesignUpload),
    /// Export the mockup.
    Download,
    /// Dispose and recreate the session.
    Reload,
}

/// A modal yes/no prompt guarding a [`PendingAction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationDialog {
    /// Visual weight.
    pub kind: DialogKind,
    /// Heading.
    pub title: &'static str,
    /// Body text.
    pub message: &'static str,
    /// Action run on confirm.
    pub action: PendingAction,
}

impl ConfirmationDialog {
    /// Label of the confirm button.
    pub const CONFIRM_LABEL: &'static str = "Confirm";
    /// Label of the cancel button.
    pub const CANCEL_LABEL: &'static str = "Cancel";

    /// Warning shown before a second upload replaces the current design.
    pub fn replace_design(upload: DesignUpload) -> Self {
        Self {
            kind: DialogKind::Warning,
            title: "Replace Design",
            message: "Are you sure you want to replace your current design? This action cannot be undone.",
            action: PendingAction::ReplaceDesign(upload),
        }
    }

    /// Info prompt shown before exporting.
    pub fn download() -> Self {
        Self {
            kind: DialogKind::Info,
            title: "Download Mockup",
            message: "Are you sure you want to download this mockup? Make sure all your changes are saved.",
            action: PendingAction::Download,
        }
    }

    /// Danger prompt shown before discarding the session.
    pub fn reload() -> Self {
        Self {
            kind: DialogKind::Danger,
            title: "Reload Designer",
            message: "Are you sure you want to reload the designer? All unsaved changes will be lost.",
            action: PendingAction::Reload,
        }
    }
}

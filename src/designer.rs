//! Designer controller and its feedback widgets.
//!
//! A [`Designer`] owns at most one [`CanvasSession`](crate::session::CanvasSession) and turns user
//! actions into session calls, toasts and confirmation dialogs.

pub(crate) mod boundary;
pub(crate) mod controller;
pub(crate) mod dialog;
pub(crate) mod toast;

pub use boundary::{ErrorBoundary, FallbackView, Render, Rendered};
pub use controller::{Confirmed, CurrentDesign, Designer, SessionState};
pub use dialog::{ConfirmationDialog, DialogKind, PendingAction};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastKind};

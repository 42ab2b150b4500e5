//! Canvas session: one scene graph plus the operations a designer drives it with.
//!
//! Every mutation redraws synchronously. Mutations are also expressible as [`SessionCommand`]
//! values so a front end can funnel events through a single queue, and template loads can be
//! split into a begin/finish pair whose stale finishes are discarded.

pub(crate) mod canvas_session;
pub(crate) mod command;
pub(crate) mod config;
pub(crate) mod script;
pub(crate) mod upload;

pub use canvas_session::{CanvasSession, PendingTemplateLoad, TemplateLoadOutcome, TemplateLoadTicket};
pub use command::{CommandOutcome, SessionCommand};
pub use config::{CanvasPreset, SessionConfig};
pub use script::{Script, ScriptStep, run_script};
pub use upload::DesignUpload;

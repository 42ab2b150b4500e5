use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{GarmentType, GarmentView, HexColor};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::render::MockupImage;
use crate::session::canvas_session::CanvasSession;
use crate::session::command::{CommandOutcome, SessionCommand};
use crate::session::config::SessionConfig;
use crate::session::upload::DesignUpload;

/// JSON form of a session command.
///
/// Design files are referenced by path, relative to the script's directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Load a garment/view template.
    LoadTemplate {
        /// Garment to load.
        garment: GarmentType,
        /// View, front when omitted.
        #[serde(default)]
        view: GarmentView,
    },
    /// Tint the background.
    Tint {
        /// Tint color.
        color: HexColor,
    },
    /// Remove the tint.
    ClearTint,
    /// Add a design file.
    AddImage {
        /// PNG / JPEG / SVG file.
        path: PathBuf,
    },
    /// Remove the selected design.
    DeleteSelection,
    /// Rotate the selection.
    Rotate {
        /// Clockwise degrees.
        degrees: f64,
    },
    /// Rotate the selection by the configured step.
    RotateStep,
    /// Scale the selection.
    Scale {
        /// Scale multiplier.
        factor: f64,
    },
    /// Scale the selection by the configured zoom-in factor.
    ZoomIn,
    /// Scale the selection by the configured zoom-out factor.
    ZoomOut,
    /// Translate the selection.
    Move {
        /// Horizontal offset in canvas pixels.
        dx: f64,
        /// Vertical offset in canvas pixels.
        dy: f64,
    },
    /// Select the topmost design under a canvas point.
    SelectAt {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
    },
    /// Drop the selection.
    ClearSelection,
    /// Export the mockup, optionally writing it to `path`.
    Export {
        /// Output file.
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl ScriptStep {
    /// Tag name used in JSON.
    pub fn op(&self) -> &'static str {
        match self {
            ScriptStep::LoadTemplate { .. } => "load_template",
            ScriptStep::Tint { .. } => "tint",
            ScriptStep::ClearTint => "clear_tint",
            ScriptStep::AddImage { .. } => "add_image",
            ScriptStep::DeleteSelection => "delete_selection",
            ScriptStep::Rotate { .. } => "rotate",
            ScriptStep::RotateStep => "rotate_step",
            ScriptStep::Scale { .. } => "scale",
            ScriptStep::ZoomIn => "zoom_in",
            ScriptStep::ZoomOut => "zoom_out",
            ScriptStep::Move { .. } => "move",
            ScriptStep::SelectAt { .. } => "select_at",
            ScriptStep::ClearSelection => "clear_selection",
            ScriptStep::Export { .. } => "export",
        }
    }

    /// Resolve into a command, reading design files under `base_dir`.
    pub fn to_command(
        &self,
        config: &SessionConfig,
        base_dir: &Path,
    ) -> MockwearResult<SessionCommand> {
        Ok(match self {
            ScriptStep::LoadTemplate { garment, view } => SessionCommand::LoadTemplate {
                garment: *garment,
                view: *view,
            },
            ScriptStep::Tint { color } => SessionCommand::SetTint(*color),
            ScriptStep::ClearTint => SessionCommand::ClearTint,
            ScriptStep::AddImage { path } => {
                SessionCommand::AddImage(DesignUpload::from_path(base_dir.join(path))?)
            }
            ScriptStep::DeleteSelection => SessionCommand::DeleteSelection,
            ScriptStep::Rotate { degrees } => SessionCommand::RotateSelection(*degrees),
            ScriptStep::RotateStep => SessionCommand::RotateSelection(config.rotate_step_deg),
            ScriptStep::Scale { factor } => SessionCommand::ScaleSelection(*factor),
            ScriptStep::ZoomIn => SessionCommand::ScaleSelection(config.zoom_in_factor),
            ScriptStep::ZoomOut => SessionCommand::ScaleSelection(config.zoom_out_factor),
            ScriptStep::Move { dx, dy } => SessionCommand::MoveSelection(Vec2::new(*dx, *dy)),
            ScriptStep::SelectAt { x, y } => SessionCommand::SelectAt(Point::new(*x, *y)),
            ScriptStep::ClearSelection => SessionCommand::ClearSelection,
            ScriptStep::Export { .. } => SessionCommand::Export,
        })
    }
}

/// An ordered list of steps, stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MockwearResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MockwearError::serde(format!("parse command script JSON: {e}")))
    }

    /// Parse a script from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> MockwearResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MockwearError::validation(format!("open command script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Run every step of `script` against `session`.
///
/// Relative paths resolve against `base_dir`. Returns the last exported mockup.
pub fn run_script(
    session: &mut CanvasSession,
    script: &Script,
    base_dir: &Path,
) -> MockwearResult<Option<MockupImage>> {
    let mut last = None;
    for (index, step) in script.steps.iter().enumerate() {
        let _span = tracing::info_span!("script_step", index, op = step.op()).entered();
        let command = step.to_command(session.config(), base_dir)?;
        match session.apply(command)? {
            CommandOutcome::Exported(Some(mockup)) => {
                if let ScriptStep::Export { path: Some(path) } = step {
                    let out = base_dir.join(path);
                    mockup.write_to(&out)?;
                    tracing::info!(path = %out.display(), "wrote mockup");
                }
                last = Some(mockup);
            }
            CommandOutcome::Exported(None) => {
                tracing::warn!("export skipped: no template loaded");
            }
            CommandOutcome::NoSelection => {
                tracing::warn!("nothing selected");
            }
            CommandOutcome::Done | CommandOutcome::Object(_) => {}
        }
    }
    Ok(last)
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;

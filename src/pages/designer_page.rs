use std::fmt::Write as _;

use anyhow::bail;

use crate::catalog::GarmentView;
use crate::designer::{ConfirmationDialog, Designer, Render, SessionState};

/// Text summary of a designer: preview state and the four control panels.
#[derive(Clone, Copy, Debug)]
pub struct DesignerPage<'a> {
    designer: &'a Designer,
}

impl<'a> DesignerPage<'a> {
    /// View over `designer`.
    pub fn new(designer: &'a Designer) -> Self {
        Self { designer }
    }
}

fn marker(selected: bool) -> &'static str {
    if selected { "(x)" } else { "( )" }
}

impl Render for DesignerPage<'_> {
    fn render(&self) -> anyhow::Result<String> {
        let d = self.designer;
        let session = match d.state() {
            SessionState::Present(s) => s,
            SessionState::Absent => bail!("designer is not mounted"),
            SessionState::Disposed => bail!("designer session has been disposed"),
        };

        let mut out = String::new();
        writeln!(out, "Design Your Mockup")?;
        writeln!(out, "Customize your clothing mockup with colors and designs")?;
        writeln!(out)?;

        match session.template() {
            Some(t) => {
                let canvas = session.config().canvas;
                writeln!(
                    out,
                    "Preview: {} ({}) on a {}x{} canvas, {} design layer(s)",
                    t.garment.label(),
                    t.view.label(),
                    canvas.width,
                    canvas.height,
                    session.scene().designs().count()
                )?;
            }
            None => writeln!(out, "Select a template to get started")?,
        }

        writeln!(out)?;
        writeln!(out, "View Options")?;
        for view in GarmentView::ALL {
            writeln!(out, "  {} {}", marker(view == d.view()), view.label())?;
        }

        writeln!(out)?;
        writeln!(out, "Upload Design")?;
        match d.current_design() {
            Some(design) => writeln!(out, "  current: {}", design.name)?,
            None => writeln!(out, "  PNG, JPG or SVG")?,
        }

        writeln!(out)?;
        writeln!(out, "Customize Colors")?;
        if d.query().template.is_some() {
            for option in d.palette() {
                writeln!(
                    out,
                    "  {} {} {}",
                    marker(option.value == d.color()),
                    option.name,
                    option.value
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Download")?;
        if d.can_download() {
            writeln!(out, "  [Download Mockup]")?;
        } else {
            writeln!(out, "  [Download Mockup] (disabled)")?;
        }

        if let Some(dialog) = d.dialog() {
            writeln!(out)?;
            writeln!(out, "== {} ({:?}) ==", dialog.title, dialog.kind)?;
            writeln!(out, "{}", dialog.message)?;
            writeln!(
                out,
                "[{}] [{}]",
                ConfirmationDialog::CANCEL_LABEL,
                ConfirmationDialog::CONFIRM_LABEL
            )?;
        }
        if let Some(toast) = d.toast() {
            writeln!(out)?;
            writeln!(out, "<{}> {}", toast.kind().as_str(), toast.message())?;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/designer_page.rs"]
mod tests;

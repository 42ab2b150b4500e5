use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::HexColor;
use crate::foundation::core::Canvas;
use crate::foundation::error::{MockwearError, MockwearResult};

/// Named canvas sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasPreset {
    /// 800×600 landscape workspace.
    #[default]
    Studio,
    /// 400×500 portrait workspace.
    Compact,
}

impl CanvasPreset {
    /// Canvas dimensions for the preset.
    pub fn canvas(self) -> Canvas {
        match self {
            CanvasPreset::Studio => Canvas {
                width: 800,
                height: 600,
            },
            CanvasPreset::Compact => Canvas {
                width: 400,
                height: 500,
            },
        }
    }
}

impl FromStr for CanvasPreset {
    type Err = MockwearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "studio" => Ok(CanvasPreset::Studio),
            "compact" => Ok(CanvasPreset::Compact),
            other => Err(MockwearError::validation(format!(
                "unknown canvas preset \"{other}\" (expected studio or compact)"
            ))),
        }
    }
}

/// Tunables for a canvas session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Drawing surface size.
    pub canvas: Canvas,
    /// Color the canvas is cleared to before compositing.
    pub background: HexColor,
    /// Width templates are scaled to when loaded.
    pub template_width: f64,
    /// Width uploaded designs are scaled to when added.
    pub design_width: f64,
    /// Strength of the tint overlay in `[0, 1]`.
    pub tint_alpha: f32,
    /// Scale factor used by "zoom in".
    pub zoom_in_factor: f64,
    /// Scale factor used by "zoom out".
    pub zoom_out_factor: f64,
    /// Rotation applied by a single "rotate" action, in degrees.
    pub rotate_step_deg: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_preset(CanvasPreset::Studio)
    }
}

impl SessionConfig {
    /// Defaults with the canvas taken from `preset`.
    pub fn for_preset(preset: CanvasPreset) -> Self {
        Self {
            canvas: preset.canvas(),
            background: HexColor::WHITE,
            template_width: 400.0,
            design_width: 200.0,
            tint_alpha: 0.5,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            rotate_step_deg: 90.0,
        }
    }

    /// Check ranges of every field.
    pub fn validate(&self) -> MockwearResult<()> {
        self.canvas.validate()?;
        let positive = |name: &str, v: f64| -> MockwearResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(MockwearError::validation(format!("{name} must be > 0, got {v}")))
            }
        };
        positive("template_width", self.template_width)?;
        positive("design_width", self.design_width)?;
        positive("zoom_in_factor", self.zoom_in_factor)?;
        positive("zoom_out_factor", self.zoom_out_factor)?;
        if !self.rotate_step_deg.is_finite() {
            return Err(MockwearError::validation("rotate_step_deg must be finite"));
        }
        if !self.tint_alpha.is_finite() || !(0.0..=1.0).contains(&self.tint_alpha) {
            return Err(MockwearError::validation(format!(
                "tint_alpha must be within [0, 1], got {}",
                self.tint_alpha
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from a JSON reader. Missing fields take defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> MockwearResult<Self> {
        let cfg: SessionConfig = serde_json::from_reader(r)
            .map_err(|e| MockwearError::serde(format!("parse session config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MockwearResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MockwearError::validation(format!("open session config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;

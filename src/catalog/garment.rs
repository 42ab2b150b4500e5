use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::MockwearError;

/// Garment family a template belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    /// Short-sleeve crew-neck t-shirt.
    Tshirt,
    /// Pullover hoodie.
    Hoodie,
    /// Polo shirt with collar and placket.
    Polo,
}

impl GarmentType {
    /// All garment types in catalog order.
    pub const ALL: [GarmentType; 3] = [GarmentType::Tshirt, GarmentType::Hoodie, GarmentType::Polo];

    /// Stable identifier used in paths and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            GarmentType::Tshirt => "tshirt",
            GarmentType::Hoodie => "hoodie",
            GarmentType::Polo => "polo",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            GarmentType::Tshirt => "T-Shirt",
            GarmentType::Hoodie => "Hoodie",
            GarmentType::Polo => "Polo",
        }
    }

    /// Resolve a loose template hint such as `"tshirt-front"` by prefix.
    ///
    /// Unknown hints fall back to [`GarmentType::Tshirt`].
    pub fn from_template_hint(hint: &str) -> Self {
        let hint = hint.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| hint.starts_with(g.as_str()))
            .unwrap_or(GarmentType::Tshirt)
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarmentType {
    type Err = MockwearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tshirt" | "t-shirt" => Ok(GarmentType::Tshirt),
            "hoodie" => Ok(GarmentType::Hoodie),
            "polo" => Ok(GarmentType::Polo),
            other => Err(MockwearError::validation(format!(
                "unknown garment type \"{other}\" (expected tshirt, hoodie or polo)"
            ))),
        }
    }
}

/// Viewing angle of a garment template.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GarmentView {
    /// Front view.
    #[default]
    Front,
    /// Back view.
    Back,
    /// Side view.
    Side,
}

impl GarmentView {
    /// All views in selector order.
    pub const ALL: [GarmentView; 3] = [GarmentView::Front, GarmentView::Back, GarmentView::Side];

    /// Stable identifier used in paths and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            GarmentView::Front => "front",
            GarmentView::Back => "back",
            GarmentView::Side => "side",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            GarmentView::Front => "Front",
            GarmentView::Back => "Back",
            GarmentView::Side => "Side",
        }
    }
}

impl fmt::Display for GarmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarmentView {
    type Err = MockwearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(GarmentView::Front),
            "back" => Ok(GarmentView::Back),
            "side" => Ok(GarmentView::Side),
            other => Err(MockwearError::validation(format!(
                "unknown garment view \"{other}\" (expected front, back or side)"
            ))),
        }
    }
}

/// Static garment base image keyed by garment type and view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Garment family.
    pub garment: GarmentType,
    /// Viewing angle.
    pub view: GarmentView,
    /// Image path relative to the template assets root.
    pub image_path: String,
}

impl Template {
    /// Conventional template path for a garment/view pair.
    pub fn default_path(garment: GarmentType, view: GarmentView) -> String {
        format!("images/templates/clothing/{garment}-{view}.png")
    }
}

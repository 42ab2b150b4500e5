//! Immutable garment, palette and gallery data.
//!
//! A [`Catalog`] is built once (either [`Catalog::builtin`] or loaded from JSON) and handed to
//! sessions and designers by `Arc`. Nothing in the crate reads catalog data from globals.

pub(crate) mod color;
pub(crate) mod gallery;
pub(crate) mod garment;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MockwearError, MockwearResult};

pub use color::{ColorOption, HexColor};
pub use gallery::{Category, TemplateListing};
pub use garment::{GarmentType, GarmentView, Template};

/// JSON-facing catalog definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogDef {
    /// Template images, one per garment/view pair.
    pub templates: Vec<Template>,
    /// Color palette per garment; the first entry is the default color.
    pub palettes: BTreeMap<GarmentType, Vec<ColorOption>>,
    /// Gallery cards.
    #[serde(default)]
    pub listings: Vec<TemplateListing>,
    /// Filter categories offered by the gallery, in display order.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

/// Validated, read-only catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    def: CatalogDef,
}

impl Catalog {
    /// The stock catalog: three garments, three views each, with their palettes and gallery.
    pub fn builtin() -> Self {
        let templates = GarmentType::ALL
            .into_iter()
            .flat_map(|garment| {
                GarmentView::ALL.into_iter().map(move |view| Template {
                    garment,
                    view,
                    image_path: Template::default_path(garment, view),
                })
            })
            .collect();

        let white = ColorOption::new("White", HexColor::WHITE);
        let black = ColorOption::new("Black", HexColor::BLACK);
        let red = ColorOption::new("Red", HexColor::rgb(0xff, 0x00, 0x00));
        let navy = ColorOption::new("Navy", HexColor::rgb(0x00, 0x00, 0x80));
        let green = ColorOption::new("Forest Green", HexColor::rgb(0x22, 0x8b, 0x22));
        let gray = ColorOption::new("Gray", HexColor::rgb(0x80, 0x80, 0x80));
        let burgundy = ColorOption::new("Burgundy", HexColor::rgb(0x80, 0x00, 0x20));
        let charcoal = ColorOption::new("Charcoal", HexColor::rgb(0x36, 0x45, 0x4f));

        let mut palettes = BTreeMap::new();
        palettes.insert(
            GarmentType::Tshirt,
            vec![
                white.clone(),
                black.clone(),
                red,
                navy.clone(),
                green.clone(),
                gray.clone(),
                burgundy.clone(),
            ],
        );
        palettes.insert(
            GarmentType::Hoodie,
            vec![
                black.clone(),
                gray.clone(),
                navy.clone(),
                burgundy.clone(),
                green.clone(),
                charcoal,
            ],
        );
        palettes.insert(
            GarmentType::Polo,
            vec![white, black, navy, burgundy, green, gray],
        );

        Self {
            def: CatalogDef {
                templates,
                palettes,
                listings: gallery::builtin_listings(),
                categories: default_categories(),
            },
        }
    }

    /// Validate a definition and wrap it.
    pub fn from_def(def: CatalogDef) -> MockwearResult<Self> {
        validate_def(&def)?;
        Ok(Self { def })
    }

    /// Parse and validate a catalog from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MockwearResult<Self> {
        let def: CatalogDef = serde_json::from_reader(r)
            .map_err(|e| MockwearError::serde(format!("parse catalog JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MockwearResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MockwearError::validation(format!("open catalog JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Underlying definition.
    pub fn def(&self) -> &CatalogDef {
        &self.def
    }

    /// Look up the template for a garment/view pair.
    pub fn template(&self, garment: GarmentType, view: GarmentView) -> MockwearResult<&Template> {
        self.def
            .templates
            .iter()
            .find(|t| t.garment == garment && t.view == view)
            .ok_or_else(|| {
                MockwearError::template_load(format!("no template for {garment}/{view}"))
            })
    }

    /// All templates in catalog order.
    pub fn templates(&self) -> &[Template] {
        &self.def.templates
    }

    /// Palette for a garment. Validation guarantees it is non-empty.
    pub fn palette(&self, garment: GarmentType) -> &[ColorOption] {
        self.def
            .palettes
            .get(&garment)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First palette entry for a garment, white when the palette is missing.
    pub fn default_color(&self, garment: GarmentType) -> HexColor {
        self.palette(garment)
            .first()
            .map(|c| c.value)
            .unwrap_or(HexColor::WHITE)
    }

    /// Gallery categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.def.categories
    }

    /// Gallery listings that pass `category`.
    pub fn listings(&self, category: Category) -> impl Iterator<Item = &TemplateListing> {
        self.def
            .listings
            .iter()
            .filter(move |l| category.admits(l.category))
    }

    /// Listing by gallery id.
    pub fn listing(&self, id: u32) -> Option<&TemplateListing> {
        self.def.listings.iter().find(|l| l.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_def(def: &CatalogDef) -> MockwearResult<()> {
    let mut seen = BTreeSet::new();
    for t in &def.templates {
        if t.image_path.trim().is_empty() {
            return Err(MockwearError::validation(format!(
                "template {}/{} has an empty image_path",
                t.garment, t.view
            )));
        }
        if !seen.insert((t.garment, t.view)) {
            return Err(MockwearError::validation(format!(
                "duplicate template for {}/{}",
                t.garment, t.view
            )));
        }
    }

    for garment in GarmentType::ALL {
        for view in GarmentView::ALL {
            if !seen.contains(&(garment, view)) {
                return Err(MockwearError::validation(format!(
                    "missing template for {garment}/{view}"
                )));
            }
        }
        match def.palettes.get(&garment) {
            Some(p) if !p.is_empty() => {}
            _ => {
                return Err(MockwearError::validation(format!(
                    "garment {garment} needs at least one palette color"
                )));
            }
        }
    }

    let mut ids = BTreeSet::new();
    for l in &def.listings {
        if !ids.insert(l.id) {
            return Err(MockwearError::validation(format!(
                "duplicate gallery listing id {}",
                l.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;

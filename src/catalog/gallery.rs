use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::garment::{GarmentType, GarmentView};
use crate::foundation::error::MockwearError;

/// Gallery filter category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Matches every listing.
    #[serde(rename = "All")]
    All,
    /// T-shirt templates.
    #[serde(rename = "T-Shirts")]
    TShirts,
    /// Hoodie templates.
    #[serde(rename = "Hoodies")]
    Hoodies,
    /// Polo shirt templates.
    #[serde(rename = "Polo Shirts")]
    PoloShirts,
    /// Device mockups (no listings shipped yet).
    #[serde(rename = "Devices")]
    Devices,
    /// Print mockups (no listings shipped yet).
    #[serde(rename = "Print")]
    Print,
    /// Social media mockups (no listings shipped yet).
    #[serde(rename = "Social Media")]
    SocialMedia,
}

impl Category {
    /// Categories in the order the gallery shows them.
    pub const ALL: [Category; 7] = [
        Category::All,
        Category::TShirts,
        Category::Hoodies,
        Category::PoloShirts,
        Category::Devices,
        Category::Print,
        Category::SocialMedia,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::TShirts => "T-Shirts",
            Category::Hoodies => "Hoodies",
            Category::PoloShirts => "Polo Shirts",
            Category::Devices => "Devices",
            Category::Print => "Print",
            Category::SocialMedia => "Social Media",
        }
    }

    /// Category that holds listings for a garment.
    pub fn for_garment(garment: GarmentType) -> Self {
        match garment {
            GarmentType::Tshirt => Category::TShirts,
            GarmentType::Hoodie => Category::Hoodies,
            GarmentType::Polo => Category::PoloShirts,
        }
    }

    /// Return `true` when a listing in `other` passes this filter.
    pub fn admits(self, other: Category) -> bool {
        self == Category::All || self == other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = MockwearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label()
                    .chars()
                    .filter(|ch| ch.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase()
                    == key
            })
            .ok_or_else(|| MockwearError::validation(format!("unknown category \"{s}\"")))
    }
}

/// One card in the template gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateListing {
    /// Gallery id, carried into the designer query as `template`.
    pub id: u32,
    /// Card title.
    pub title: String,
    /// Filter category.
    pub category: Category,
    /// Short description.
    pub description: String,
    /// Thumbnail path relative to the assets root.
    pub thumbnail: String,
    /// Garment family opened in the designer.
    pub garment: GarmentType,
    /// View opened in the designer.
    pub view: GarmentView,
}

impl TemplateListing {
    /// Designer link for this listing.
    pub fn href(&self) -> String {
        format!(
            "/designer?template={}&type={}&view={}",
            self.id, self.garment, self.view
        )
    }
}

pub(crate) fn builtin_listings() -> Vec<TemplateListing> {
    let mut out = Vec::with_capacity(9);
    let mut id = 1;
    for garment in GarmentType::ALL {
        let (title_base, noun) = match garment {
            GarmentType::Tshirt => ("Classic T-Shirt", "t-shirt"),
            GarmentType::Hoodie => ("Classic Hoodie", "hoodie"),
            GarmentType::Polo => ("Classic Polo", "polo shirt"),
        };
        for view in GarmentView::ALL {
            out.push(TemplateListing {
                id,
                title: format!("{title_base} - {}", view.label()),
                category: Category::for_garment(garment),
                description: format!("Classic {noun} mockup with {view} view."),
                thumbnail: format!("templates/{garment}-{view}.jpg"),
                garment,
                view,
            });
            id += 1;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/gallery.rs"]
mod tests;

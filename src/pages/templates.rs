use std::fmt::Write as _;

use crate::catalog::{Catalog, Category};
use crate::designer::Render;

/// Gallery page filtered by one category.
#[derive(Clone, Copy, Debug)]
pub struct TemplatesPage<'a> {
    catalog: &'a Catalog,
    category: Category,
}

impl<'a> TemplatesPage<'a> {
    /// Gallery showing listings admitted by `category`.
    pub fn new(catalog: &'a Catalog, category: Category) -> Self {
        Self { catalog, category }
    }

    /// Active filter.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Same page with another filter selected.
    pub fn select(self, category: Category) -> Self {
        Self { category, ..self }
    }
}

impl Render for TemplatesPage<'_> {
    fn render(&self) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "Choose Your Template")?;
        writeln!(out, "Select from our collection of premium clothing templates")?;
        writeln!(out)?;

        let tabs: Vec<String> = self
            .catalog
            .categories()
            .iter()
            .map(|c| {
                if *c == self.category {
                    format!("[{c}]")
                } else {
                    c.to_string()
                }
            })
            .collect();
        writeln!(out, "{}", tabs.join("  "))?;

        let mut shown = 0usize;
        for listing in self.catalog.listings(self.category) {
            shown += 1;
            writeln!(out)?;
            writeln!(out, "#{} {} ({})", listing.id, listing.title, listing.category)?;
            writeln!(out, "  {}", listing.description)?;
            writeln!(out, "  thumbnail: {}", listing.thumbnail)?;
            writeln!(out, "  [Use Template] {}", listing.href())?;
        }
        if shown == 0 {
            writeln!(out)?;
            writeln!(out, "No templates in {} yet.", self.category)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/templates.rs"]
mod tests;

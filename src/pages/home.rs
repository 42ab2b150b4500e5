use std::fmt::Write as _;

use crate::designer::Render;
use crate::pages::route::{DesignerQuery, Route};

const FEATURES: [(&str, &str); 3] = [
    (
        "Premium Templates",
        "Choose from our collection of high-quality clothing templates including t-shirts, hoodies, and more.",
    ),
    (
        "Easy Customization",
        "Customize colors, add your designs, and create unique mockups with our intuitive designer.",
    ),
    (
        "Instant Download",
        "Download your mockups in high resolution for use in your marketing materials or online store.",
    ),
];

/// Landing page: hero, calls to action and feature blurbs.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomePage;

impl Render for HomePage {
    fn render(&self) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "Create Professional")?;
        writeln!(out, "Clothing Mockups")?;
        writeln!(out)?;
        writeln!(
            out,
            "Design and customize your clothing mockups with our easy-to-use designer. \
             Perfect for showcasing your brand or creating unique merchandise."
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "[Get Started] {}",
            Route::Designer(DesignerQuery::default()).href()
        )?;
        writeln!(out, "[View Templates] {}", Route::Templates.href())?;
        writeln!(out)?;
        writeln!(out, "FEATURES")?;
        writeln!(out, "Everything you need to create amazing mockups")?;
        for (title, blurb) in FEATURES {
            writeln!(out)?;
            writeln!(out, "* {title}")?;
            writeln!(out, "  {blurb}")?;
        }
        Ok(out)
    }
}

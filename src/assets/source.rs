use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::PreparedImage;
use crate::assets::decode::decode_any;
use crate::assets::silhouette::{SILHOUETTE_WIDTH, silhouette_svg};
use crate::assets::store::normalize_rel_path;
use crate::catalog::{GarmentType, GarmentView, Template};
use crate::foundation::error::{MockwearError, MockwearResult};

/// Resolves a catalog [`Template`] into decoded pixels.
///
/// Sources are shared between a designer and background loader threads, hence `Send + Sync`.
pub trait TemplateSource: Send + Sync {
    /// Load and decode the base image for `template`.
    fn load(&self, template: &Template) -> MockwearResult<PreparedImage>;
}

/// Reads template images from a directory, resolving catalog paths beneath it.
#[derive(Clone, Debug)]
pub struct FsTemplateSource {
    root: PathBuf,
}

impl FsTemplateSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Assets root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &str) -> MockwearResult<PathBuf> {
        let norm = normalize_rel_path(rel)
            .map_err(|e| MockwearError::template_load(format!("bad template path '{rel}': {e}")))?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl TemplateSource for FsTemplateSource {
    fn load(&self, template: &Template) -> MockwearResult<PreparedImage> {
        let p = self.resolve(&template.image_path)?;
        let bytes = std::fs::read(&p).map_err(|e| {
            MockwearError::template_load(format!("failed to read template '{}': {e}", p.display()))
        })?;
        decode_any(&bytes, SILHOUETTE_WIDTH).map_err(|e| {
            MockwearError::template_load(format!(
                "failed to decode template '{}': {e}",
                p.display()
            ))
        })
    }
}

/// Flat vector garments rendered on demand; needs no files.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTemplateSource;

impl TemplateSource for BuiltinTemplateSource {
    fn load(&self, template: &Template) -> MockwearResult<PreparedImage> {
        let svg = silhouette_svg(template.garment, template.view);
        decode_any(svg.as_bytes(), SILHOUETTE_WIDTH)
            .map_err(|e| MockwearError::template_load(format!("built-in silhouette: {e}")))
    }
}

/// Tries `primary`, then `fallback` when the primary fails.
pub struct FallbackTemplateSource {
    primary: Box<dyn TemplateSource>,
    fallback: Box<dyn TemplateSource>,
}

impl FallbackTemplateSource {
    /// Chain two sources.
    pub fn new(primary: impl TemplateSource + 'static, fallback: impl TemplateSource + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }
}

impl TemplateSource for FallbackTemplateSource {
    fn load(&self, template: &Template) -> MockwearResult<PreparedImage> {
        match self.primary.load(template) {
            Ok(img) => Ok(img),
            Err(e) => {
                tracing::warn!(
                    garment = %template.garment,
                    view = %template.view,
                    error = %e,
                    "template source failed, using fallback"
                );
                self.fallback.load(template)
            }
        }
    }
}

/// Pre-decoded templates held in memory, keyed by garment and view.
#[derive(Clone, Debug, Default)]
pub struct MemoryTemplateSource {
    images: HashMap<(GarmentType, GarmentView), PreparedImage>,
}

impl MemoryTemplateSource {
    /// Empty source; every load fails until images are inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the image served for a garment/view pair.
    pub fn insert(&mut self, garment: GarmentType, view: GarmentView, image: PreparedImage) {
        self.images.insert((garment, view), image);
    }

    /// Builder-style [`MemoryTemplateSource::insert`].
    pub fn with(mut self, garment: GarmentType, view: GarmentView, image: PreparedImage) -> Self {
        self.insert(garment, view, image);
        self
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn load(&self, template: &Template) -> MockwearResult<PreparedImage> {
        self.images
            .get(&(template.garment, template.view))
            .cloned()
            .ok_or_else(|| {
                MockwearError::template_load(format!(
                    "no in-memory template for {}/{}",
                    template.garment, template.view
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;

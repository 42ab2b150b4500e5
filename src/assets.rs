//! Image decoding and template image sources.

pub(crate) mod decode;
pub(crate) mod silhouette;
pub(crate) mod source;
pub(crate) mod store;
pub(crate) mod svg_raster;

use std::sync::Arc;

pub use source::{
    BuiltinTemplateSource, FallbackTemplateSource, FsTemplateSource, MemoryTemplateSource,
    TemplateSource,
};

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap premultiplied bytes, checking the buffer length.
    pub fn from_premul(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> crate::MockwearResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(crate::MockwearError::validation(format!(
                "image buffer of {} bytes does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

#[derive(Clone, Debug)]
/// Parsed SVG document.
pub(crate) struct PreparedSvg {
    pub(crate) tree: Arc<usvg::Tree>,
}

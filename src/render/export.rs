use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{MockwearError, MockwearResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// File name offered for downloaded mockups.
pub const MOCKUP_FILE_NAME: &str = "mockup.png";

/// A flattened, encoded mockup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockupImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG file bytes.
    pub png: Vec<u8>,
}

impl MockupImage {
    /// Suggested download file name.
    pub fn file_name(&self) -> &'static str {
        MOCKUP_FILE_NAME
    }

    /// Write the PNG to `path`, creating parent directories.
    pub fn write_to(&self, path: impl AsRef<std::path::Path>) -> MockwearResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .map_err(|e| MockwearError::export(format!("write png '{}': {e}", path.display())))
    }
}

/// Encode a frame as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> MockwearResult<MockupImage> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| MockwearError::export("frame buffer does not match its dimensions"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| MockwearError::export(format!("encode png: {e}")))?;

    Ok(MockupImage {
        width: frame.width,
        height: frame.height,
        png,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;

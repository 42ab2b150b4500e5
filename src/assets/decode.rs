use std::sync::Arc;

use anyhow::Context;

use crate::assets::{PreparedImage, PreparedSvg, svg_raster};
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest edge accepted for decoded raster inputs.
pub(crate) const MAX_IMAGE_DIM: u32 = 8_192;

pub(crate) fn decode_image(bytes: &[u8]) -> MockwearResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(MockwearError::validation("image has zero width or height"));
    }
    if width > MAX_IMAGE_DIM || height > MAX_IMAGE_DIM {
        return Err(MockwearError::validation(format!(
            "image size too large: {width}x{height} (max {MAX_IMAGE_DIM}x{MAX_IMAGE_DIM})"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub(crate) fn parse_svg(bytes: &[u8]) -> MockwearResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Sniff SVG documents, which `image` does not decode.
///
/// Skips the XML prologue (declaration, processing instructions, comments, doctype with an
/// internal subset) and checks that the root element is `svg`.
pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    if image::guess_format(bytes).is_ok() {
        return false;
    }
    let mut rest = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    loop {
        rest = rest.trim_ascii_start();
        if let Some(after) = rest.strip_prefix(b"<?") {
            let Some(end) = find(after, b"?>") else {
                return false;
            };
            rest = &after[end + 2..];
        } else if let Some(after) = rest.strip_prefix(b"<!--") {
            let Some(end) = find(after, b"-->") else {
                return false;
            };
            rest = &after[end + 3..];
        } else if starts_with_ignore_case(rest, b"<!DOCTYPE") {
            let Some(end) = doctype_end(&rest[9..]) else {
                return false;
            };
            rest = &rest[9 + end + 1..];
        } else {
            return starts_with_ignore_case(rest, b"<svg")
                && rest
                    .get(4)
                    .is_some_and(|&b| b.is_ascii_whitespace() || b == b'>' || b == b'/');
        }
    }
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|h| h.eq_ignore_ascii_case(prefix))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// Offset of the `>` closing a doctype, skipping over a bracketed internal subset.
fn doctype_end(body: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in body.iter().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Decode any supported image (PNG, JPEG, SVG, ...).
///
/// SVG documents are rasterized so their width is at least `min_svg_width` pixels.
pub(crate) fn decode_any(bytes: &[u8], min_svg_width: u32) -> MockwearResult<PreparedImage> {
    if bytes.is_empty() {
        return Err(MockwearError::validation("image payload is empty"));
    }
    if looks_like_svg(bytes) {
        let svg = parse_svg(bytes)?;
        let (w, h) = svg_raster::svg_raster_size(&svg.tree, min_svg_width)?;
        let rgba = svg_raster::rasterize_svg_to_premul_rgba8(&svg.tree, w, h)?;
        return PreparedImage::from_premul(w, h, rgba);
    }
    decode_image(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

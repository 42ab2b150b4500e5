use crate::assets::decode::MAX_IMAGE_DIM;
use crate::foundation::error::{MockwearError, MockwearResult};

/// Compute the raster size for an SVG so that its width is at least `min_width`.
///
/// The aspect ratio of the document is preserved. Documents already wider than `min_width` are
/// rasterized at their intrinsic size.
pub(crate) fn svg_raster_size(tree: &usvg::Tree, min_width: u32) -> MockwearResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(MockwearError::validation("svg has invalid width/height"));
    }

    let scale = (f64::from(min_width.max(1)) / w).max(1.0);
    let out_w = (w * scale).ceil().max(1.0) as u32;
    let out_h = (h * scale).ceil().max(1.0) as u32;

    if out_w > MAX_IMAGE_DIM || out_h > MAX_IMAGE_DIM {
        return Err(MockwearError::validation(format!(
            "svg raster size too large: {out_w}x{out_h} (max {MAX_IMAGE_DIM}x{MAX_IMAGE_DIM})"
        )));
    }
    Ok((out_w, out_h))
}

pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> MockwearResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MockwearError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

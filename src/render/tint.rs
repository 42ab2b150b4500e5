use serde::{Deserialize, Serialize};

use crate::assets::PreparedImage;
use crate::catalog::HexColor;
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::foundation::math::mul_div255_u8;

/// Color overlay blended onto the template image.
///
/// Each covered pixel becomes `src * (1 - k) + color * k`, where `k = alpha * color.a`; the
/// pixel's own alpha is kept, so the garment outline is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    /// Overlay color.
    pub color: HexColor,
    /// Blend strength in `[0, 1]`.
    pub alpha: f32,
}

impl Tint {
    /// Create a validated tint.
    pub fn new(color: HexColor, alpha: f32) -> MockwearResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(MockwearError::color(format!(
                "tint alpha must be within [0, 1], got {alpha}"
            )));
        }
        Ok(Self { color, alpha })
    }

    /// Effective blend weight in 0..=255.
    pub(crate) fn weight(self) -> u16 {
        let k = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
        u16::from(mul_div255_u8(k, u16::from(self.color.a)))
    }

    /// Key used by paint caches; equal tints produce equal keys.
    pub(crate) fn cache_key(self) -> [u8; 5] {
        let [r, g, b, _] = self.color.to_array();
        [r, g, b, self.weight() as u8, 1]
    }
}

/// Apply `tint` to a premultiplied image, producing a new image.
pub(crate) fn apply_tint(src: &PreparedImage, tint: Tint) -> PreparedImage {
    let k = tint.weight();
    let inv = 255 - k;
    let tint_rgb = [
        mul_div255_u8(u16::from(tint.color.r), k),
        mul_div255_u8(u16::from(tint.color.g), k),
        mul_div255_u8(u16::from(tint.color.b), k),
    ];

    let mut out = src.rgba8_premul.as_ref().clone();
    if k == 0 {
        return PreparedImage {
            width: src.width,
            height: src.height,
            rgba8_premul: std::sync::Arc::new(out),
        };
    }

    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            continue;
        }
        for c in 0..3 {
            let base = u16::from(mul_div255_u8(u16::from(px[c]), inv));
            let over = u16::from(mul_div255_u8(u16::from(tint_rgb[c]), a));
            // Premultiplied channels must not exceed alpha.
            px[c] = (base + over).min(a) as u8;
        }
    }

    PreparedImage {
        width: src.width,
        height: src.height,
        rgba8_premul: std::sync::Arc::new(out),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tint.rs"]
mod tests;

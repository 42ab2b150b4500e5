use serde::{Deserialize, Serialize};

use crate::assets::PreparedImage;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::foundation::math::normalize_degrees;

/// Smallest scale a design may be zoomed to.
pub(crate) const MIN_SCALE: f64 = 1e-4;
/// Largest scale a design may be zoomed to.
pub(crate) const MAX_SCALE: f64 = 1e4;
/// Largest distance of a placement center from the canvas origin.
pub(crate) const MAX_OFFSET: f64 = 1e6;

/// Stable identifier of an object within one scene.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ObjectId(pub u64);

/// Role of an object in the mockup stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// The garment template image; at most one per scene, always bottom-most.
    Background,
    /// A user-uploaded design.
    Design,
}

/// Where an image sits on the canvas.
///
/// The image is scaled uniformly about its center, rotated about its center, then its center is
/// placed at `center`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Canvas position of the image center.
    pub center: Point,
    /// Uniform scale factor (1.0 = natural pixel size).
    pub scale: f64,
    /// Clockwise rotation in degrees, kept in `[0, 360)`.
    pub angle_deg: f64,
}

impl Placement {
    /// Placement that scales an image of `natural_width` to `target_width` and centers it.
    pub fn fit_width(center: Point, natural_width: u32, target_width: f64) -> Self {
        let natural = f64::from(natural_width.max(1));
        Self {
            center,
            scale: target_width / natural,
            angle_deg: 0.0,
        }
    }

    /// Add `delta` degrees, wrapping into `[0, 360)`.
    pub fn rotate_by(&mut self, delta: f64) {
        self.angle_deg = normalize_degrees(self.angle_deg + delta);
    }

    /// Multiply the scale factor.
    ///
    /// Fails, leaving the placement untouched, when the result leaves
    /// `[MIN_SCALE, MAX_SCALE]`.
    pub fn scale_by(&mut self, factor: f64) -> MockwearResult<()> {
        let scale = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return Err(MockwearError::validation(format!(
                "scale {scale} is outside [{MIN_SCALE}, {MAX_SCALE}]"
            )));
        }
        self.scale = scale;
        Ok(())
    }

    /// Translate the center.
    ///
    /// Fails, leaving the placement untouched, when the center would end up more than
    /// `MAX_OFFSET` from the origin on either axis.
    pub fn move_by(&mut self, delta: Vec2) -> MockwearResult<()> {
        let center = self.center + delta;
        if !(center.x.abs() <= MAX_OFFSET && center.y.abs() <= MAX_OFFSET) {
            return Err(MockwearError::validation(format!(
                "center ({}, {}) is too far off canvas",
                center.x, center.y
            )));
        }
        self.center = center;
        Ok(())
    }

    /// Image-space to canvas-space transform for an image of `width`×`height`.
    pub fn transform(&self, width: u32, height: u32) -> Affine {
        let half = Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.angle_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-half)
    }
}

/// One drawable entry of the scene.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub(crate) id: ObjectId,
    pub(crate) kind: LayerKind,
    pub(crate) image: PreparedImage,
    pub(crate) placement: Placement,
    pub(crate) label: Option<String>,
}

impl SceneObject {
    /// Identifier.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Layer role.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Decoded pixels.
    pub fn image(&self) -> &PreparedImage {
        &self.image
    }

    /// Current placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Display label (upload file name, template key).
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Image-space to canvas-space transform.
    pub fn transform(&self) -> Affine {
        self.placement.transform(self.image.width, self.image.height)
    }

    /// Axis-aligned canvas bounds of the transformed image.
    pub fn bounds(&self) -> Rect {
        let local = Rect::new(
            0.0,
            0.0,
            f64::from(self.image.width),
            f64::from(self.image.height),
        );
        self.transform().transform_rect_bbox(local)
    }

    /// Return `true` when `p` (canvas space) lies on the transformed image rectangle.
    pub fn contains(&self, p: Point) -> bool {
        let tr = self.transform();
        if tr.determinant().abs() < 1e-12 {
            return false;
        }
        let local = tr.inverse() * p;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x <= f64::from(self.image.width)
            && local.y <= f64::from(self.image.height)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::PreparedImage;
use crate::catalog::HexColor;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::render::backend::FrameRGBA;
use crate::render::tint::{Tint, apply_tint};
use crate::scene::{LayerKind, ObjectId, Scene, SceneObject};

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PaintKey {
    object: ObjectId,
    tint: Option<[u8; 5]>,
}

/// CPU compositor powered by `vello_cpu`.
///
/// Keeps its render context and per-object image paints between frames; paints for objects that
/// left the scene are dropped on the next render.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    paint_cache: HashMap<PaintKey, ImagePaint>,
}

impl CpuRasterizer {
    /// Rasterizer with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite `scene` onto a `canvas`-sized surface cleared to `clear`.
    ///
    /// `tint` applies to the background object only.
    #[tracing::instrument(level = "debug", skip(self, scene), fields(objects = scene.len()))]
    pub fn render(
        &mut self,
        scene: &Scene,
        canvas: Canvas,
        clear: HexColor,
        tint: Option<Tint>,
    ) -> MockwearResult<FrameRGBA> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MockwearError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MockwearError::render("canvas height exceeds u16"))?;

        self.paint_cache
            .retain(|k, _| scene.get(k.object).is_some());

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |this, ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                clear.r, clear.g, clear.b, clear.a,
            ));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width),
                f64::from(canvas.height),
            ));

            for obj in scene.objects() {
                this.draw_object(obj, tint, ctx)?;
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> MockwearResult<R>,
    ) -> MockwearResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn paint_for(&mut self, obj: &SceneObject, tint: Option<Tint>) -> MockwearResult<ImagePaint> {
        let tint = match obj.kind() {
            LayerKind::Background => tint.filter(|t| t.weight() > 0),
            LayerKind::Design => None,
        };
        let key = PaintKey {
            object: obj.id(),
            tint: tint.map(Tint::cache_key),
        };
        if let Some(p) = self.paint_cache.get(&key) {
            return Ok(p.clone());
        }

        let tinted;
        let image: &PreparedImage = match tint {
            Some(t) => {
                tinted = apply_tint(obj.image(), t);
                &tinted
            }
            None => obj.image(),
        };
        let out = ImagePaint {
            paint: rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?,
            w: image.width,
            h: image.height,
        };

        // Only the latest tint per object is worth keeping.
        self.paint_cache.retain(|k, _| k.object != obj.id());
        self.paint_cache.insert(key, out.clone());
        Ok(out)
    }

    fn draw_object(
        &mut self,
        obj: &SceneObject,
        tint: Option<Tint>,
        ctx: &mut vello_cpu::RenderContext,
    ) -> MockwearResult<()> {
        let p = self.paint_for(obj, tint)?;
        let tr = obj.transform();
        if !tr.as_coeffs().iter().all(|c| c.is_finite()) || tr.determinant().abs() < 1e-12 {
            tracing::debug!(object = obj.id().0, "skipping degenerate transform");
            return Ok(());
        }

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(p.paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(p.w),
            f64::from(p.h),
        ));
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MockwearResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MockwearError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MockwearError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MockwearError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> MockwearResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

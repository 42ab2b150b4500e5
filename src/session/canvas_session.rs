use std::sync::Arc;
use std::thread::JoinHandle;

use crate::assets::decode::{MAX_IMAGE_DIM, decode_any};
use crate::assets::{BuiltinTemplateSource, PreparedImage, TemplateSource};
use crate::catalog::{Catalog, GarmentType, GarmentView, HexColor, Template};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::render::{CpuRasterizer, FrameRGBA, MockupImage, Tint, encode_png};
use crate::scene::{LayerKind, ObjectId, Placement, Scene, SceneObject};
use crate::session::config::SessionConfig;

/// Claim on a pending template load.
///
/// Only the ticket from the most recent [`CanvasSession::begin_template_load`] can be finished;
/// older ones are discarded as stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateLoadTicket {
    generation: u64,
    template: Template,
}

impl TemplateLoadTicket {
    /// Load generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Template being loaded.
    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// Result of finishing a template load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateLoadOutcome {
    /// The background was replaced by the object with this id.
    Applied(ObjectId),
    /// A newer load was started after this ticket; nothing changed.
    Stale,
}

/// Template decode running on a background thread.
#[derive(Debug)]
pub struct PendingTemplateLoad {
    ticket: TemplateLoadTicket,
    handle: JoinHandle<MockwearResult<PreparedImage>>,
}

impl PendingTemplateLoad {
    /// Ticket the decode belongs to.
    pub fn ticket(&self) -> &TemplateLoadTicket {
        &self.ticket
    }

    /// Wait for the decode and hand back the ticket with its result.
    pub fn join(self) -> (TemplateLoadTicket, MockwearResult<PreparedImage>) {
        let result = self.handle.join().unwrap_or_else(|_| {
            Err(MockwearError::template_load(format!(
                "template loader for {}/{} panicked",
                self.ticket.template.garment, self.ticket.template.view
            )))
        });
        (self.ticket, result)
    }
}

/// A single mockup canvas and its scene graph.
///
/// Owned exclusively by whoever drives it; every scene mutation redraws before returning.
pub struct CanvasSession {
    config: SessionConfig,
    catalog: Arc<Catalog>,
    source: Arc<dyn TemplateSource>,
    scene: Scene,
    template: Option<Template>,
    tint: Option<Tint>,
    load_generation: u64,
    rasterizer: CpuRasterizer,
    frame: Option<FrameRGBA>,
    pub(super) commands_applied: u64,
}

impl std::fmt::Debug for CanvasSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSession")
            .field("canvas", &self.config.canvas)
            .field("template", &self.template)
            .field("tint", &self.tint)
            .field("objects", &self.scene.len())
            .field("selection", &self.scene.selection())
            .finish_non_exhaustive()
    }
}

impl CanvasSession {
    /// Create a session and draw the empty canvas.
    pub fn new(
        config: SessionConfig,
        catalog: Arc<Catalog>,
        source: Arc<dyn TemplateSource>,
    ) -> MockwearResult<Self> {
        config.validate()?;
        let mut session = Self {
            config,
            catalog,
            source,
            scene: Scene::new(),
            template: None,
            tint: None,
            load_generation: 0,
            rasterizer: CpuRasterizer::new(),
            frame: None,
            commands_applied: 0,
        };
        session.render()?;
        tracing::debug!(
            width = session.config.canvas.width,
            height = session.config.canvas.height,
            "canvas session created"
        );
        Ok(session)
    }

    /// Session over the stock catalog and built-in garment silhouettes.
    pub fn builtin(config: SessionConfig) -> MockwearResult<Self> {
        Self::new(
            config,
            Arc::new(Catalog::builtin()),
            Arc::new(BuiltinTemplateSource),
        )
    }

    /// Active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Catalog templates are resolved against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The scene graph.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Objects bottom to top; the background, when present, is first.
    pub fn objects(&self) -> &[SceneObject] {
        self.scene.objects()
    }

    /// Currently selected design.
    pub fn selection(&self) -> Option<ObjectId> {
        self.scene.selection()
    }

    /// Template background object.
    pub fn background(&self) -> Option<&SceneObject> {
        self.scene.background()
    }

    /// Background tint.
    pub fn tint(&self) -> Option<Tint> {
        self.tint
    }

    /// Template currently shown as the background.
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Whether a template background is loaded.
    pub fn has_template(&self) -> bool {
        self.scene.background().is_some()
    }

    /// Number of [`SessionCommand`](crate::session::SessionCommand)s passed to `apply` so far,
    /// failed ones included.
    pub fn commands_applied(&self) -> u64 {
        self.commands_applied
    }

    /// Last drawn frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Load the template for `garment`/`view` synchronously and make it the background.
    ///
    /// User designs are kept. On failure the previous background stays in place.
    #[tracing::instrument(skip(self))]
    pub fn load_template(
        &mut self,
        garment: GarmentType,
        view: GarmentView,
    ) -> MockwearResult<ObjectId> {
        let ticket = self.begin_template_load(garment, view)?;
        let image = self.source.load(&ticket.template);
        match self.finish_template_load(ticket, image)? {
            TemplateLoadOutcome::Applied(id) => Ok(id),
            TemplateLoadOutcome::Stale => Err(MockwearError::session(format!(
                "template load for {garment}/{view} was superseded"
            ))),
        }
    }

    /// Start a template load. Any ticket issued earlier becomes stale.
    pub fn begin_template_load(
        &mut self,
        garment: GarmentType,
        view: GarmentView,
    ) -> MockwearResult<TemplateLoadTicket> {
        let template = self.catalog.template(garment, view)?.clone();
        self.load_generation += 1;
        Ok(TemplateLoadTicket {
            generation: self.load_generation,
            template,
        })
    }

    /// Decode the ticket's template on a background thread.
    pub fn spawn_template_load(
        &self,
        ticket: TemplateLoadTicket,
    ) -> MockwearResult<PendingTemplateLoad> {
        let source = Arc::clone(&self.source);
        let template = ticket.template.clone();
        let handle = std::thread::Builder::new()
            .name("mockwear-template-load".to_string())
            .spawn(move || source.load(&template))
            .map_err(|e| MockwearError::template_load(format!("spawn template loader: {e}")))?;
        Ok(PendingTemplateLoad { ticket, handle })
    }

    /// Apply a decoded template, unless a newer load has begun since `ticket` was issued.
    ///
    /// Stale tickets are discarded whether their decode succeeded or not.
    pub fn finish_template_load(
        &mut self,
        ticket: TemplateLoadTicket,
        image: MockwearResult<PreparedImage>,
    ) -> MockwearResult<TemplateLoadOutcome> {
        if ticket.generation != self.load_generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.load_generation,
                template = %ticket.template.image_path,
                "discarding stale template load"
            );
            return Ok(TemplateLoadOutcome::Stale);
        }

        let image = image?;
        let placement = Placement::fit_width(
            self.config.canvas.center(),
            image.width,
            self.config.template_width,
        );
        let id = self.scene.set_background(
            image,
            placement,
            Some(ticket.template.image_path.clone()),
        );
        tracing::info!(
            garment = %ticket.template.garment,
            view = %ticket.template.view,
            "template loaded"
        );
        self.template = Some(ticket.template);
        self.render()?;
        Ok(TemplateLoadOutcome::Applied(id))
    }

    /// Tint the background with `color` at the configured strength.
    #[tracing::instrument(skip(self, color), fields(color = %color))]
    pub fn set_tint_color(&mut self, color: HexColor) -> MockwearResult<()> {
        self.tint = Some(Tint::new(color, self.config.tint_alpha)?);
        self.render()?;
        Ok(())
    }

    /// Remove the background tint.
    pub fn clear_tint(&mut self) -> MockwearResult<()> {
        self.tint = None;
        self.render()?;
        Ok(())
    }

    /// Decode a design, center it at the configured width and select it.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn add_user_image(&mut self, bytes: &[u8], label: Option<&str>) -> MockwearResult<ObjectId> {
        let image = self.decode_design(bytes)?;
        let id = self.place_design(image, label);
        self.scene.select(id)?;
        self.render()?;
        Ok(id)
    }

    /// Swap the design `old` for a freshly decoded one.
    ///
    /// The payload is decoded before anything is removed, so a bad file leaves `old` in place.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn replace_user_image(
        &mut self,
        old: ObjectId,
        bytes: &[u8],
        label: Option<&str>,
    ) -> MockwearResult<ObjectId> {
        match self.scene.get(old) {
            Some(o) if o.kind() == LayerKind::Design => {}
            _ => {
                return Err(MockwearError::session(format!(
                    "object {} is not a design layer",
                    old.0
                )));
            }
        }
        let image = self.decode_design(bytes)?;
        self.scene.remove(old);
        let id = self.place_design(image, label);
        self.scene.select(id)?;
        self.render()?;
        Ok(id)
    }

    fn decode_design(&self, bytes: &[u8]) -> MockwearResult<PreparedImage> {
        let min_width = self
            .config
            .design_width
            .ceil()
            .clamp(1.0, f64::from(MAX_IMAGE_DIM)) as u32;
        decode_any(bytes, min_width).map_err(|e| MockwearError::upload(e.to_string()))
    }

    fn place_design(&mut self, image: PreparedImage, label: Option<&str>) -> ObjectId {
        let placement = Placement::fit_width(
            self.config.canvas.center(),
            image.width,
            self.config.design_width,
        );
        self.scene
            .add_design(image, placement, label.map(str::to_string))
    }

    /// Remove the selected design. Returns the removed id, `None` without a selection.
    pub fn delete_selection(&mut self) -> MockwearResult<Option<ObjectId>> {
        let Some(id) = self.scene.selection() else {
            return Ok(None);
        };
        self.scene.remove(id);
        self.render()?;
        Ok(Some(id))
    }

    /// Rotate the selected design around its center. Returns `false` without a selection.
    pub fn rotate_selection(&mut self, delta_degrees: f64) -> MockwearResult<bool> {
        if !delta_degrees.is_finite() {
            return Err(MockwearError::validation(format!(
                "rotation must be finite, got {delta_degrees}"
            )));
        }
        self.update_selection(|p| {
            p.rotate_by(delta_degrees);
            Ok(())
        })
    }

    /// Multiply the selected design's scale. Returns `false` without a selection.
    pub fn scale_selection(&mut self, factor: f64) -> MockwearResult<bool> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MockwearError::validation(format!(
                "scale factor must be finite and > 0, got {factor}"
            )));
        }
        self.update_selection(|p| p.scale_by(factor))
    }

    /// Scale the selection by the configured zoom-in factor.
    pub fn zoom_in(&mut self) -> MockwearResult<bool> {
        self.scale_selection(self.config.zoom_in_factor)
    }

    /// Scale the selection by the configured zoom-out factor.
    pub fn zoom_out(&mut self) -> MockwearResult<bool> {
        self.scale_selection(self.config.zoom_out_factor)
    }

    /// Rotate the selection by the configured step.
    pub fn rotate_step(&mut self) -> MockwearResult<bool> {
        self.rotate_selection(self.config.rotate_step_deg)
    }

    /// Translate the selected design. Returns `false` without a selection.
    pub fn move_selection(&mut self, dx: f64, dy: f64) -> MockwearResult<bool> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(MockwearError::validation(format!(
                "move offset must be finite, got ({dx}, {dy})"
            )));
        }
        self.update_selection(|p| p.move_by(Vec2::new(dx, dy)))
    }

    fn update_selection(
        &mut self,
        f: impl FnOnce(&mut Placement) -> MockwearResult<()>,
    ) -> MockwearResult<bool> {
        let Some(obj) = self
            .scene
            .selection()
            .and_then(|id| self.scene.get_mut(id))
        else {
            return Ok(false);
        };
        f(&mut obj.placement)?;
        self.render()?;
        Ok(true)
    }

    /// Select a design by id.
    pub fn select(&mut self, id: ObjectId) -> MockwearResult<()> {
        self.scene.select(id)
    }

    /// Select the topmost design under `point`, clearing the selection on a miss.
    pub fn select_at(&mut self, point: Point) -> Option<ObjectId> {
        match self.scene.hit_test(point) {
            Some(id) => {
                // Hit-tested ids are always designs.
                let _ = self.scene.select(id);
                Some(id)
            }
            None => {
                self.scene.clear_selection();
                None
            }
        }
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    /// Redraw the canvas.
    pub fn render(&mut self) -> MockwearResult<&FrameRGBA> {
        let frame = self.rasterizer.render(
            &self.scene,
            self.config.canvas,
            self.config.background,
            self.tint,
        )?;
        Ok(self.frame.insert(frame))
    }

    /// Rasterize and encode the mockup. `None` when no template is loaded.
    #[tracing::instrument(skip(self))]
    pub fn export_png(&mut self) -> MockwearResult<Option<MockupImage>> {
        if !self.has_template() {
            tracing::debug!("export skipped: no template loaded");
            return Ok(None);
        }
        let mockup = encode_png(self.render()?)?;
        tracing::info!(
            width = mockup.width,
            height = mockup.height,
            bytes = mockup.png.len(),
            "mockup exported"
        );
        Ok(Some(mockup))
    }

    /// Tear the session down.
    pub fn dispose(mut self) {
        self.scene.clear();
        tracing::debug!("canvas session disposed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/canvas_session.rs"]
mod tests;

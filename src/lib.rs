//! Mockwear is a clothing mockup designer.
//!
//! Garment templates (t-shirt, hoodie, polo; front, back and side views) are composited with a
//! color tint and user-supplied artwork on a CPU canvas, then exported as PNG. The API is
//! layered:
//!
//! - A [`Catalog`] of templates, palettes and gallery listings
//! - A [`CanvasSession`] owning one scene graph, driven directly or through [`SessionCommand`]s
//! - A [`Designer`] controller that turns user actions into session calls, toasts and dialogs
//! - [`pages`] rendering text views, guarded by an [`ErrorBoundary`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod catalog;
pub mod designer;
pub mod pages;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{MockwearError, MockwearResult};

pub use crate::assets::{
    BuiltinTemplateSource, FallbackTemplateSource, FsTemplateSource, MemoryTemplateSource,
    PreparedImage, TemplateSource,
};
pub use crate::catalog::{
    Catalog, CatalogDef, Category, ColorOption, GarmentType, GarmentView, HexColor, Template,
    TemplateListing,
};
pub use crate::designer::{
    ConfirmationDialog, Confirmed, Designer, ErrorBoundary, FallbackView, Render, Rendered,
    Toast, ToastKind,
};
pub use crate::pages::{DesignerPage, DesignerQuery, HomePage, Route, TemplatesPage};
pub use crate::render::{FrameRGBA, MOCKUP_FILE_NAME, MockupImage, Tint};
pub use crate::scene::{ObjectId, Placement, Scene};
pub use crate::session::{
    CanvasPreset, CanvasSession, CommandOutcome, DesignUpload, Script, ScriptStep,
    SessionCommand, SessionConfig, run_script,
};

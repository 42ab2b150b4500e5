//! Retained scene graph for one canvas session.

pub(crate) mod graph;
pub(crate) mod object;

pub use graph::Scene;
pub use object::{LayerKind, ObjectId, Placement, SceneObject};

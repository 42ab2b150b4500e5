use crate::assets::PreparedImage;
use crate::foundation::core::Point;
use crate::foundation::error::{MockwearError, MockwearResult};
use crate::scene::object::{LayerKind, ObjectId, Placement, SceneObject};

/// Ordered stack of objects, bottom-most first, plus the current selection.
///
/// Invariants:
/// - at most one [`LayerKind::Background`] object, and when present it is at index 0;
/// - the selection, when set, names a live [`LayerKind::Design`] object.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u64,
    selection: Option<ObjectId>,
}

impl Scene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects bottom-most first.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Return `true` when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The template background, if loaded.
    pub fn background(&self) -> Option<&SceneObject> {
        self.objects
            .first()
            .filter(|o| o.kind == LayerKind::Background)
    }

    /// User designs, bottom-most first.
    pub fn designs(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.kind == LayerKind::Design)
    }

    /// Object by id.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Currently selected design.
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    fn alloc_id(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }

    /// Install `image` as the background, replacing any existing one.
    pub(crate) fn set_background(
        &mut self,
        image: PreparedImage,
        placement: Placement,
        label: Option<String>,
    ) -> ObjectId {
        let id = self.alloc_id();
        let obj = SceneObject {
            id,
            kind: LayerKind::Background,
            image,
            placement,
            label,
        };
        if self.background().is_some() {
            self.objects[0] = obj;
        } else {
            self.objects.insert(0, obj);
        }
        id
    }

    /// Push a design on top of the stack.
    pub(crate) fn add_design(
        &mut self,
        image: PreparedImage,
        placement: Placement,
        label: Option<String>,
    ) -> ObjectId {
        let id = self.alloc_id();
        self.objects.push(SceneObject {
            id,
            kind: LayerKind::Design,
            image,
            placement,
            label,
        });
        id
    }

    /// Remove an object; clears the selection when it pointed at it.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        Some(self.objects.remove(pos))
    }

    /// Select a design. Backgrounds are locked and cannot be selected.
    pub(crate) fn select(&mut self, id: ObjectId) -> MockwearResult<()> {
        match self.get(id) {
            Some(o) if o.kind == LayerKind::Design => {
                self.selection = Some(id);
                Ok(())
            }
            Some(_) => Err(MockwearError::validation(format!(
                "object {} is the locked template background",
                id.0
            ))),
            None => Err(MockwearError::validation(format!(
                "object {} is not in the scene",
                id.0
            ))),
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Topmost design under `p`.
    pub fn hit_test(&self, p: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.kind == LayerKind::Design && o.contains(p))
            .map(|o| o.id)
    }

    pub(crate) fn clear(&mut self) {
        self.objects.clear();
        self.selection = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;

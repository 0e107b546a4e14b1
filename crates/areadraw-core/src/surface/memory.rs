//! In-memory surface implementation.

use super::{ListenerHandle, Scene, Surface, SurfaceId};
use crate::input::EventKind;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct SurfaceRecord {
    attached: bool,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    scene: Option<Scene>,
    paint_count: usize,
}

#[derive(Debug, Default)]
struct State {
    next_surface: u64,
    next_listener: u64,
    container_styles: HashMap<String, String>,
    surfaces: BTreeMap<SurfaceId, SurfaceRecord>,
    listeners: BTreeMap<ListenerHandle, (SurfaceId, EventKind)>,
}

/// Surface that records every call, for testing and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: RefCell<State>,
}

impl MemorySurface {
    /// Create an empty memory surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a style property.
    pub fn style(&self, surface: SurfaceId, key: &str) -> Option<String> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.styles.get(key).cloned())
    }

    /// Current value of a container style property.
    pub fn container_style(&self, key: &str) -> Option<String> {
        self.state.borrow().container_styles.get(key).cloned()
    }

    /// Current value of an attribute.
    pub fn attribute(&self, surface: SurfaceId, key: &str) -> Option<String> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.attributes.get(key).cloned())
    }

    /// Whether `surface` is attached to the container.
    pub fn is_attached(&self, surface: SurfaceId) -> bool {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .is_some_and(|record| record.attached)
    }

    /// Attached surfaces, in creation order.
    pub fn attached_surfaces(&self) -> Vec<SurfaceId> {
        self.state
            .borrow()
            .surfaces
            .iter()
            .filter(|(_, record)| record.attached)
            .map(|(id, _)| *id)
            .collect()
    }

    /// The scene most recently painted onto `surface`.
    pub fn last_scene(&self, surface: SurfaceId) -> Option<Scene> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.scene.clone())
    }

    /// How many times `surface` has been painted.
    pub fn paint_count(&self, surface: SurfaceId) -> usize {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .map_or(0, |record| record.paint_count)
    }

    /// Number of live listeners across all surfaces.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Number of live listeners for `event` on `surface`.
    pub fn listeners_for(&self, surface: SurfaceId, event: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(id, kind)| *id == surface && *kind == event)
            .count()
    }

    /// Number of live listeners for `event` on any surface.
    pub fn listeners_of_kind(&self, event: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(_, kind)| *kind == event)
            .count()
    }
}

impl Surface for MemorySurface {
    fn create_surface(&self) -> SurfaceId {
        let mut state = self.state.borrow_mut();
        let id = SurfaceId(state.next_surface);
        state.next_surface += 1;
        state.surfaces.insert(id, SurfaceRecord::default());
        id
    }

    fn append_to_container(&self, surface: SurfaceId) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&surface) {
            record.attached = true;
        }
    }

    fn remove_from_container(&self, surface: SurfaceId) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&surface) {
            record.attached = false;
        }
    }

    fn set_container_style(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .container_styles
            .insert(key.to_string(), value.to_string());
    }

    fn set_style(&self, surface: SurfaceId, key: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let record = state.surfaces.entry(surface).or_default();
        record.styles.insert(key.to_string(), value.to_string());
    }

    fn set_attribute(&self, surface: SurfaceId, key: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let record = state.surfaces.entry(surface).or_default();
        record.attributes.insert(key.to_string(), value.to_string());
    }

    fn listen(&self, surface: SurfaceId, event: EventKind) -> ListenerHandle {
        let mut state = self.state.borrow_mut();
        let handle = ListenerHandle(state.next_listener);
        state.next_listener += 1;
        state.listeners.insert(handle, (surface, event));
        handle
    }

    fn unlisten(&self, handle: ListenerHandle) {
        self.state.borrow_mut().listeners.remove(&handle);
    }

    fn paint(&self, surface: SurfaceId, scene: &Scene) {
        let mut state = self.state.borrow_mut();
        let record = state.surfaces.entry(surface).or_default();
        record.scene = Some(scene.clone());
        record.paint_count += 1;
    }
}

//! Surface abstraction for the host rendering toolkit.
//!
//! The core never talks to a concrete toolkit. It creates layered surfaces,
//! styles them, asks for pointer listeners and hands each surface a
//! [`Scene`] to paint. A browser host maps these calls onto canvas
//! elements; [`MemorySurface`] records them for tests and headless use.

mod memory;

pub use memory::MemorySurface;

use crate::input::EventKind;
use kurbo::BezPath;
use peniko::Color;
use std::fmt;

/// Opaque identifier of a surface created by [`Surface::create_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// Handle to a live listener; pass it to [`Surface::unlisten`] to release it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

/// Capability injected by the host.
///
/// All methods take `&self`; hosts keep their own interior state. The core is
/// single-threaded and never calls into a surface re-entrantly.
pub trait Surface {
    /// Create a new, detached surface.
    fn create_surface(&self) -> SurfaceId;

    /// Attach a surface to the container element.
    fn append_to_container(&self, surface: SurfaceId);

    /// Detach a surface from the container element.
    fn remove_from_container(&self, surface: SurfaceId);

    /// Set a style property on the container element itself.
    fn set_container_style(&self, key: &str, value: &str);

    /// Set a style property (e.g. `z-index`, `cursor`).
    fn set_style(&self, surface: SurfaceId, key: &str, value: &str);

    /// Set an attribute (e.g. `width`, `src`).
    fn set_attribute(&self, surface: SurfaceId, key: &str, value: &str);

    /// Start delivering `event` from `surface` to the core.
    fn listen(&self, surface: SurfaceId, event: EventKind) -> ListenerHandle;

    /// Stop a listener started by [`Surface::listen`].
    fn unlisten(&self, handle: ListenerHandle);

    /// Replace the contents of `surface` with `scene`.
    fn paint(&self, surface: SurfaceId, scene: &Scene);
}

/// A single drawing operation in surface pixel coordinates.
#[derive(Clone)]
pub enum DrawOp {
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, color: Color, width: f64 },
}

impl fmt::Debug for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Fill { path, .. } => f
                .debug_struct("Fill")
                .field("elements", &path.elements().len())
                .finish(),
            DrawOp::Stroke { path, width, .. } => f
                .debug_struct("Stroke")
                .field("elements", &path.elements().len())
                .field("width", width)
                .finish(),
        }
    }
}

/// Ordered list of drawing operations for one surface.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    ops: Vec<DrawOp>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `path` with `color`.
    pub fn fill(&mut self, path: BezPath, color: Color) {
        self.ops.push(DrawOp::Fill { path, color });
    }

    /// Stroke `path` with `color` at `width` pixels.
    pub fn stroke(&mut self, path: BezPath, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke { path, color, width });
    }

    /// Operations in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

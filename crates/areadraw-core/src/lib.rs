//! AreaDraw Core Library
//!
//! Polygon region editing over an image: paths stored in normalized
//! coordinates, a drawing pencil, pointer routing and image extraction.
//! Rendering and input delivery go through an injected [`Surface`].

pub mod config;
pub mod export;
pub mod input;
pub mod pencil;
pub mod router;
pub mod shapes;
pub mod signal;
pub mod surface;

pub use config::{ConfigError, RouterConfig};
pub use export::{EMPTY_DATA_URI, ExportError, ExportFormat, ExportOptions, extract_path_image};
pub use input::{EventKind, MouseButton, PointerEvent};
pub use pencil::{CloseNearFirstPoint, Pencil, PencilState, PointLimit, Termination, TerminationRule};
pub use router::{InteractionRouter, Mode, RouterEvents};
pub use shapes::{
    Boundaries, ColorPatch, GenericPath, PathColors, PathData, PathGeometry, RectanglePath,
    SerializableColor, ShapeError, ShapeFactory,
};
pub use signal::{Signal, Subscription};
pub use surface::{DrawOp, ListenerHandle, MemorySurface, Scene, Surface, SurfaceId};

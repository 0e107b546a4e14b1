//! Pointer routing between the drawing pencil and the path collection.
//!
//! The router owns every path, the pencil and the layers they paint into.
//! Hosts forward pointer input through [`InteractionRouter::handle_pointer_event`];
//! the router only acts on event kinds it currently listens for, and keeps at
//! most one move listener bound at a time.

use crate::config::RouterConfig;
use crate::export::extract_path_image;
use crate::input::{EventKind, MouseButton, PointerEvent};
use crate::pencil::{CloseNearFirstPoint, Pencil, TerminationRule};
use crate::shapes::{
    ColorPatch, GenericPath, Gesture, MouseupAction, PathArgs, PathColors, PathData, PathGeometry,
    PathId, SerializableColor, ShapeError, ShapeFactory,
};
use crate::signal::{Signal, Subscription};
use crate::surface::{ListenerHandle, Surface, SurfaceId};
use image::RgbaImage;
use kurbo::{Point, Size};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// z-index of the base image layer.
const IMAGE_Z_INDEX: usize = 1;

/// Mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing,
    PointDrag,
    PathDrag,
    ResizeDrag,
}

/// Notifications for collaborators.
#[derive(Debug, Default)]
pub struct RouterEvents {
    /// The active path changed or was edited. `None` when nothing is active.
    pub active_path_changed: Signal<Option<usize>>,
    pub path_added: Signal<()>,
    /// Carries the former index of the deleted path.
    pub path_deleted: Signal<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveHandler {
    Pencil,
    Point,
    Path,
    Resize,
}

impl From<Gesture> for MoveHandler {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::MovePoint => MoveHandler::Point,
            Gesture::MovePath => MoveHandler::Path,
            Gesture::ResizePath => MoveHandler::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MoveBinding {
    handler: MoveHandler,
    listener: ListenerHandle,
}

/// Gesture-start subscriptions owned by one path.
struct PathSubscriptions {
    moving_point: Subscription<()>,
    moving_path: Subscription<()>,
    resizing_path: Subscription<()>,
}

impl PathSubscriptions {
    fn unsubscribe(self) {
        self.moving_point.unsubscribe();
        self.moving_path.unsubscribe();
        self.resizing_path.unsubscribe();
    }
}

/// Top-level controller for the region editor.
pub struct InteractionRouter {
    surface: Rc<dyn Surface>,
    config: RouterConfig,
    factory: ShapeFactory,
    events: RouterEvents,
    paths: Vec<PathGeometry>,
    subscriptions: HashMap<PathId, PathSubscriptions>,
    active_position: Option<usize>,
    pencil: Option<Pencil>,
    pencil_subscription: Option<Subscription<()>>,
    /// Set by path gesture-start signals, drained after each forwarded press.
    pending_gesture: Rc<Cell<Option<Gesture>>>,
    /// Set by the pencil's completion signal.
    drawing_completed: Rc<Cell<bool>>,
    move_binding: Option<MoveBinding>,
    pointer_listeners: Vec<(EventKind, ListenerHandle)>,
    image_listeners: Vec<ListenerHandle>,
    image_layer: SurfaceId,
    top_layer: SurfaceId,
    image_url: Option<String>,
    /// URL requested while a load was in flight.
    queued_url: Option<Option<String>>,
    image: Option<RgbaImage>,
    size: Size,
    colors: PathColors,
    rule: Rc<dyn TerminationRule>,
    is_loading: bool,
    is_drawing: bool,
    destroyed: bool,
}

impl InteractionRouter {
    /// Create the layer stack on `surface` and start listening for input.
    pub fn new(surface: Rc<dyn Surface>, config: RouterConfig) -> Self {
        surface.set_container_style("position", "relative");

        let image_layer = surface.create_surface();
        surface.append_to_container(image_layer);
        let top_layer = surface.create_surface();
        surface.append_to_container(top_layer);

        let image_listeners = vec![
            surface.listen(image_layer, EventKind::Load),
            surface.listen(image_layer, EventKind::Error),
        ];

        let rule: Rc<dyn TerminationRule> = Rc::new(CloseNearFirstPoint {
            radius: config.close_radius,
        });
        let colors = config.colors;

        let mut router = Self {
            surface,
            config,
            factory: ShapeFactory::new(),
            events: RouterEvents::default(),
            paths: Vec::new(),
            subscriptions: HashMap::new(),
            active_position: None,
            pencil: None,
            pencil_subscription: None,
            pending_gesture: Rc::new(Cell::new(None)),
            drawing_completed: Rc::new(Cell::new(false)),
            move_binding: None,
            pointer_listeners: Vec::new(),
            image_listeners,
            image_layer,
            top_layer,
            image_url: None,
            queued_url: None,
            image: None,
            size: Size::ZERO,
            colors,
            rule,
            is_loading: false,
            is_drawing: false,
            destroyed: false,
        };
        router.style_layer(image_layer, IMAGE_Z_INDEX);
        router.restack();
        router.set_cursor("default");
        router.bind_pointer_listeners();
        router
    }

    // --- Accessors ---

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn events(&self) -> &RouterEvents {
        &self.events
    }

    /// Registry used by [`Self::add_path`]; register custom variants here.
    pub fn factory_mut(&mut self) -> &mut ShapeFactory {
        &mut self.factory
    }

    pub fn paths(&self) -> &[PathGeometry] {
        &self.paths
    }

    pub fn path(&self, position: usize) -> Option<&PathGeometry> {
        self.paths.get(position)
    }

    pub fn active_position(&self) -> Option<usize> {
        self.active_position
    }

    pub fn active_path(&self) -> Option<&PathGeometry> {
        self.active_position.and_then(|p| self.paths.get(p))
    }

    pub fn pencil(&self) -> Option<&Pencil> {
        self.pencil.as_ref()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn image_layer(&self) -> SurfaceId {
        self.image_layer
    }

    /// The layer receiving pointer input.
    pub fn top_layer(&self) -> SurfaceId {
        self.top_layer
    }

    /// Number of paths with live gesture subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// 0 or 1.
    pub fn move_listener_count(&self) -> usize {
        usize::from(self.move_binding.is_some())
    }

    pub fn mode(&self) -> Mode {
        if self.is_drawing {
            return Mode::Drawing;
        }
        match self.move_binding.map(|binding| binding.handler) {
            Some(MoveHandler::Point) => Mode::PointDrag,
            Some(MoveHandler::Path) => Mode::PathDrag,
            Some(MoveHandler::Resize) => Mode::ResizeDrag,
            Some(MoveHandler::Pencil) | None => Mode::Idle,
        }
    }

    /// Replace the rule deciding when a drawn path is complete.
    pub fn set_termination_rule(&mut self, rule: Rc<dyn TerminationRule>) {
        if let Some(pencil) = self.pencil.as_mut() {
            pencil.set_rule(rule.clone());
        }
        self.rule = rule;
    }

    // --- Layers ---

    fn style_layer(&self, layer: SurfaceId, z_index: usize) {
        self.surface.set_style(layer, "position", "absolute");
        self.surface.set_style(layer, "top", "0");
        self.surface.set_style(layer, "left", "0");
        self.surface.set_style(layer, "z-index", &z_index.to_string());
        self.size_layer(layer);
    }

    fn size_layer(&self, layer: SurfaceId) {
        self.surface
            .set_attribute(layer, "width", &self.size.width.to_string());
        self.surface
            .set_attribute(layer, "height", &self.size.height.to_string());
    }

    /// Path layers at `2 + position`, then the pencil, then the input layer.
    fn restack(&self) {
        for (position, path) in self.paths.iter().enumerate() {
            self.surface
                .set_style(path.layer(), "z-index", &(2 + position).to_string());
        }
        if let Some(pencil) = &self.pencil {
            self.style_layer(pencil.layer(), self.paths.len() + 2);
        }
        self.style_layer(self.top_layer, self.paths.len() + 3);
    }

    fn set_cursor(&self, cursor: &str) {
        self.surface.set_style(self.top_layer, "cursor", cursor);
    }

    // --- Listeners ---

    fn bind_pointer_listeners(&mut self) {
        self.unbind_pointer_listeners();
        for kind in [
            EventKind::MouseDown,
            EventKind::MouseUp,
            EventKind::MouseLeave,
            EventKind::ContextMenu,
        ] {
            let handle = self.surface.listen(self.top_layer, kind);
            self.pointer_listeners.push((kind, handle));
        }
    }

    fn unbind_pointer_listeners(&mut self) {
        for (_, handle) in self.pointer_listeners.drain(..) {
            self.surface.unlisten(handle);
        }
    }

    fn is_listening(&self, kind: EventKind) -> bool {
        self.pointer_listeners.iter().any(|(k, _)| *k == kind)
    }

    /// Bind the move listener to `handler`, replacing any previous binding.
    fn bind_move(&mut self, handler: MoveHandler) {
        self.unbind_move();
        let listener = self.surface.listen(self.top_layer, EventKind::MouseMove);
        log::debug!("Move listener bound to {:?}", handler);
        self.move_binding = Some(MoveBinding { handler, listener });
    }

    fn unbind_move(&mut self) {
        if let Some(binding) = self.move_binding.take() {
            log::debug!("Move listener unbound from {:?}", binding.handler);
            self.surface.unlisten(binding.listener);
        }
    }

    /// Drop a path gesture binding. The pencil keeps its listener.
    fn unbind_path_move(&mut self) {
        if self
            .move_binding
            .is_some_and(|binding| binding.handler != MoveHandler::Pencil)
        {
            self.unbind_move();
        }
    }

    // --- Image lifecycle ---

    /// Point the base image at `url`, discarding every path.
    ///
    /// While a load is in flight the request is queued until it settles.
    pub fn set_image_url(&mut self, url: Option<String>) {
        if self.is_loading {
            self.queued_url = Some(url);
            return;
        }

        self.cancel_drawing();
        self.unbind_move();
        self.unbind_pointer_listeners();
        self.reset_paths();
        self.image = None;

        match url {
            Some(url) => {
                log::info!("Loading image {}", url);
                self.surface.set_attribute(self.image_layer, "src", &url);
                self.image_url = Some(url);
                self.is_loading = true;
            }
            None => {
                self.surface.set_attribute(self.image_layer, "src", "");
                self.image_url = None;
                self.is_loading = false;
                self.bind_pointer_listeners();
            }
        }
    }

    /// The base image finished loading.
    ///
    /// `pixels` is the full-resolution image; `display_size` the size it is
    /// shown at, which becomes the container size.
    pub fn on_image_loaded(&mut self, pixels: RgbaImage, display_size: Size) {
        if self.apply_queued_url() {
            return;
        }
        self.cancel_drawing();
        log::info!(
            "Image loaded: {}x{} shown at {}x{}",
            pixels.width(),
            pixels.height(),
            display_size.width,
            display_size.height
        );
        self.image = Some(pixels);
        self.resize(display_size);
        self.replace_pencil();
        self.bind_pointer_listeners();

        for data in std::mem::take(&mut self.config.default_paths) {
            if let Err(err) = self.add_path(data, false) {
                log::warn!("Skipping default path: {}", err);
            }
        }
        if let Some(position) = self.config.default_active_path_index.take() {
            self.set_active_position(Some(position));
        }
        self.is_loading = false;
    }

    /// The base image failed to load. Not fatal: only the loading flag clears.
    pub fn on_image_error(&mut self) {
        if self.apply_queued_url() {
            return;
        }
        log::warn!("Failed to load image {:?}", self.image_url);
        self.is_loading = false;
        self.bind_pointer_listeners();
    }

    fn apply_queued_url(&mut self) -> bool {
        match self.queued_url.take() {
            Some(url) => {
                self.is_loading = false;
                self.set_image_url(url);
                true
            }
            None => false,
        }
    }

    fn replace_pencil(&mut self) {
        if let Some(subscription) = self.pencil_subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(old) = self.pencil.take() {
            old.detach();
        }

        // The pencil has no fill.
        let colors = PathColors {
            fill_color: PathColors::default_fill(),
            ..self.colors
        };
        let pencil = Pencil::new(self.surface.clone(), self.size, self.rule.clone())
            .with_colors(colors)
            .with_metrics(self.config.handle_metrics());
        let completed = self.drawing_completed.clone();
        self.pencil_subscription = Some(pencil.completed().subscribe(move |_| completed.set(true)));
        self.pencil = Some(pencil);
        self.restack();
    }

    /// Update the container size. Normalized points are untouched.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.size_layer(self.image_layer);
        self.size_layer(self.top_layer);
        if let Some(pencil) = self.pencil.as_mut() {
            pencil.set_size(size);
        }
        for path in &mut self.paths {
            path.set_size(size);
        }
        let layers = self
            .paths
            .iter()
            .map(PathGeometry::layer)
            .chain(self.pencil.as_ref().map(Pencil::layer));
        for layer in layers {
            self.size_layer(layer);
        }
    }

    // --- Drawing ---

    /// Start a drawing session. Refused while loading or already drawing.
    pub fn start_drawing(&mut self) -> bool {
        if self.is_loading || self.is_drawing {
            return false;
        }
        if self.pencil.is_none() {
            self.replace_pencil();
        }
        self.set_active_position(None);
        if let Some(pencil) = self.pencil.as_mut() {
            pencil.start();
        }
        self.drawing_completed.set(false);
        self.is_drawing = true;
        self.bind_move(MoveHandler::Pencil);
        self.set_cursor("copy");
        log::debug!("Drawing started");
        true
    }

    /// Turn the completed pencil session into an active generic path.
    fn finish_drawing(&mut self) {
        self.unbind_move();
        self.is_drawing = false;
        self.set_cursor("default");

        let points = match self.pencil.as_mut() {
            Some(pencil) => {
                let points = pencil.committed_points();
                pencil.reset();
                points
            }
            None => Vec::new(),
        };
        if points.is_empty() {
            return;
        }
        if let Err(err) = self.add_path(PathData::new(GenericPath::NAME, &points), true) {
            log::warn!("Failed to add drawn path: {}", err);
        }
    }

    fn cancel_drawing(&mut self) {
        if !self.is_drawing {
            return;
        }
        self.unbind_move();
        self.is_drawing = false;
        self.drawing_completed.set(false);
        if let Some(pencil) = self.pencil.as_mut() {
            pencil.reset();
        }
        self.set_cursor("default");
    }

    // --- Collection ---

    /// Construct a path from `data` and put it on top of the stack.
    ///
    /// With `notify` the new path becomes active and `path_added` fires. An
    /// unknown shape name leaves the collection untouched.
    pub fn add_path(&mut self, data: PathData, notify: bool) -> Result<usize, ShapeError> {
        let args = PathArgs::new(self.surface.clone(), self.size)
            .with_points(data.kurbo_points())
            .with_colors(self.colors)
            .with_aspect_ratio(data.forced_aspect_ratio)
            .keep_inside(data.keep_inside_container.unwrap_or(false))
            .with_metrics(self.config.handle_metrics());
        let path = self.factory.get_shape(&data.name, args)?;

        let position = self.paths.len();
        self.style_layer(path.layer(), 2 + position);
        let subscriptions = self.subscribe_path(&path);
        self.subscriptions.insert(path.id(), subscriptions);
        log::info!("Added {} path {} at {}", path.name(), path.id(), position);
        self.paths.push(path);
        self.restack();
        debug_assert_eq!(self.subscriptions.len(), self.paths.len());

        if notify {
            self.set_active_position(Some(position));
            self.events.path_added.emit(&());
        }
        Ok(position)
    }

    fn subscribe_path(&self, path: &PathGeometry) -> PathSubscriptions {
        let mailbox = &self.pending_gesture;
        PathSubscriptions {
            moving_point: path
                .moving_point()
                .subscribe(post_gesture(mailbox.clone(), Gesture::MovePoint)),
            moving_path: path
                .moving_path()
                .subscribe(post_gesture(mailbox.clone(), Gesture::MovePath)),
            resizing_path: path
                .resizing_path()
                .subscribe(post_gesture(mailbox.clone(), Gesture::ResizePath)),
        }
    }

    fn remove_path_at(&mut self, position: usize) -> PathGeometry {
        let path = self.paths.remove(position);
        path.detach();
        if let Some(subscriptions) = self.subscriptions.remove(&path.id()) {
            subscriptions.unsubscribe();
        }
        path
    }

    /// Delete the active path. Returns its former index.
    ///
    /// Afterwards the new last path is active, or nothing when none remain.
    pub fn delete_path(&mut self) -> Option<usize> {
        let position = self.active_position?;
        self.unbind_path_move();
        self.active_position = None;

        let path = self.remove_path_at(position);
        log::info!("Deleted path {} at {}", path.id(), position);
        debug_assert_eq!(self.subscriptions.len(), self.paths.len());
        self.events.path_deleted.emit(&position);
        self.restack();

        match self.paths.len().checked_sub(1) {
            Some(last) => self.set_active_position(Some(last)),
            None => {
                self.events.active_path_changed.emit(&None);
            }
        }
        Some(position)
    }

    /// Remove every path along with its subscriptions.
    pub fn reset_paths(&mut self) {
        self.unbind_path_move();
        while !self.paths.is_empty() {
            self.remove_path_at(self.paths.len() - 1);
        }
        debug_assert!(self.subscriptions.is_empty());
        self.restack();
        if self.active_position.take().is_some() {
            self.events.active_path_changed.emit(&None);
        }
    }

    /// Make `position` the only active path. Out-of-range positions count as none.
    pub fn activate(&mut self, position: Option<usize>) {
        self.set_active_position(position);
    }

    fn set_active_position(&mut self, position: Option<usize>) {
        let position = position.filter(|p| *p < self.paths.len());
        if position == self.active_position {
            return;
        }
        for (index, path) in self.paths.iter_mut().enumerate() {
            path.set_active(Some(index) == position);
        }
        self.active_position = position;
        debug_assert!(self.paths.iter().filter(|p| p.is_active()).count() <= 1);
        log::debug!("Active path: {:?}", position);
        self.events.active_path_changed.emit(&position);
    }

    /// Snapshot of every path in persisted form.
    pub fn path_data(&self) -> Vec<PathData> {
        self.paths.iter().map(PathGeometry::to_path_data).collect()
    }

    // --- Colors ---

    /// `None` restores the default.
    pub fn set_stroke_color(&mut self, color: Option<SerializableColor>) {
        let color = color.unwrap_or_else(PathColors::default_stroke);
        self.colors.stroke_color = color;
        self.apply_colors(ColorPatch::stroke(color), true);
    }

    /// `None` restores the default. The pencil has no fill.
    pub fn set_fill_color(&mut self, color: Option<SerializableColor>) {
        let color = color.unwrap_or_else(PathColors::default_fill);
        self.colors.fill_color = color;
        self.apply_colors(ColorPatch::fill(color), false);
    }

    pub fn set_handler_stroke_color(&mut self, color: Option<SerializableColor>) {
        let color = color.unwrap_or_else(PathColors::default_handler_stroke);
        self.colors.handler_stroke_color = color;
        self.apply_colors(ColorPatch::handler_stroke(color), true);
    }

    pub fn set_handler_fill_color(&mut self, color: Option<SerializableColor>) {
        let color = color.unwrap_or_else(PathColors::default_handler_fill);
        self.colors.handler_fill_color = color;
        self.apply_colors(ColorPatch::handler_fill(color), true);
    }

    fn apply_colors(&mut self, patch: ColorPatch, include_pencil: bool) {
        for path in &mut self.paths {
            path.set_colors(patch);
        }
        if include_pencil {
            if let Some(pencil) = self.pencil.as_mut() {
                pencil.set_colors(patch);
            }
        }
    }

    // --- Images ---

    /// Image data URI for the path at `position`.
    ///
    /// `None` for an out-of-range position, before an image has loaded, or
    /// when encoding fails.
    pub fn get_path_image(&self, position: usize) -> Option<String> {
        let path = self.paths.get(position)?;
        let image = self.image.as_ref()?;
        match extract_path_image(path, image, &self.config.export) {
            Ok(uri) => Some(uri),
            Err(err) => {
                log::warn!("Failed to extract image for path {}: {}", position, err);
                None
            }
        }
    }

    /// Like [`Self::get_path_image`], defaulting to the active path.
    pub fn get_image_in_position(&self, position: Option<usize>) -> Option<String> {
        self.get_path_image(position.or(self.active_position)?)
    }

    // --- Pointer input ---

    /// Deliver a pointer event from the host.
    ///
    /// Returns true when the host should suppress the event's default action.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => {
                if !self.is_listening(EventKind::MouseDown) || button != MouseButton::Left {
                    return false;
                }
                self.on_mousedown(position);
                true
            }
            PointerEvent::Up { position, button } => {
                if !self.is_listening(EventKind::MouseUp) || button == MouseButton::Right {
                    return false;
                }
                self.on_mouseup(position);
                true
            }
            PointerEvent::Move { position } => match self.move_binding {
                Some(binding) => {
                    self.on_move(binding.handler, position);
                    true
                }
                None => false,
            },
            PointerEvent::Leave => {
                if !self.is_listening(EventKind::MouseLeave) {
                    return false;
                }
                self.on_leave();
                true
            }
            PointerEvent::ContextMenu => self.is_listening(EventKind::ContextMenu),
        }
    }

    fn on_mousedown(&mut self, pos: Point) {
        if self.is_drawing {
            self.set_cursor("move");
            return;
        }

        self.unbind_move();
        // Topmost hit wins.
        let hit = self.paths.iter().rposition(|p| p.is_point_in_path(pos.x, pos.y));
        self.set_active_position(hit);

        let Some(active) = self.active_position else {
            return;
        };
        self.pending_gesture.set(None);
        self.paths[active].on_mousedown(pos);
        if let Some(gesture) = self.pending_gesture.take() {
            self.bind_move(gesture.into());
            let cursor = match gesture {
                Gesture::ResizePath => "ne-resize",
                Gesture::MovePoint | Gesture::MovePath => "move",
            };
            self.set_cursor(cursor);
        }
    }

    fn on_mouseup(&mut self, pos: Point) {
        if self.is_drawing {
            if let Some(pencil) = self.pencil.as_mut() {
                pencil.on_mouseup(pos);
            }
            if self.drawing_completed.replace(false) {
                self.finish_drawing();
            } else {
                self.set_cursor("copy");
            }
            return;
        }

        self.unbind_move();
        self.set_cursor("default");
        let Some(active) = self.active_position else {
            return;
        };
        match self.paths[active].on_mouseup(pos, self.config.allow_delete) {
            MouseupAction::DeletePath => {
                self.delete_path();
            }
            MouseupAction::Changed => {
                self.events.active_path_changed.emit(&Some(active));
            }
            MouseupAction::Unchanged => {}
        }
    }

    fn on_move(&mut self, handler: MoveHandler, pos: Point) {
        if handler == MoveHandler::Pencil {
            if let Some(pencil) = self.pencil.as_mut() {
                pencil.on_move_point(pos);
            }
            return;
        }

        let Some(active) = self.active_position else {
            return;
        };
        let path = &mut self.paths[active];
        match handler {
            MoveHandler::Point => path.on_move_point(pos),
            MoveHandler::Path => path.on_move_path(pos),
            MoveHandler::Resize => path.on_resize_path(pos),
            MoveHandler::Pencil => {}
        }
        if self.config.notify_while_moving {
            self.events.active_path_changed.emit(&Some(active));
        }
    }

    fn on_leave(&mut self) {
        if self.is_drawing {
            return;
        }
        self.unbind_move();
        self.set_active_position(None);
        self.set_cursor("default");
    }

    // --- Teardown ---

    /// Release every listener, subscription and layer. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.cancel_drawing();
        self.unbind_move();
        self.unbind_pointer_listeners();
        for handle in self.image_listeners.drain(..) {
            self.surface.unlisten(handle);
        }
        self.reset_paths();
        if let Some(subscription) = self.pencil_subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(pencil) = self.pencil.take() {
            pencil.detach();
        }
        self.surface.remove_from_container(self.top_layer);
        self.surface.remove_from_container(self.image_layer);
        log::debug!("Router destroyed");
    }
}

impl Drop for InteractionRouter {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for InteractionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionRouter")
            .field("mode", &self.mode())
            .field("paths", &self.paths.len())
            .field("active_position", &self.active_position)
            .field("size", &self.size)
            .field("is_loading", &self.is_loading)
            .field("image_url", &self.image_url)
            .finish_non_exhaustive()
    }
}

fn post_gesture(mailbox: Rc<Cell<Option<Gesture>>>, gesture: Gesture) -> impl FnMut(&()) + 'static {
    move |_| mailbox.set(Some(gesture))
}

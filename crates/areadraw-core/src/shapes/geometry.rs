//! Editable path geometry and its gesture handlers.
//!
//! Points are stored normalized to the container size, so a container resize
//! only changes the pixel values derived from them. Every gesture runs in
//! pixel space and converts back when writing points.

use super::factory::PathArgs;
use super::handles::{Handle, HandleKind, HandleMetrics, hit_test_handles, paint_handle, path_handles};
use super::{Boundaries, ColorPatch, PathColors, PathData, PathId};
use crate::signal::Signal;
use crate::surface::{Scene, Surface, SurfaceId};
use kurbo::{BezPath, Point, Shape as KurboShape, Size, Vec2};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Outline stroke width in pixels.
const OUTLINE_WIDTH: f64 = 2.0;

/// Smallest extent a resize can shrink a path to, in pixels.
const MIN_RESIZE_EXTENT: f64 = 1.0;

/// Behaviour that differs between registered shape variants.
pub trait ShapeKind: fmt::Debug {
    /// Registry name, also written to [`PathData::name`].
    fn name(&self) -> &'static str;

    /// Adjust the normalized points a path is created with.
    fn prepare_points(&self, points: Vec<Point>) -> Vec<Point> {
        points
    }

    /// Move vertex `index` to `target` (both normalized).
    fn move_vertex(&self, points: &mut [Point], index: usize, target: Point) {
        if let Some(point) = points.get_mut(index) {
            *point = target;
        }
    }
}

/// Gesture started by a press on the active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    MovePoint,
    MovePath,
    ResizePath,
}

/// Outcome of [`PathGeometry::on_mouseup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseupAction {
    /// Nothing observable changed.
    Unchanged,
    /// The gesture changed the points; observers should be notified.
    Changed,
    /// The delete handle was clicked and deletion is allowed.
    DeletePath,
}

#[derive(Debug, Clone)]
enum ActiveGesture {
    MovePoint { index: usize },
    MovePath { last: Point },
    Resize { anchor: Point, origin: Boundaries },
}

impl ActiveGesture {
    fn kind(&self) -> Gesture {
        match self {
            ActiveGesture::MovePoint { .. } => Gesture::MovePoint,
            ActiveGesture::MovePath { .. } => Gesture::MovePath,
            ActiveGesture::Resize { .. } => Gesture::ResizePath,
        }
    }
}

#[derive(Debug, Clone)]
struct GestureState {
    gesture: ActiveGesture,
    /// Points when the gesture started.
    origin_points: Vec<Point>,
}

/// One editable region over the base image.
pub struct PathGeometry {
    id: PathId,
    kind: Box<dyn ShapeKind>,
    points: Vec<Point>,
    is_active: bool,
    colors: PathColors,
    forced_aspect_ratio: Option<f64>,
    keep_inside_container: bool,
    size: Size,
    metrics: HandleMetrics,
    surface: Rc<dyn Surface>,
    layer: SurfaceId,
    gesture: Option<GestureState>,
    delete_pressed: bool,
    moving_point: Signal<()>,
    moving_path: Signal<()>,
    resizing_path: Signal<()>,
}

impl PathGeometry {
    /// Create a path on a fresh layer of `args.surface` and draw it.
    pub(crate) fn new(kind: Box<dyn ShapeKind>, args: PathArgs) -> Self {
        let layer = args.surface.create_surface();
        args.surface.append_to_container(layer);

        let points = kind.prepare_points(args.points);
        let forced_aspect_ratio = args
            .forced_aspect_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0);

        let geometry = Self {
            id: Uuid::new_v4(),
            kind,
            points,
            is_active: false,
            colors: args.colors,
            forced_aspect_ratio,
            keep_inside_container: args.keep_inside_container,
            size: args.size,
            metrics: args.metrics,
            surface: args.surface,
            layer,
            gesture: None,
            delete_pressed: false,
            moving_point: Signal::new(),
            moving_path: Signal::new(),
            resizing_path: Signal::new(),
        };
        geometry.draw();
        geometry
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    /// Name of the shape variant.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Normalized points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Activate or deactivate; deactivating abandons any gesture in progress.
    pub fn set_active(&mut self, active: bool) {
        if !active {
            self.gesture = None;
            self.delete_pressed = false;
        }
        if self.is_active != active {
            self.is_active = active;
            self.draw();
        }
    }

    pub fn colors(&self) -> &PathColors {
        &self.colors
    }

    pub fn forced_aspect_ratio(&self) -> Option<f64> {
        self.forced_aspect_ratio
    }

    pub fn keep_inside_container(&self) -> bool {
        self.keep_inside_container
    }

    /// Container size the pixel geometry is derived from.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Update the container size and redraw. Normalized points are untouched.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.draw();
    }

    /// The layer this path paints into.
    pub fn layer(&self) -> SurfaceId {
        self.layer
    }

    /// Gesture in progress, if any.
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture.as_ref().map(|state| state.gesture.kind())
    }

    /// Fires when a press on a vertex handle starts a point drag.
    pub fn moving_point(&self) -> &Signal<()> {
        &self.moving_point
    }

    /// Fires when a press inside the outline starts a path drag.
    pub fn moving_path(&self) -> &Signal<()> {
        &self.moving_path
    }

    /// Fires when a press on the resize handle starts a resize drag.
    pub fn resizing_path(&self) -> &Signal<()> {
        &self.resizing_path
    }

    /// Normalized to pixel conversion, clamped to the container when
    /// `keep_inside_container` is set.
    pub fn get_point_in_px(&self, point: Point) -> Point {
        let px = Point::new(point.x * self.size.width, point.y * self.size.height);
        if self.keep_inside_container {
            self.clamp_to_container(px)
        } else {
            px
        }
    }

    /// Pixel to normalized conversion, clamped like [`Self::get_point_in_px`].
    pub fn to_normalized(&self, px: Point) -> Point {
        let px = if self.keep_inside_container {
            self.clamp_to_container(px)
        } else {
            px
        };
        normalize(px, self.size)
    }

    fn clamp_to_container(&self, px: Point) -> Point {
        Point::new(
            px.x.clamp(0.0, self.size.width.max(0.0)),
            px.y.clamp(0.0, self.size.height.max(0.0)),
        )
    }

    /// All points in pixel space.
    pub fn pixel_points(&self) -> Vec<Point> {
        self.points.iter().map(|p| self.get_point_in_px(*p)).collect()
    }

    /// Pixel-space bounding box of all points.
    pub fn get_boundaries(&self) -> Boundaries {
        Boundaries::from_points(self.pixel_points())
    }

    /// Closed pixel-space outline.
    pub fn outline(&self) -> BezPath {
        polygon(&self.pixel_points())
    }

    /// Handles of the active path; empty while inactive.
    pub fn handles(&self) -> Vec<Handle> {
        if !self.is_active {
            return Vec::new();
        }
        path_handles(&self.pixel_points(), self.metrics)
    }

    fn outline_contains(&self, point: Point) -> bool {
        self.points.len() >= 3 && self.outline().contains(point)
    }

    /// Non-zero winding containment, plus the handles of the active path.
    pub fn is_point_in_path(&self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        self.outline_contains(point)
            || hit_test_handles(&self.handles(), point, self.metrics.radius).is_some()
    }

    /// Merge the supplied colors and redraw.
    pub fn set_colors(&mut self, patch: ColorPatch) {
        self.colors.merge(patch);
        self.draw();
    }

    /// Paint the outline, and the handles when active, onto the path layer.
    pub fn draw(&self) {
        let mut scene = Scene::new();
        let pixel_points = self.pixel_points();
        if !pixel_points.is_empty() {
            let outline = polygon(&pixel_points);
            scene.fill(outline.clone(), self.colors.fill_color.into());
            scene.stroke(outline, self.colors.stroke_color.into(), OUTLINE_WIDTH);
            if self.is_active {
                for handle in path_handles(&pixel_points, self.metrics) {
                    paint_handle(&mut scene, &handle, &self.colors, self.metrics.radius);
                }
            }
        }
        self.surface.paint(self.layer, &scene);
    }

    fn begin(&mut self, gesture: ActiveGesture) {
        log::debug!("Path {} starts {:?}", self.id, gesture.kind());
        self.delete_pressed = false;
        self.gesture = Some(GestureState {
            gesture,
            origin_points: self.points.clone(),
        });
    }

    /// Start the gesture matching the hit location and emit its signal.
    pub fn on_mousedown(&mut self, pos: Point) {
        if !self.is_active {
            return;
        }
        match hit_test_handles(&self.handles(), pos, self.metrics.radius) {
            Some(HandleKind::Delete) => {
                self.gesture = None;
                self.delete_pressed = true;
            }
            Some(HandleKind::Resize) => {
                let origin = self.get_boundaries();
                let anchor = Point::new(origin.min_x, origin.max_y);
                self.begin(ActiveGesture::Resize { anchor, origin });
                self.resizing_path.emit(&());
            }
            Some(HandleKind::Vertex(index)) => {
                self.begin(ActiveGesture::MovePoint { index });
                self.moving_point.emit(&());
            }
            None if self.outline_contains(pos) => {
                self.begin(ActiveGesture::MovePath { last: pos });
                self.moving_path.emit(&());
            }
            None => {}
        }
    }

    /// Drag the vertex grabbed by the current point gesture.
    pub fn on_move_point(&mut self, pos: Point) {
        let index = match self.gesture.as_ref().map(|state| &state.gesture) {
            Some(ActiveGesture::MovePoint { index }) => *index,
            _ => return,
        };
        let target = self.to_normalized(pos);
        self.kind.move_vertex(&mut self.points, index, target);
        self.draw();
    }

    /// Translate the whole path by the pointer motion since the last event.
    pub fn on_move_path(&mut self, pos: Point) {
        let Some(GestureState {
            gesture: ActiveGesture::MovePath { last },
            ..
        }) = self.gesture.as_mut()
        else {
            return;
        };
        let previous = std::mem::replace(last, pos);
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return;
        }

        let mut delta = Vec2::new(
            (pos.x - previous.x) / self.size.width,
            (pos.y - previous.y) / self.size.height,
        );
        if self.keep_inside_container {
            let bounds = Boundaries::from_points(self.points.iter().copied());
            delta.x = delta.x.max(-bounds.min_x).min(1.0 - bounds.max_x);
            delta.y = delta.y.max(-bounds.min_y).min(1.0 - bounds.max_y);
        }
        for point in &mut self.points {
            *point += delta;
        }
        self.draw();
    }

    /// Scale the path from the corner opposite the resize handle.
    ///
    /// With a forced aspect ratio the height always follows the width.
    pub fn on_resize_path(&mut self, pos: Point) {
        let Some(state) = self.gesture.as_ref() else {
            return;
        };
        let ActiveGesture::Resize { anchor, origin } = state.gesture else {
            return;
        };

        let mut width = (pos.x - anchor.x).max(MIN_RESIZE_EXTENT);
        let mut height = (anchor.y - pos.y).max(MIN_RESIZE_EXTENT);
        if self.keep_inside_container {
            width = width.min((self.size.width - anchor.x).max(MIN_RESIZE_EXTENT));
            height = height.min(anchor.y.max(MIN_RESIZE_EXTENT));
        }
        if let Some(ratio) = self.forced_aspect_ratio {
            height = width / ratio;
            if self.keep_inside_container && height > anchor.y {
                height = anchor.y.max(MIN_RESIZE_EXTENT);
                width = height * ratio;
            }
        }

        let scale_x = if origin.width() > f64::EPSILON {
            width / origin.width()
        } else {
            1.0
        };
        let scale_y = if origin.height() > f64::EPSILON {
            height / origin.height()
        } else {
            1.0
        };

        let size = self.size;
        let points = state
            .origin_points
            .iter()
            .map(|p| {
                let px = Point::new(p.x * size.width, p.y * size.height);
                let scaled = Point::new(
                    anchor.x + (px.x - anchor.x) * scale_x,
                    anchor.y - (anchor.y - px.y) * scale_y,
                );
                normalize(scaled, size)
            })
            .collect();
        self.points = points;
        self.draw();
    }

    /// Finish the current gesture.
    ///
    /// A click that both pressed and released the delete handle yields
    /// [`MouseupAction::DeletePath`] when `allow_delete` is set.
    pub fn on_mouseup(&mut self, pos: Point, allow_delete: bool) -> MouseupAction {
        if std::mem::take(&mut self.delete_pressed) {
            let released_on_delete = hit_test_handles(&self.handles(), pos, self.metrics.radius)
                == Some(HandleKind::Delete);
            return if allow_delete && released_on_delete {
                MouseupAction::DeletePath
            } else {
                MouseupAction::Unchanged
            };
        }
        match self.gesture.take() {
            Some(state) if state.origin_points != self.points => {
                log::debug!("Path {} finished {:?}", self.id, state.gesture.kind());
                MouseupAction::Changed
            }
            _ => MouseupAction::Unchanged,
        }
    }

    /// Snapshot in persisted form.
    pub fn to_path_data(&self) -> PathData {
        let mut data = PathData::new(self.name(), &self.points);
        data.forced_aspect_ratio = self.forced_aspect_ratio;
        data.keep_inside_container = self.keep_inside_container.then_some(true);
        data
    }

    /// Remove the path layer from the container.
    pub(crate) fn detach(&self) {
        self.surface.remove_from_container(self.layer);
    }
}

impl fmt::Debug for PathGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathGeometry")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("points", &self.points)
            .field("is_active", &self.is_active)
            .field("forced_aspect_ratio", &self.forced_aspect_ratio)
            .field("keep_inside_container", &self.keep_inside_container)
            .field("size", &self.size)
            .field("layer", &self.layer)
            .finish()
    }
}

/// Pixel to normalized conversion; zero for an empty container.
pub(crate) fn normalize(px: Point, size: Size) -> Point {
    let x = if size.width > 0.0 { px.x / size.width } else { 0.0 };
    let y = if size.height > 0.0 { px.y / size.height } else { 0.0 };
    Point::new(x, y)
}

/// Closed polygon through `points`.
pub(crate) fn polygon(points: &[Point]) -> BezPath {
    let mut path = polyline(points);
    if !points.is_empty() {
        path.close_path();
    }
    path
}

/// Open polyline through `points`.
pub(crate) fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for point in iter {
            path.line_to(*point);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ColorPatch, GenericPath, SerializableColor};
    use crate::surface::MemorySurface;
    use std::cell::Cell;

    const EPS: f64 = 1e-9;

    fn geometry(surface: &Rc<MemorySurface>, points: &[(f64, f64)]) -> PathGeometry {
        let args = PathArgs::new(surface.clone(), Size::new(400.0, 300.0))
            .with_points(points.iter().map(|&(x, y)| Point::new(x, y)).collect());
        PathGeometry::new(Box::new(GenericPath), args)
    }

    fn square(surface: &Rc<MemorySurface>) -> PathGeometry {
        geometry(surface, &[(0.25, 0.25), (0.5, 0.25), (0.5, 0.5), (0.25, 0.5)])
    }

    fn counter(signal: &Signal<()>) -> Rc<Cell<usize>> {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        // Kept registered for the lifetime of the geometry.
        let _ = signal.subscribe(move |_| h.set(h.get() + 1));
        hits
    }

    #[test]
    fn test_boundaries_in_pixels() {
        let surface = Rc::new(MemorySurface::new());
        let path = geometry(&surface, &[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.5)]);
        let b = path.get_boundaries();
        assert!((b.min_x).abs() < EPS);
        assert!((b.min_y).abs() < EPS);
        assert!((b.max_x - 200.0).abs() < EPS);
        assert!((b.max_y - 150.0).abs() < EPS);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let surface = Rc::new(MemorySurface::new());
        let path = square(&surface);
        let p = Point::new(0.137, 0.861);
        let back = path.to_normalized(path.get_point_in_px(p));
        assert!((back.x - p.x).abs() < EPS);
        assert!((back.y - p.y).abs() < EPS);
    }

    #[test]
    fn test_keep_inside_clamps_pixels() {
        let surface = Rc::new(MemorySurface::new());
        let args = PathArgs::new(surface.clone(), Size::new(100.0, 100.0))
            .with_points(vec![Point::new(-0.5, 0.5), Point::new(1.5, 0.2)])
            .keep_inside(true);
        let path = PathGeometry::new(Box::new(GenericPath), args);
        assert_eq!(path.get_point_in_px(path.points()[0]), Point::new(0.0, 50.0));
        assert_eq!(path.get_point_in_px(path.points()[1]), Point::new(100.0, 20.0));
    }

    #[test]
    fn test_point_in_path() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        assert!(path.is_point_in_path(150.0, 110.0));
        assert!(!path.is_point_in_path(10.0, 10.0));

        // Delete handle sits outside the outline; only counts when active.
        assert!(!path.is_point_in_path(88.0, 63.0));
        path.set_active(true);
        assert!(path.is_point_in_path(88.0, 63.0));
    }

    #[test]
    fn test_degenerate_path_never_contains() {
        let surface = Rc::new(MemorySurface::new());
        let path = geometry(&surface, &[(0.1, 0.1), (0.9, 0.1)]);
        assert!(!path.is_point_in_path(200.0, 30.0));
        assert!(path.get_boundaries().is_zero_area());
    }

    #[test]
    fn test_set_colors_redraws() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        let before = surface.paint_count(path.layer());
        let red = SerializableColor::new(255, 0, 0, 255);
        path.set_colors(ColorPatch::stroke(red));
        assert_eq!(path.colors().stroke_color, red);
        assert_eq!(path.colors().fill_color, PathColors::default_fill());
        assert_eq!(surface.paint_count(path.layer()), before + 1);
    }

    #[test]
    fn test_mousedown_inactive_does_nothing() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        let moves = counter(path.moving_path());
        path.on_mousedown(Point::new(150.0, 110.0));
        assert_eq!(moves.get(), 0);
        assert_eq!(path.gesture(), None);
    }

    #[test]
    fn test_move_path() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);
        let moves = counter(path.moving_path());

        path.on_mousedown(Point::new(150.0, 110.0));
        assert_eq!(moves.get(), 1);
        assert_eq!(path.gesture(), Some(Gesture::MovePath));

        path.on_move_path(Point::new(190.0, 140.0));
        let b = path.get_boundaries();
        assert!((b.min_x - 140.0).abs() < EPS);
        assert!((b.min_y - 105.0).abs() < EPS);

        assert_eq!(path.on_mouseup(Point::new(190.0, 140.0), true), MouseupAction::Changed);
        assert_eq!(path.gesture(), None);
    }

    #[test]
    fn test_move_path_keeps_inside() {
        let surface = Rc::new(MemorySurface::new());
        let args = PathArgs::new(surface.clone(), Size::new(400.0, 300.0))
            .with_points(vec![
                Point::new(0.25, 0.25),
                Point::new(0.5, 0.25),
                Point::new(0.5, 0.5),
                Point::new(0.25, 0.5),
            ])
            .keep_inside(true);
        let mut path = PathGeometry::new(Box::new(GenericPath), args);
        path.set_active(true);
        path.on_mousedown(Point::new(150.0, 110.0));
        path.on_move_path(Point::new(-500.0, -500.0));
        let b = path.get_boundaries();
        assert!(b.min_x.abs() < EPS);
        assert!(b.min_y.abs() < EPS);
        assert!((b.width() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_move_point() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);
        let grabs = counter(path.moving_point());

        path.on_mousedown(Point::new(201.0, 151.0));
        assert_eq!(grabs.get(), 1);
        path.on_move_point(Point::new(300.0, 240.0));

        assert!((path.points()[2].x - 0.75).abs() < EPS);
        assert!((path.points()[2].y - 0.8).abs() < EPS);
        assert!((path.points()[1].x - 0.5).abs() < EPS);
    }

    #[test]
    fn test_move_handlers_ignore_other_gestures() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);
        let before = path.points().to_vec();
        path.on_move_point(Point::new(10.0, 10.0));
        path.on_move_path(Point::new(10.0, 10.0));
        path.on_resize_path(Point::new(10.0, 10.0));
        assert_eq!(path.points(), before.as_slice());
    }

    #[test]
    fn test_resize_anchors_bottom_left() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);
        let resizes = counter(path.resizing_path());

        // Resize handle: (200 + 12, 75 - 12)
        path.on_mousedown(Point::new(212.0, 63.0));
        assert_eq!(resizes.get(), 1);
        path.on_resize_path(Point::new(300.0, 50.0));

        let b = path.get_boundaries();
        assert!((b.min_x - 100.0).abs() < EPS);
        assert!((b.max_y - 150.0).abs() < EPS);
        assert!((b.width() - 200.0).abs() < EPS);
        assert!((b.height() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_resize_forced_aspect_ratio() {
        let surface = Rc::new(MemorySurface::new());
        let args = PathArgs::new(surface.clone(), Size::new(400.0, 300.0))
            .with_points(vec![
                Point::new(0.25, 0.25),
                Point::new(0.5, 0.25),
                Point::new(0.5, 0.5),
                Point::new(0.25, 0.5),
            ])
            .with_aspect_ratio(Some(2.0));
        let mut path = PathGeometry::new(Box::new(GenericPath), args);
        path.set_active(true);

        path.on_mousedown(Point::new(212.0, 63.0));
        for pos in [(250.0, 10.0), (180.0, 140.0), (300.0, 100.0)] {
            path.on_resize_path(Point::new(pos.0, pos.1));
            let b = path.get_boundaries();
            assert!((b.width() / b.height() - 2.0).abs() < 1e-6);
            assert!((b.max_y - 150.0).abs() < EPS);
        }
    }

    #[test]
    fn test_delete_click() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);

        path.on_mousedown(Point::new(88.0, 63.0));
        assert_eq!(path.gesture(), None);
        assert_eq!(path.on_mouseup(Point::new(88.0, 63.0), true), MouseupAction::DeletePath);

        path.on_mousedown(Point::new(88.0, 63.0));
        assert_eq!(path.on_mouseup(Point::new(88.0, 63.0), false), MouseupAction::Unchanged);

        path.on_mousedown(Point::new(88.0, 63.0));
        assert_eq!(path.on_mouseup(Point::new(150.0, 110.0), true), MouseupAction::Unchanged);
    }

    #[test]
    fn test_click_without_motion_is_unchanged() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        path.set_active(true);
        path.on_mousedown(Point::new(150.0, 110.0));
        assert_eq!(path.on_mouseup(Point::new(150.0, 110.0), true), MouseupAction::Unchanged);
    }

    #[test]
    fn test_resize_container_keeps_points() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        let before = path.points().to_vec();
        path.set_size(Size::new(800.0, 600.0));
        assert_eq!(path.points(), before.as_slice());
        let b = path.get_boundaries();
        assert!((b.min_x - 200.0).abs() < EPS);
        assert!((b.max_y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_handles_drawn_only_when_active() {
        let surface = Rc::new(MemorySurface::new());
        let mut path = square(&surface);
        let inactive = surface.last_scene(path.layer()).map(|s| s.len());
        assert_eq!(inactive, Some(2));
        path.set_active(true);
        let active = surface.last_scene(path.layer()).map(|s| s.len()).unwrap_or(0);
        assert!(active > 2);
    }

    #[test]
    fn test_path_data_snapshot() {
        let surface = Rc::new(MemorySurface::new());
        let path = square(&surface);
        let data = path.to_path_data();
        assert_eq!(data.name, "generic");
        assert_eq!(data.points[0], [0.25, 0.25]);
        assert_eq!(data.keep_inside_container, None);
    }

    #[test]
    fn test_polygon_shapes() {
        assert!(polygon(&[]).elements().is_empty());
        let path = polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(path.elements().len(), 4);
        assert_eq!(polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).elements().len(), 2);
    }
}

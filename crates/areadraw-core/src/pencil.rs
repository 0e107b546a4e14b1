//! Drawing session for a path that is not yet part of the collection.
//!
//! A session collects one point per release. The trailing slot floats with
//! the cursor until the next release commits it. After every commit a
//! [`TerminationRule`] decides whether the path is complete.

use crate::shapes::geometry::{normalize, polyline};
use crate::shapes::handles::paint_handle;
use crate::shapes::{ColorPatch, Handle, HandleKind, HandleMetrics, PathColors};
use crate::signal::Signal;
use crate::surface::{Scene, Surface, SurfaceId};
use kurbo::{Point, Size};
use std::fmt;
use std::rc::Rc;

const LINE_WIDTH: f64 = 2.0;

/// Result of evaluating a [`TerminationRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Keep drawing.
    Continue,
    /// The path is complete, including the point just committed.
    Finish,
    /// The path is complete; the point just committed only closed it.
    FinishDiscardingLast,
}

/// Decides when a drawing session ends.
///
/// `points` are the committed points in pixels, the newest last.
pub trait TerminationRule {
    fn evaluate(&self, points: &[Point], size: Size) -> Termination;
}

impl<F> TerminationRule for F
where
    F: Fn(&[Point], Size) -> Termination,
{
    fn evaluate(&self, points: &[Point], size: Size) -> Termination {
        self(points, size)
    }
}

/// Finish when a release lands within `radius` pixels of the first point.
///
/// At least three points must exist besides the closing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseNearFirstPoint {
    pub radius: f64,
}

impl Default for CloseNearFirstPoint {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

impl TerminationRule for CloseNearFirstPoint {
    fn evaluate(&self, points: &[Point], _size: Size) -> Termination {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() > 3 => {
                if first.distance(*last) <= self.radius {
                    Termination::FinishDiscardingLast
                } else {
                    Termination::Continue
                }
            }
            _ => Termination::Continue,
        }
    }
}

/// Finish once the given number of points is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLimit(pub usize);

impl TerminationRule for PointLimit {
    fn evaluate(&self, points: &[Point], _size: Size) -> Termination {
        if points.len() >= self.0 {
            Termination::Finish
        } else {
            Termination::Continue
        }
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PencilState {
    #[default]
    Idle,
    Drawing,
    Completed,
}

/// State holder for a path being drawn.
pub struct Pencil {
    surface: Rc<dyn Surface>,
    layer: SurfaceId,
    /// Normalized points; `None` marks a slot with no position yet.
    points: Vec<Option<Point>>,
    state: PencilState,
    size: Size,
    colors: PathColors,
    metrics: HandleMetrics,
    rule: Rc<dyn TerminationRule>,
    completed: Signal<()>,
}

impl Pencil {
    /// Create an idle pencil on a fresh layer of `surface`.
    pub fn new(surface: Rc<dyn Surface>, size: Size, rule: Rc<dyn TerminationRule>) -> Self {
        let layer = surface.create_surface();
        surface.append_to_container(layer);
        Self {
            surface,
            layer,
            points: Vec::new(),
            state: PencilState::Idle,
            size,
            colors: PathColors::default(),
            metrics: HandleMetrics::default(),
            rule,
            completed: Signal::new(),
        }
    }

    pub fn with_colors(mut self, colors: PathColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_metrics(mut self, metrics: HandleMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn state(&self) -> PencilState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == PencilState::Drawing
    }

    pub fn layer(&self) -> SurfaceId {
        self.layer
    }

    pub fn colors(&self) -> &PathColors {
        &self.colors
    }

    /// Fires once when a session completes.
    pub fn completed(&self) -> &Signal<()> {
        &self.completed
    }

    pub fn set_rule(&mut self, rule: Rc<dyn TerminationRule>) {
        self.rule = rule;
    }

    /// Begin a session. Only valid while idle.
    pub fn start(&mut self) {
        debug_assert_eq!(self.state, PencilState::Idle, "pencil started twice");
        self.points = vec![None];
        self.state = PencilState::Drawing;
        self.draw();
    }

    /// Track the cursor with the floating point.
    pub fn on_move_point(&mut self, pos: Point) {
        if self.state != PencilState::Drawing {
            return;
        }
        let point = normalize(pos, self.size);
        if let Some(slot) = self.points.last_mut() {
            *slot = Some(point);
        }
        self.draw();
    }

    /// Commit `pos` and evaluate the termination rule.
    ///
    /// Returns true when this release completed the session.
    pub fn on_mouseup(&mut self, pos: Point) -> bool {
        if self.state != PencilState::Drawing {
            return false;
        }
        let point = normalize(pos, self.size);
        match self.points.last_mut() {
            Some(slot) => *slot = Some(point),
            None => self.points.push(Some(point)),
        }

        let pixels: Vec<Point> = self
            .points
            .iter()
            .flatten()
            .map(|p| self.to_px(*p))
            .collect();
        match self.rule.evaluate(&pixels, self.size) {
            Termination::Continue => {
                self.points.push(None);
                self.draw();
                false
            }
            Termination::Finish => self.complete(),
            Termination::FinishDiscardingLast => {
                self.points.pop();
                self.complete()
            }
        }
    }

    fn complete(&mut self) -> bool {
        self.state = PencilState::Completed;
        log::debug!("Drawing completed with {} points", self.committed_points().len());
        self.draw();
        self.completed.emit(&());
        true
    }

    /// Committed normalized points, skipping empty slots and the floating one.
    pub fn committed_points(&self) -> Vec<Point> {
        let committed = match self.state {
            PencilState::Drawing => &self.points[..self.points.len().saturating_sub(1)],
            _ => &self.points[..],
        };
        committed.iter().flatten().copied().collect()
    }

    /// Clear the session and return to idle.
    pub fn reset(&mut self) {
        self.points.clear();
        self.state = PencilState::Idle;
        self.draw();
    }

    /// Merge the supplied colors and redraw.
    pub fn set_colors(&mut self, patch: ColorPatch) {
        self.colors.merge(patch);
        self.draw();
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.draw();
    }

    fn to_px(&self, point: Point) -> Point {
        Point::new(point.x * self.size.width, point.y * self.size.height)
    }

    /// Paint the open polyline and committed vertices.
    pub fn draw(&self) {
        let mut scene = Scene::new();
        let pixels: Vec<Point> = self
            .points
            .iter()
            .flatten()
            .map(|p| self.to_px(*p))
            .collect();
        if pixels.len() > 1 {
            scene.stroke(polyline(&pixels), self.colors.stroke_color.into(), LINE_WIDTH);
        }
        for (index, point) in self.committed_points().into_iter().enumerate() {
            let handle = Handle::new(HandleKind::Vertex(index), self.to_px(point));
            paint_handle(&mut scene, &handle, &self.colors, self.metrics.radius);
        }
        self.surface.paint(self.layer, &scene);
    }

    /// Remove the pencil layer from the container.
    pub(crate) fn detach(&self) {
        self.surface.remove_from_container(self.layer);
    }
}

impl fmt::Debug for Pencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pencil")
            .field("state", &self.state)
            .field("points", &self.points)
            .field("size", &self.size)
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

//! Handle definitions for path manipulation.

use super::{Boundaries, PathColors};
use crate::surface::Scene;
use kurbo::{Circle, Line, Point, Rect, Shape as KurboShape};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Stroke width of handle outlines.
const HANDLE_STROKE_WIDTH: f64 = 1.5;

/// Size and placement of handles, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleMetrics {
    /// Hit and draw radius of every handle.
    pub radius: f64,
    /// Distance of the delete and resize handles from the bounding box corners.
    pub offset: f64,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            radius: 5.0,
            offset: 12.0,
        }
    }
}

/// The kind of handle - determines which gesture a press starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A path vertex (index into the point list).
    Vertex(usize),
    /// Resize handle, outside the top-right corner.
    Resize,
    /// Delete handle, outside the top-left corner.
    Delete,
}

/// A manipulation handle on the active path.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub kind: HandleKind,
    /// Position in pixel coordinates.
    pub position: Point,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if a pixel position hits this handle.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= radius * radius
    }
}

/// Handles for a path with the given pixel vertices.
///
/// Ordered by hit priority: delete, resize, then vertices.
pub fn path_handles(vertices: &[Point], metrics: HandleMetrics) -> Vec<Handle> {
    if vertices.is_empty() {
        return Vec::new();
    }
    let bounds = Boundaries::from_points(vertices.iter().copied());
    let mut handles = Vec::with_capacity(vertices.len() + 2);
    handles.push(Handle::new(
        HandleKind::Delete,
        Point::new(bounds.min_x - metrics.offset, bounds.min_y - metrics.offset),
    ));
    handles.push(Handle::new(
        HandleKind::Resize,
        Point::new(bounds.max_x + metrics.offset, bounds.min_y - metrics.offset),
    ));
    handles.extend(
        vertices
            .iter()
            .enumerate()
            .map(|(i, &p)| Handle::new(HandleKind::Vertex(i), p)),
    );
    handles
}

/// Find which handle (if any) is hit at the given pixel position.
///
/// When several vertices overlap, the nearest one wins.
pub fn hit_test_handles(handles: &[Handle], point: Point, radius: f64) -> Option<HandleKind> {
    handles
        .iter()
        .filter(|h| h.hit_test(point, radius))
        .min_by(|a, b| {
            let priority = |h: &Handle| match h.kind {
                HandleKind::Delete => 0,
                HandleKind::Resize => 1,
                HandleKind::Vertex(_) => 2,
            };
            priority(a).cmp(&priority(b)).then_with(|| {
                let da = (a.position - point).hypot2();
                let db = (b.position - point).hypot2();
                da.total_cmp(&db)
            })
        })
        .map(|h| h.kind)
}

/// Paint one handle into `scene`.
///
/// Vertices are circles, the resize handle is a square and the delete handle
/// a circle with a cross through it.
pub(crate) fn paint_handle(scene: &mut Scene, handle: &Handle, colors: &PathColors, radius: f64) {
    let fill: Color = colors.handler_fill_color.into();
    let stroke: Color = colors.handler_stroke_color.into();
    let center = handle.position;
    match handle.kind {
        HandleKind::Vertex(_) => {
            let circle = Circle::new(center, radius).to_path(0.1);
            scene.fill(circle.clone(), fill);
            scene.stroke(circle, stroke, HANDLE_STROKE_WIDTH);
        }
        HandleKind::Resize => {
            let square = Rect::from_center_size(center, (radius * 2.0, radius * 2.0)).to_path(0.1);
            scene.fill(square.clone(), fill);
            scene.stroke(square, stroke, HANDLE_STROKE_WIDTH);
        }
        HandleKind::Delete => {
            let circle = Circle::new(center, radius).to_path(0.1);
            scene.stroke(circle, stroke, HANDLE_STROKE_WIDTH);
            let arm = radius * 0.6;
            let cross = [
                Line::new((center.x - arm, center.y - arm), (center.x + arm, center.y + arm)),
                Line::new((center.x - arm, center.y + arm), (center.x + arm, center.y - arm)),
            ];
            for line in cross {
                scene.stroke(line.to_path(0.1), stroke, HANDLE_STROKE_WIDTH);
            }
        }
    }
}

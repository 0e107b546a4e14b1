//! Axis-aligned rectangle.

use super::ShapeKind;
use kurbo::Point;

/// Four-corner path that stays axis-aligned while a corner is dragged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectanglePath;

impl RectanglePath {
    pub const NAME: &'static str = "rectangle";

    /// Corners of the box spanned by two points, clockwise from top-left.
    pub fn from_corners(p1: Point, p2: Point) -> Vec<Point> {
        let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
        let (min_y, max_y) = (p1.y.min(p2.y), p1.y.max(p2.y));
        vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ]
    }
}

impl ShapeKind for RectanglePath {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare_points(&self, points: Vec<Point>) -> Vec<Point> {
        match points.as_slice() {
            [p1, p2] => Self::from_corners(*p1, *p2),
            _ => points,
        }
    }

    fn move_vertex(&self, points: &mut [Point], index: usize, target: Point) {
        if points.len() != 4 || index >= 4 {
            if let Some(point) = points.get_mut(index) {
                *point = target;
            }
            return;
        }

        let old = points[index];
        let prev = (index + 3) % 4;
        let next = (index + 1) % 4;
        // One neighbour shares the corner's x, the other its y.
        let (shares_x, shares_y) =
            if (points[prev].x - old.x).abs() <= (points[next].x - old.x).abs() {
                (prev, next)
            } else {
                (next, prev)
            };
        points[shares_x].x = target.x;
        points[shares_y].y = target.y;
        points[index] = target;
    }
}

//! Editable path shapes drawn over the base image.

mod factory;
mod generic;
pub(crate) mod geometry;
pub(crate) mod handles;
mod rectangle;

pub use factory::{PathArgs, ShapeConstructor, ShapeFactory};
pub use generic::GenericPath;
pub use geometry::{Gesture, MouseupAction, PathGeometry, ShapeKind};
pub use handles::{Handle, HandleKind, HandleMetrics};
pub use rectangle::RectanglePath;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shape errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),
}

/// Unique identifier for paths.
pub type PathId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// White at the given opacity (0.0..=1.0).
    pub fn white_alpha(opacity: f64) -> Self {
        Self::new(255, 255, 255, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Colors used to draw a path and its handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathColors {
    pub stroke_color: SerializableColor,
    pub fill_color: SerializableColor,
    pub handler_stroke_color: SerializableColor,
    pub handler_fill_color: SerializableColor,
}

impl PathColors {
    /// White at 70% opacity.
    pub fn default_stroke() -> SerializableColor {
        SerializableColor::white_alpha(0.7)
    }

    /// White at 20% opacity.
    pub fn default_fill() -> SerializableColor {
        SerializableColor::white_alpha(0.2)
    }

    pub fn default_handler_stroke() -> SerializableColor {
        SerializableColor::white()
    }

    pub fn default_handler_fill() -> SerializableColor {
        SerializableColor::white()
    }

    /// Overwrite only the fields present in `patch`.
    pub fn merge(&mut self, patch: ColorPatch) {
        if let Some(color) = patch.stroke_color {
            self.stroke_color = color;
        }
        if let Some(color) = patch.fill_color {
            self.fill_color = color;
        }
        if let Some(color) = patch.handler_stroke_color {
            self.handler_stroke_color = color;
        }
        if let Some(color) = patch.handler_fill_color {
            self.handler_fill_color = color;
        }
    }
}

impl Default for PathColors {
    fn default() -> Self {
        Self {
            stroke_color: Self::default_stroke(),
            fill_color: Self::default_fill(),
            handler_stroke_color: Self::default_handler_stroke(),
            handler_fill_color: Self::default_handler_fill(),
        }
    }
}

/// Partial color update for [`PathGeometry::set_colors`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPatch {
    pub stroke_color: Option<SerializableColor>,
    pub fill_color: Option<SerializableColor>,
    pub handler_stroke_color: Option<SerializableColor>,
    pub handler_fill_color: Option<SerializableColor>,
}

impl ColorPatch {
    pub fn stroke(color: SerializableColor) -> Self {
        Self {
            stroke_color: Some(color),
            ..Self::default()
        }
    }

    pub fn fill(color: SerializableColor) -> Self {
        Self {
            fill_color: Some(color),
            ..Self::default()
        }
    }

    pub fn handler_stroke(color: SerializableColor) -> Self {
        Self {
            handler_stroke_color: Some(color),
            ..Self::default()
        }
    }

    pub fn handler_fill(color: SerializableColor) -> Self {
        Self {
            handler_fill_color: Some(color),
            ..Self::default()
        }
    }
}

/// Persisted form of a path. Points are normalized `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathData {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_inside_container: Option<bool>,
}

impl PathData {
    /// Path data for the `name` variant with plain points.
    pub fn new(name: impl Into<String>, points: &[Point]) -> Self {
        Self {
            name: name.into(),
            points: points.iter().map(|p| [p.x, p.y]).collect(),
            forced_aspect_ratio: None,
            keep_inside_container: None,
        }
    }

    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.forced_aspect_ratio = Some(ratio);
        self
    }

    pub fn keep_inside(mut self) -> Self {
        self.keep_inside_container = Some(true);
        self
    }

    /// Points as kurbo points.
    pub fn kurbo_points(&self) -> Vec<Point> {
        self.points.iter().map(|[x, y]| Point::new(*x, *y)).collect()
    }
}

/// Pixel-space bounding box of a path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Boundaries {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Boundaries {
    /// Bounding box of `points`; all zero when empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        iter.fold(
            Self {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_zero_area(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

//! Registry mapping shape names to constructors.

use super::generic::GenericPath;
use super::geometry::{PathGeometry, ShapeKind};
use super::handles::HandleMetrics;
use super::rectangle::RectanglePath;
use super::{PathColors, ShapeError};
use crate::surface::Surface;
use kurbo::{Point, Size};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Builds the behaviour object of a registered shape variant.
pub type ShapeConstructor = fn() -> Box<dyn ShapeKind>;

/// Everything needed to construct a [`PathGeometry`].
#[derive(Clone)]
pub struct PathArgs {
    pub surface: Rc<dyn Surface>,
    /// Normalized points.
    pub points: Vec<Point>,
    pub colors: PathColors,
    pub forced_aspect_ratio: Option<f64>,
    pub keep_inside_container: bool,
    /// Container size in pixels.
    pub size: Size,
    pub metrics: HandleMetrics,
}

impl PathArgs {
    pub fn new(surface: Rc<dyn Surface>, size: Size) -> Self {
        Self {
            surface,
            points: Vec::new(),
            colors: PathColors::default(),
            forced_aspect_ratio: None,
            keep_inside_container: false,
            size,
            metrics: HandleMetrics::default(),
        }
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    pub fn with_colors(mut self, colors: PathColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: Option<f64>) -> Self {
        self.forced_aspect_ratio = ratio;
        self
    }

    pub fn keep_inside(mut self, keep: bool) -> Self {
        self.keep_inside_container = keep;
        self
    }

    pub fn with_metrics(mut self, metrics: HandleMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

impl fmt::Debug for PathArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathArgs")
            .field("points", &self.points)
            .field("colors", &self.colors)
            .field("forced_aspect_ratio", &self.forced_aspect_ratio)
            .field("keep_inside_container", &self.keep_inside_container)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Name to constructor registry.
pub struct ShapeFactory {
    constructors: HashMap<String, ShapeConstructor>,
}

impl ShapeFactory {
    /// Registry with the built-in `generic` and `rectangle` variants.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register(GenericPath::NAME, || Box::new(GenericPath));
        factory.register(RectanglePath::NAME, || Box::new(RectanglePath));
        factory
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register or replace a variant.
    pub fn register(&mut self, name: impl Into<String>, constructor: ShapeConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the `name` variant.
    ///
    /// Nothing is created on the surface when the name is unknown.
    pub fn get_shape(&self, name: &str, args: PathArgs) -> Result<PathGeometry, ShapeError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ShapeError::UnknownShape(name.to_string()))?;
        Ok(PathGeometry::new(constructor(), args))
    }
}

impl Default for ShapeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeFactory")
            .field("names", &self.names())
            .finish()
    }
}

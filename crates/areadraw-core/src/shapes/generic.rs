//! Free-form polygon.

use super::ShapeKind;

/// Polygon whose vertices move independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPath;

impl GenericPath {
    pub const NAME: &'static str = "generic";
}

impl ShapeKind for GenericPath {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

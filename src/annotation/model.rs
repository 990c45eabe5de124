//! The per-image annotation container.

use serde::Serialize;

use super::{BoxShape, Natural};

/// Every box annotated on one image, in document order.
///
/// Coordinates are in natural image space. A set is built fresh for each
/// display request and dropped after rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSet {
    pub boxes: Vec<BoxShape<Natural>>,
}

impl AnnotationSet {
    /// Creates a set from already-parsed boxes.
    pub fn new(boxes: Vec<BoxShape<Natural>>) -> Self {
        Self { boxes }
    }

    /// Number of boxes in the set.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if the image carries no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterates over the boxes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoxShape<Natural>> {
        self.boxes.iter()
    }

    /// Number of two-corner rectangles.
    pub fn rect_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_rect()).count()
    }

    /// Number of polygons.
    pub fn polygon_count(&self) -> usize {
        self.len() - self.rect_count()
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a BoxShape<Natural>;
    type IntoIter = std::slice::Iter<'a, BoxShape<Natural>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Box shapes: axis-aligned rectangles and closed polygons.

use serde::Serialize;

use super::point::{Point, Scale};
use super::{Display, Natural};

/// A single annotated region.
///
/// The variant is fixed when the box is built from its flat coordinate list:
/// exactly four values make a [`BoxShape::Rect`], any longer even-length list
/// makes a [`BoxShape::Polygon`].
///
/// Note: corners of a `Rect` are kept in file order, not normalized to
/// min/max. Renderers handle either order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", bound = "")]
pub enum BoxShape<TSpace> {
    Rect {
        p1: Point<TSpace>,
        p2: Point<TSpace>,
    },
    Polygon {
        points: Vec<Point<TSpace>>,
    },
}

impl<TSpace> BoxShape<TSpace> {
    /// Builds a shape from a flat `[x0, y0, x1, y1, ...]` list.
    ///
    /// Returns a description of the problem if the list has an odd length or
    /// fewer than four values.
    pub fn from_flat(values: &[i32]) -> Result<Self, String> {
        if values.len() < 4 {
            return Err(format!(
                "expected at least 4 coordinate values, found {}",
                values.len()
            ));
        }
        if values.len() % 2 != 0 {
            return Err(format!(
                "expected an even number of coordinate values, found {}",
                values.len()
            ));
        }

        match *values {
            [x1, y1, x2, y2] => Ok(BoxShape::Rect {
                p1: Point::new(x1, y1),
                p2: Point::new(x2, y2),
            }),
            _ => Ok(BoxShape::Polygon {
                points: values
                    .chunks_exact(2)
                    .map(|pair| Point::new(pair[0], pair[1]))
                    .collect(),
            }),
        }
    }

    /// Returns the flat `[x0, y0, x1, y1, ...]` list this shape was built from.
    pub fn to_flat(&self) -> Vec<i32> {
        self.points().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Iterates over the vertices of the shape in order.
    pub fn points(&self) -> Box<dyn Iterator<Item = Point<TSpace>> + '_> {
        match self {
            BoxShape::Rect { p1, p2 } => Box::new([*p1, *p2].into_iter()),
            BoxShape::Polygon { points } => Box::new(points.iter().copied()),
        }
    }

    /// Returns true for the two-corner rectangle variant.
    #[inline]
    pub fn is_rect(&self) -> bool {
        matches!(self, BoxShape::Rect { .. })
    }
}

impl BoxShape<Natural> {
    /// Maps every vertex into display space.
    ///
    /// Rectangles and polygons go through the same per-axis scale.
    pub fn to_display(&self, scale: Scale) -> BoxShape<Display> {
        match self {
            BoxShape::Rect { p1, p2 } => BoxShape::Rect {
                p1: p1.to_display(scale),
                p2: p2.to_display(scale),
            },
            BoxShape::Polygon { points } => BoxShape::Polygon {
                points: points.iter().map(|p| p.to_display(scale)).collect(),
            },
        }
    }
}

//! Integer points tagged with their coordinate space, and the scale that maps
//! natural coordinates onto the display.

use serde::Serialize;
use std::marker::PhantomData;

use super::{Display, Natural};

/// A 2D integer point with a type-level marker for the coordinate space.
///
/// The `TSpace` parameter should be either [`Natural`](super::Natural) or
/// [`Display`](super::Display). The only way from one space to the other is
/// [`Point::to_display`].
#[derive(PartialEq, Eq, Hash)]
pub struct Point<TSpace> {
    pub x: i32,
    pub y: i32,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point<TSpace> {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }
}

impl Point<Natural> {
    /// Maps a natural-space point into display space.
    ///
    /// Each axis is divided by its scale factor and truncated toward zero,
    /// so non-negative coordinates land on `floor(v / scale)`.
    #[inline]
    pub fn to_display(&self, scale: Scale) -> Point<Display> {
        Point::new(
            (f64::from(self.x) / scale.x) as i32,
            (f64::from(self.y) / scale.y) as i32,
        )
    }
}

// Manual impls: derived ones would require `TSpace: Copy`
impl<TSpace> Clone for Point<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for Point<TSpace> {}

impl<TSpace> std::fmt::Debug for Point<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Point").field(&self.x).field(&self.y).finish()
    }
}

impl<TSpace> Default for Point<TSpace> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

// Custom serde implementation to avoid a TSpace: Serialize bound
impl<TSpace> Serialize for Point<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Point", 2)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

/// Per-axis ratio between natural and display extents.
///
/// `x = natural_width / display_width`, `y = natural_height / display_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    /// The scale of an image shown at its natural size.
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Computes the scale between a natural and a display size.
    ///
    /// Both sizes are `(width, height)`. A zero display extent yields an
    /// infinite factor on that axis; callers reject zero sizes up front.
    pub fn between(natural: (u32, u32), display: (u32, u32)) -> Self {
        Self {
            x: f64::from(natural.0) / f64::from(display.0),
            y: f64::from(natural.1) / f64::from(display.1),
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

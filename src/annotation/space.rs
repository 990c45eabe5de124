//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to keep
//! annotation coordinates and on-screen coordinates apart at compile time.

use std::fmt;

/// Marker type for natural image coordinates.
///
/// Natural coordinates are pixel positions in the original, unresized image.
/// Annotation files are always written in this space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Natural {}

/// Marker type for display coordinates.
///
/// Display coordinates are pixel positions in the image as it is shown,
/// after any resize to a fixed display size.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {}

impl fmt::Debug for Natural {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

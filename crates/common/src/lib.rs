//! Shared types for towerclimb: transform, geometry, clear colour, viewport.
//!
//! # Invariants
//! - A `Transform` matrix is the cumulative product of every move applied to it.
//! - `Geometry` is immutable once constructed.

mod geometry;
mod types;

pub use geometry::{Geometry, GeometryError};
pub use types::{Color4, Transform, Viewport};

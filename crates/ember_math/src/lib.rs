//! Ember math - vector, ray and frame primitives.
//!
//! Everything here is pure and allocation free. Randomness lives in the
//! renderer so results are reproducible from identical inputs.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod onb;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract, unit_vector, Color, Point3};

mod core;
mod plane;

pub use core::{Point2, Point3, Tolerance, Vec2, Vec3};
pub use plane::Plane;

#[cfg(test)]
mod tests;

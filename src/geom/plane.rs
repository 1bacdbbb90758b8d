//! Orthonormal coordinate frame used to embed a section profile in world space.
//!
//! A section is computed in the 2D local coordinates of its plane: local X runs
//! away from the point of focus along the seating rake, local Y is up. The plane
//! origin is the point of focus.

use super::{Point2, Point3, Tolerance, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}

impl Plane {
    /// World XY plane through the origin.
    #[must_use]
    pub const fn world_xy() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
            z_axis: Vec3::Z,
        }
    }

    /// World YZ plane through the origin. Sections drawn in this plane rise along world Z.
    #[must_use]
    pub const fn world_yz() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::Y,
            y_axis: Vec3::Z,
            z_axis: Vec3::X,
        }
    }

    /// World XZ plane through the origin.
    #[must_use]
    pub const fn world_xz() -> Self {
        Self {
            origin: Point3::ORIGIN,
            x_axis: Vec3::X,
            y_axis: Vec3::Z,
            z_axis: Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Build a plane from an origin and two in-plane directions.
    ///
    /// The directions do not need to be unit length or exactly perpendicular:
    /// `x_dir` is kept, `y_dir` is re-orthogonalised against it and the normal is
    /// their cross product. Returns `None` when either direction is degenerate or
    /// they are parallel.
    #[must_use]
    pub fn from_axes(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Option<Self> {
        if !origin.is_finite() || !x_dir.is_finite() || !y_dir.is_finite() {
            return None;
        }
        let x_axis = x_dir.normalized()?;
        let z_axis = x_axis.cross(y_dir).normalized()?;
        let y_axis = z_axis.cross(x_axis).normalized()?;
        Some(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Same frame moved to a new origin.
    #[must_use]
    pub const fn with_origin(self, origin: Point3) -> Self {
        Self { origin, ..self }
    }

    /// Map local coordinates to world space: `origin + x·X + y·Y + z·Z`.
    #[must_use]
    pub fn point_at(&self, x: f64, y: f64, z: f64) -> Point3 {
        let offset = self.x_axis * x + self.y_axis * y + self.z_axis * z;
        self.origin + offset
    }

    /// Map a local 2D point (z = 0) to world space.
    #[must_use]
    pub fn point_at_2d(&self, local: Point2) -> Point3 {
        self.point_at(local.x, local.y, 0.0)
    }

    /// Map a local 3D point to world space.
    #[must_use]
    pub fn point_at_local(&self, local: Point3) -> Point3 {
        self.point_at(local.x, local.y, local.z)
    }

    /// Express a world point in this plane's local coordinates.
    #[must_use]
    pub fn coordinates(&self, world: Point3) -> Point3 {
        let relative = world - self.origin;
        Point3::new(
            relative.dot(self.x_axis),
            relative.dot(self.y_axis),
            relative.dot(self.z_axis),
        )
    }

    /// Project a world point onto the plane's local 2D coordinates.
    #[must_use]
    pub fn project_2d(&self, world: Point3) -> Point2 {
        self.coordinates(world).to_point2()
    }

    /// Point of focus of a section drawn in this plane, in local coordinates.
    #[must_use]
    pub fn focus_2d(&self) -> Point2 {
        self.project_2d(self.origin)
    }

    /// True when the three axes are unit length and mutually perpendicular.
    #[must_use]
    pub fn is_orthonormal(&self, tol: Tolerance) -> bool {
        let axes = [self.x_axis, self.y_axis, self.z_axis];
        axes.iter().all(|a| tol.approx_eq_f64(a.length(), 1.0))
            && tol.is_zero(self.x_axis.dot(self.y_axis))
            && tol.is_zero(self.y_axis.dot(self.z_axis))
            && tol.is_zero(self.z_axis.dot(self.x_axis))
    }
}

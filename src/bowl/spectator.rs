use crate::geom::{Plane, Point2, Point3, Tolerance, Vec2};

/// The viewer seated (or standing) in one row of a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectator {
    pub(crate) section_index: usize,
    pub(crate) row: usize,
    pub(crate) eye: Point2,
    pub(crate) eye_standing: Point2,
    pub(crate) point_of_focus: Point2,
    pub(crate) sightline: Vec2,
    pub(crate) sightline_standing: Vec2,
    pub(crate) forward_eye: Point2,
    pub(crate) forward_eye_standing: Point2,
    pub(crate) plane: Plane,
    pub(crate) c_value: f64,
    pub(crate) c_value_standing: f64,
}

/// Eye locations of the row ahead, or the tier's front point for the first row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ForwardEyes {
    pub seated: Point2,
    pub standing: Point2,
}

impl Spectator {
    /// Build a spectator from its eye locations.
    ///
    /// Returns `None` when either sightline is vertical, since no C-value exists then.
    pub(crate) fn new(
        section_index: usize,
        row: usize,
        eye: Point2,
        eye_standing: Point2,
        point_of_focus: Point2,
        forward: ForwardEyes,
        plane: Plane,
    ) -> Option<Self> {
        let sightline = Vec2::between(eye, point_of_focus);
        let sightline_standing = Vec2::between(eye_standing, point_of_focus);
        let c_value = clearance(eye, sightline, forward.seated)?;
        let c_value_standing = clearance(eye_standing, sightline_standing, forward.standing)?;
        Some(Self {
            section_index,
            row,
            eye,
            eye_standing,
            point_of_focus,
            sightline,
            sightline_standing,
            forward_eye: forward.seated,
            forward_eye_standing: forward.standing,
            plane,
            c_value,
            c_value_standing,
        })
    }

    #[must_use]
    pub fn section_index(&self) -> usize {
        self.section_index
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn eye(&self, standing: bool) -> Point2 {
        if standing { self.eye_standing } else { self.eye }
    }

    #[must_use]
    pub fn sightline(&self, standing: bool) -> Vec2 {
        if standing {
            self.sightline_standing
        } else {
            self.sightline
        }
    }

    #[must_use]
    pub fn forward_eye(&self, standing: bool) -> Point2 {
        if standing {
            self.forward_eye_standing
        } else {
            self.forward_eye
        }
    }

    /// Clearance of the sightline over the eye of the row ahead.
    #[must_use]
    pub fn c_value(&self, standing: bool) -> f64 {
        if standing {
            self.c_value_standing
        } else {
            self.c_value
        }
    }

    #[must_use]
    pub fn point_of_focus(&self) -> Point2 {
        self.point_of_focus
    }

    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Eye location in world coordinates.
    #[must_use]
    pub fn eye_3d(&self, standing: bool) -> Point3 {
        self.plane.point_at_2d(self.eye(standing))
    }
}

/// Vertical distance from `forward` up to the sightline leaving `eye`, measured at
/// `forward.x`. Negative when the sightline passes below the forward eye.
fn clearance(eye: Point2, sightline: Vec2, forward: Point2) -> Option<f64> {
    let slope = sightline.slope(Tolerance::ZERO_LENGTH)?;
    let line_y = eye.y + (forward.x - eye.x) * slope;
    Some(line_y - forward.y)
}

#[cfg(test)]
mod tests {
    use super::{ForwardEyes, Spectator};
    use crate::geom::{Plane, Point2, Point3, Tolerance, Vec2};

    fn spectator(eye: Point2, forward: Point2) -> Option<Spectator> {
        Spectator::new(
            0,
            1,
            eye,
            eye.offset_y(0.2),
            Point2::ORIGIN,
            ForwardEyes {
                seated: forward,
                standing: forward.offset_y(0.2),
            },
            Plane::world_yz(),
        )
    }

    #[test]
    fn sightline_points_from_eye_to_focus() {
        let s = spectator(Point2::new(4.0, 2.0), Point2::new(3.0, 1.0)).unwrap();
        assert_eq!(s.sightline(false), Vec2::new(-4.0, -2.0));
        assert_eq!(s.eye(false) + s.sightline(false), s.point_of_focus());
    }

    #[test]
    fn c_value_is_clearance_over_forward_eye() {
        // Sightline from (4, 2) to the origin passes (3, 1.5); forward eye at (3, 1.0).
        let s = spectator(Point2::new(4.0, 2.0), Point2::new(3.0, 1.0)).unwrap();
        assert!(Tolerance::DEFAULT.approx_eq_f64(s.c_value(false), 0.5));
    }

    #[test]
    fn standing_c_value_uses_standing_pair() {
        // Standing eye (4, 2.2) through origin passes (3, 1.65); forward standing eye (3, 1.2).
        let s = spectator(Point2::new(4.0, 2.0), Point2::new(3.0, 1.0)).unwrap();
        assert!(Tolerance::DEFAULT.approx_eq_f64(s.c_value(true), 0.45));
    }

    #[test]
    fn obstructed_view_has_negative_c_value() {
        let s = spectator(Point2::new(4.0, 2.0), Point2::new(3.0, 1.8)).unwrap();
        assert!(s.c_value(false) < 0.0);
    }

    #[test]
    fn vertical_sightline_has_no_c_value() {
        assert!(spectator(Point2::new(0.0, 2.0), Point2::new(-1.0, 1.0)).is_none());
    }

    #[test]
    fn eye_maps_through_plane() {
        let s = spectator(Point2::new(4.0, 2.0), Point2::new(3.0, 1.0)).unwrap();
        assert_eq!(s.eye_3d(false), Point3::new(0.0, 4.0, 2.0));
    }
}

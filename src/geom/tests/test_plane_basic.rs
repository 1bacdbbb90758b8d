use crate::geom::{Plane, Point2, Point3, Tolerance, Vec3};

#[test]
fn world_xy_maps_local_points_unchanged() {
    let plane = Plane::world_xy();
    let world = plane.point_at(1.5, -2.0, 3.0);
    assert_eq!(world, Point3::new(1.5, -2.0, 3.0));
    assert_eq!(plane.focus_2d(), Point2::ORIGIN);
}

#[test]
fn world_yz_lifts_section_height_onto_world_z() {
    let plane = Plane::world_yz();
    let world = plane.point_at_2d(Point2::new(4.0, 2.5));
    assert_eq!(world, Point3::new(0.0, 4.0, 2.5));
    assert!(plane.is_orthonormal(Tolerance::DEFAULT));
}

#[test]
fn z_component_uses_the_normal_axis() {
    // A local z offset must move along the plane normal, never along the Y axis.
    let plane = Plane::world_xz();
    let world = plane.point_at(0.0, 0.0, 2.0);
    assert_eq!(world, Point3::new(0.0, -2.0, 0.0));
}

#[test]
fn coordinates_invert_point_at_on_a_tilted_plane() {
    let tol = Tolerance::LOOSE;
    let plane = Plane::from_axes(
        Point3::new(10.0, -4.0, 2.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 1.0),
    )
    .unwrap();
    assert!(plane.is_orthonormal(tol));

    let local = Point3::new(3.0, -1.25, 0.5);
    let world = plane.point_at_local(local);
    let back = plane.coordinates(world);
    assert!(tol.approx_eq_point3(back, local), "{back:?} != {local:?}");
}

#[test]
fn focus_is_the_local_origin_for_any_origin() {
    let plane = Plane::world_yz().with_origin(Point3::new(5.0, 7.0, -3.0));
    let focus = plane.focus_2d();
    assert!(Tolerance::DEFAULT.approx_eq_point2(focus, Point2::ORIGIN));
    assert_eq!(plane.point_at_2d(focus), Point3::new(5.0, 7.0, -3.0));
}

#[test]
fn from_axes_rejects_parallel_directions() {
    assert!(Plane::from_axes(Point3::ORIGIN, Vec3::X, Vec3::X.mul_scalar(2.0)).is_none());
    assert!(Plane::from_axes(Point3::ORIGIN, Vec3::ZERO, Vec3::Y).is_none());
}

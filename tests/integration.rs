use bowl_engine::Engine;
use bowl_engine::bowl::{Section, SectionError, SectionJob, SuperRiser, TierConfig, build_sections};
use bowl_engine::geom::{Plane, Point2, Point3, Tolerance, Vec3};

fn plain_tier(rows: usize, width: f64) -> TierConfig {
    let mut tier = TierConfig::default().with_rows(rows, width).with_start(0.0, 0.0);
    tier.fascia_height = 0.0;
    tier
}

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
    assert!(engine.report().is_none());
}

#[test]
fn single_three_row_tier_in_identity_frame() {
    let section = Section::new(vec![plain_tier(3, 1.0)], Plane::world_xy()).unwrap();
    let tier = section.tier(0).unwrap();

    assert_eq!(tier.points().len(), 6);
    assert_eq!(tier.spectators().len(), 3);
    assert_eq!(tier.points()[0], Point2::new(0.0, 0.0));
    assert_eq!(tier.points()[1], Point2::new(1.0, 0.0));
    assert_eq!(section.point_of_focus(), Point2::ORIGIN);
}

#[test]
fn chained_tier_starts_at_previous_tier_end() {
    let lower = plain_tier(3, 1.0);
    let upper = plain_tier(4, 0.9).chained();
    let section = Section::new(vec![lower, upper], Plane::world_xy()).unwrap();

    let points = section.profile_points();
    assert_eq!(points[0].len(), 6);
    assert_eq!(points[1][0], points[0][5]);
}

#[test]
fn chaining_holds_across_many_tiers_with_fascias() {
    let mut tiers = vec![TierConfig::default().with_rows(6, 0.8)];
    for rows in [5, 7, 4] {
        let mut tier = TierConfig::default().with_rows(rows, 0.85).chained();
        tier.fascia_height = 1.2;
        tiers.push(tier);
    }
    let section = Section::new(tiers, Plane::world_yz()).unwrap();

    for pair in section.tiers().windows(2) {
        assert_eq!(pair[1].first_point(), pair[0].last_point());
        assert!(pair[1].config().build_from_previous_tier);
    }
    for (index, tier) in section.tiers().iter().enumerate() {
        assert_eq!(tier.section_index(), index);
        assert_eq!(tier.plane(), section.plane());
        assert_eq!(tier.points().len(), tier.config().point_capacity());
        assert_eq!(tier.spectators().len(), tier.config().row_count);
    }
}

#[test]
fn first_tier_is_always_anchored_to_focus() {
    let first = TierConfig::default().with_rows(3, 1.0).with_start(4.0, 2.0).chained();
    let section = Section::from_tiers(vec![first]).unwrap();
    let tier = section.tier(0).unwrap();
    assert!(!tier.config().build_from_previous_tier);
    assert_eq!(tier.points()[0], Point2::new(4.0, 2.0));
}

#[test]
fn unchained_later_tier_uses_its_own_offset() {
    let lower = plain_tier(3, 1.0);
    let upper = plain_tier(2, 1.0).with_start(10.0, 6.0);
    let section = Section::from_tiers(vec![lower, upper]).unwrap();
    assert_eq!(section.tier(1).unwrap().points()[0], Point2::new(10.0, 6.0));
}

#[test]
fn zero_rake_angle_keeps_every_riser_flat() {
    let mut tier = plain_tier(8, 0.8).with_start(3.0, 0.0);
    tier.max_rake_angle = 0.0;
    let section = Section::from_tiers(vec![tier]).unwrap();
    assert!(section.profile_points()[0].iter().all(|p| p.y == 0.0));
}

#[test]
fn risers_never_exceed_rake_ceiling() {
    let tier = plain_tier(20, 0.8).with_start(2.0, 0.5);
    let max = tier.max_rake_angle;
    let section = Section::from_tiers(vec![tier]).unwrap();
    let pts = section.tier(0).unwrap().points();

    // Points alternate A, B0, C0, B1, C1, ... and t equals the next row width here.
    for row in 0..19 {
        let rise = pts[2 * row + 2].y - pts[2 * row + 1].y;
        assert!(rise <= max.tan() * 0.8 + 1e-12, "row {row} rise {rise}");
    }
}

#[test]
fn unclamped_rows_meet_minimum_c_exactly() {
    let mut tier = plain_tier(15, 0.8).with_start(4.0, 0.0);
    tier.max_rake_angle = 1.55;
    tier.spectators.minimum_c = 0.12;
    let section = Section::new(vec![tier], Plane::world_yz()).unwrap();

    let c_values = section.c_values(false);
    for c in &c_values[0][1..] {
        assert!(Tolerance::LOOSE.approx_eq_f64(*c, 0.12), "c-value {c}");
    }
}

#[test]
fn clamped_rows_fall_short_of_minimum_c() {
    let mut tier = plain_tier(10, 0.8).with_start(1.0, 0.0);
    tier.max_rake_angle = 0.2;
    let section = Section::from_tiers(vec![tier]).unwrap();
    let c_values = section.c_values(false);
    assert!(c_values[0][1..].iter().all(|c| *c < 0.09));
}

#[test]
fn accessors_return_one_row_per_spectator() {
    let mut sr = SuperRiser::with_unit(1.0, 3);
    sr.curb_width = 0.25;
    sr.curb_height = 0.1;
    let lower = TierConfig::default().with_rows(9, 0.8).with_super_riser(sr);
    let upper = TierConfig::default().with_rows(6, 0.9).chained();
    let section = Section::new(vec![lower, upper], Plane::world_yz()).unwrap();

    for standing in [false, true] {
        let eyes = section.spectator_points(standing);
        let sightlines = section.sightlines(standing);
        let c_values = section.c_values(standing);
        assert_eq!(eyes.iter().map(Vec::len).collect::<Vec<_>>(), vec![9, 6]);
        assert_eq!(c_values.iter().map(Vec::len).collect::<Vec<_>>(), vec![9, 6]);
        for (tier_eyes, tier_lines) in eyes.iter().zip(&sightlines) {
            for (eye, line) in tier_eyes.iter().zip(tier_lines) {
                let target = *eye + *line;
                assert!(Tolerance::DEFAULT.approx_eq_point2(target, section.point_of_focus()));
            }
        }
    }
}

#[test]
fn three_dimensional_points_project_back_onto_the_profile() {
    let plane = Plane::from_axes(
        Point3::new(12.0, -3.0, 1.5),
        Vec3::new(0.6, 0.8, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    )
    .unwrap();
    let section = Section::new(vec![TierConfig::default().with_rows(6, 0.8)], plane).unwrap();

    let tol = Tolerance::LOOSE;
    assert!(tol.approx_eq_point2(section.point_of_focus(), Point2::ORIGIN));
    let local = section.profile_points();
    let world = section.profile_points_3d();
    for (p2, p3) in local[0].iter().zip(&world[0]) {
        assert!(tol.approx_eq_point2(plane.project_2d(*p3), *p2));
        assert!(tol.approx_eq_f64(plane.coordinates(*p3).z, 0.0));
    }
    let eyes_3d = section.spectator_points_3d(true);
    assert!(tol.approx_eq_point2(plane.project_2d(eyes_3d[0][0]), section.spectator_points(true)[0][0]));
}

#[test]
fn clone_is_deep() {
    let original = Section::new(vec![TierConfig::default().with_rows(5, 0.8)], Plane::world_xy()).unwrap();
    let mut copy = original.clone();
    copy.set_plane(Plane::world_yz().with_origin(Point3::new(1.0, 2.0, 3.0)));

    assert_eq!(original.plane(), &Plane::world_xy());
    assert_eq!(original.tier(0).unwrap().plane(), &Plane::world_xy());
    assert_eq!(original.tier(0).unwrap().spectators()[0].plane(), &Plane::world_xy());
    assert_eq!(copy.tier(0).unwrap().plane(), copy.plane());
    // Re-framing moves only the world embedding.
    assert_eq!(copy.profile_points(), original.profile_points());
    assert_ne!(copy.profile_points_3d(), original.profile_points_3d());
}

#[test]
fn empty_section_is_rejected() {
    assert_eq!(Section::from_tiers(Vec::new()), Err(SectionError::EmptySection));
}

#[test]
fn invalid_tier_is_reported_before_generation() {
    let good = TierConfig::default().with_rows(4, 0.8);
    let mut bad = TierConfig::default().with_rows(4, 0.8).chained();
    bad.row_widths.push(0.8);
    let err = Section::from_tiers(vec![good, bad]).unwrap_err();

    assert!(matches!(err, SectionError::InvalidConfiguration { tier: 1, .. }));
    assert!(err.to_string().contains("5 row widths given for 4 rows"));
}

#[test]
fn degenerate_eye_position_fails_the_whole_section() {
    // First row eye sits directly above the focus.
    let tier = plain_tier(3, 0.15);
    let err = Section::from_tiers(vec![tier]).unwrap_err();
    assert!(matches!(err, SectionError::DegenerateGeometry { tier: 0, row: 0, .. }));
}

#[test]
fn independent_sections_build_in_job_order() {
    let jobs = vec![
        SectionJob {
            tiers: vec![plain_tier(3, 1.0)],
            plane: Plane::world_xy(),
        },
        SectionJob {
            tiers: Vec::new(),
            plane: Plane::world_xy(),
        },
        SectionJob {
            tiers: vec![plain_tier(5, 0.8), plain_tier(2, 0.8).chained()],
            plane: Plane::world_yz(),
        },
    ];
    let results = build_sections(jobs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().tier(0).unwrap().points().len(), 6);
    assert!(matches!(results[1], Err(SectionError::EmptySection)));
    assert_eq!(results[2].as_ref().unwrap().len(), 2);
}

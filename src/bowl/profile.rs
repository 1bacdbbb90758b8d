//! Row-by-row seating profile generation.
//!
//! A tier profile is built front to back in a single pass. For each row the
//! generator walks the cursor across the tread to the rear riser-bottom corner
//! (point B), places that row's spectator relative to B, and then climbs the
//! riser to the riser-top corner (point C). The riser height is solved from the
//! clearance target so that the next row's sightline clears the current row's
//! eye by `minimum_c`, and is capped by the maximum rake angle.
//!
//! A super riser adds corners of its own: a curb in front of the super row and a
//! guardrail with a nose drop behind it. The exact number of corners is known up
//! front (`TierConfig::point_capacity`) and the generated profile is checked
//! against it.

use crate::geom::{Plane, Point2, Tolerance, Vec2};

use super::error::SectionError;
use super::spectator::{ForwardEyes, Spectator};
use super::tier::{Tier, TierConfig};

/// Build the full profile and spectator set of one tier.
///
/// `anchor` is the tier's first profile point: the previous tier's last point
/// for a chained tier, otherwise the point of focus offset by the tier start.
///
/// # Errors
/// `DegenerateGeometry` when a row eye sits level with the point of focus, and
/// `InternalInconsistency` when the emitted point count diverges from the
/// configured capacity.
pub(crate) fn build_tier(
    config: TierConfig,
    section_index: usize,
    plane: Plane,
    anchor: Point2,
) -> Result<Tier, SectionError> {
    let focus = plane.focus_2d();
    let mut builder = ProfileBuilder {
        config: &config,
        section_index,
        plane,
        focus,
        points: Vec::with_capacity(config.point_capacity()),
        spectators: Vec::with_capacity(config.row_count),
    };
    builder.run(anchor)?;

    let ProfileBuilder {
        points, spectators, ..
    } = builder;
    check_point_count(section_index, config.point_capacity(), points.len())?;

    log::debug!(
        "tier {section_index}: {} profile points, {} spectators",
        points.len(),
        spectators.len()
    );

    Ok(Tier {
        config,
        section_index,
        plane,
        points,
        spectators,
    })
}

pub(crate) fn check_point_count(
    tier: usize,
    expected: usize,
    actual: usize,
) -> Result<(), SectionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SectionError::InternalInconsistency {
            tier,
            expected,
            actual,
        })
    }
}

struct ProfileBuilder<'a> {
    config: &'a TierConfig,
    section_index: usize,
    plane: Plane,
    focus: Point2,
    points: Vec<Point2>,
    spectators: Vec<Spectator>,
}

impl ProfileBuilder<'_> {
    fn run(&mut self, anchor: Point2) -> Result<(), SectionError> {
        let config = self.config;
        self.points.push(anchor);

        let mut cursor = anchor;
        if config.fascia_height != 0.0 {
            cursor = cursor.offset_y(config.fascia_height);
            self.points.push(cursor);
        }

        // Every row but the last gets a riser; the riser needs the next row's width.
        for row in 0..config.row_count - 1 {
            let mut pt = cursor.offset_x(config.row_width(row));
            self.points.push(pt);
            self.add_spectator(pt, row)?;

            if let Some(sr) = config.super_riser_at(row + 1) {
                if sr.has_curb() {
                    if sr.curb_height > 0.0 {
                        pt = pt.offset_y(sr.curb_height);
                        self.points.push(pt);
                    }
                    pt = pt.offset_x(sr.curb_width);
                    self.points.push(pt);
                }
            }

            let riser = solve_riser_height(config, pt.sub_point(self.focus), row).ok_or(
                SectionError::DegenerateGeometry {
                    tier: self.section_index,
                    row,
                    reason: "row eye is level with the point of focus",
                },
            )?;
            if riser.clamped {
                log::debug!(
                    "tier {}, row {row}: riser capped by max rake angle at {:.4}",
                    self.section_index,
                    riser.height
                );
            }
            pt = pt.offset_y(riser.height);
            self.points.push(pt);

            if let Some(sr) = config.super_riser_at(row) {
                pt = pt.offset_x(sr.guardrail_width);
                self.points.push(pt);
                pt = pt.offset_y(-config.guardrail_drop());
                self.points.push(pt);
            }

            cursor = pt;
        }

        let last = config.row_count - 1;
        let closing = cursor.offset_x(config.row_width(last));
        self.points.push(closing);
        self.add_spectator(closing, last)
    }

    /// Place the spectator of `row` relative to its riser-bottom corner.
    fn add_spectator(&mut self, riser_bottom: Point2, row: usize) -> Result<(), SectionError> {
        let (seated, standing) = match self.config.super_riser_at(row) {
            Some(sr) => (sr.eye(false), sr.eye(true)),
            None => (
                self.config.spectators.eye(false),
                self.config.spectators.eye(true),
            ),
        };
        let eye = Point2::new(riser_bottom.x - seated.0, riser_bottom.y + seated.1);
        let eye_standing = Point2::new(riser_bottom.x - standing.0, riser_bottom.y + standing.1);

        let forward = match self.spectators.last() {
            Some(ahead) => ForwardEyes {
                seated: ahead.eye(false),
                standing: ahead.eye(true),
            },
            None => ForwardEyes {
                seated: self.points[0],
                standing: self.points[0],
            },
        };

        let spectator = Spectator::new(
            self.section_index,
            row,
            eye,
            eye_standing,
            self.focus,
            forward,
            self.plane,
        )
        .ok_or(SectionError::DegenerateGeometry {
            tier: self.section_index,
            row,
            reason: "sightline is vertical",
        })?;
        self.spectators.push(spectator);
        Ok(())
    }
}

/// Outcome of the riser-height solver for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RiserHeight {
    pub height: f64,
    /// True when the rake angle ceiling replaced the clearance solution.
    pub clamped: bool,
}

/// Solve the riser height at the back of `row`.
///
/// `b` is the riser-bottom corner relative to the point of focus, already moved
/// across any curb in front of a super row. The rise is chosen so the next row's
/// seated sightline passes `minimum_c` above the current row's eye, by similar
/// triangles between the current and next eye distances from the focus.
///
/// Rows next to a super riser use the super riser's eyes (and the standing eyes
/// of the row in front of it) and are exempt from the rake cap. Returns `None`
/// when the current eye is level with the focus.
pub(crate) fn solve_riser_height(config: &TierConfig, b: Vec2, row: usize) -> Option<RiserHeight> {
    let params = &config.spectators;
    let mut n = 0.0;
    let mut b = b;
    let (mut cur_eye_x, mut cur_eye_y) = params.eye(false);
    let (mut next_eye_x, mut next_eye_y) = (cur_eye_x, cur_eye_y);
    let mut next_width = config.row_width(row + 1);
    let mut super_transition = false;

    if let Some(sr) = config.super_riser_at(row + 1) {
        // The curb corners were already appended; solve from the riser foot.
        n -= sr.curb_height;
        b = Vec2::new(b.x - sr.curb_width, b.y - sr.curb_height);
        (cur_eye_x, cur_eye_y) = params.eye(true);
        next_eye_x = sr.eye_x - sr.curb_width;
        next_eye_y = sr.eye_y;
        super_transition = true;
    } else if let Some(sr) = config.super_riser_at(row) {
        next_width += sr.guardrail_width;
        (cur_eye_x, cur_eye_y) = sr.eye(false);
        n += config.guardrail_drop();
        super_transition = true;
    }

    let t = next_width + cur_eye_x - next_eye_x;
    let c = params.minimum_c;
    let h = b.y + cur_eye_y;
    let d = (b.x - cur_eye_x) + t;
    let span = d - t;
    if !span.is_finite() || Tolerance::ZERO_LENGTH.scaled(config.unit).is_zero(span) {
        return None;
    }

    let r = (c + h) / span * d;
    n += r - next_eye_y - b.y;

    if !super_transition {
        let n_max = config.max_rake_angle.tan() * t;
        if n > n_max {
            return Some(RiserHeight {
                height: n_max,
                clamped: true,
            });
        }
    }

    Some(RiserHeight {
        height: n,
        clamped: false,
    })
}

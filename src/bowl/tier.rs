//! Seating tier configuration and computed tier geometry.

use std::f64::consts::FRAC_PI_2;

use crate::geom::{Plane, Point2};

use super::error::SectionError;
use super::spectator::Spectator;

/// Default maximum rake angle in radians (34°).
pub const DEFAULT_MAX_RAKE_ANGLE: f64 = 0.593_412;

/// Vertical drop from the top of a super riser guardrail to the nose of the next row,
/// in model units at unit scale 1.0.
pub const GUARDRAIL_DROP: f64 = 0.25;

/// Eye offsets and the clearance target shared by every ordinary row of a tier.
///
/// Offsets are measured from the rear riser-bottom corner of the row: `x` towards
/// the point of focus, `y` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectatorParameters {
    pub eye_x: f64,
    pub eye_y: f64,
    pub standing_eye_x: f64,
    pub standing_eye_y: f64,
    /// Minimum C-value every row must achieve over the row ahead.
    pub minimum_c: f64,
}

impl SpectatorParameters {
    #[must_use]
    pub fn with_unit(unit: f64) -> Self {
        Self {
            eye_x: 0.15 * unit,
            eye_y: 1.2 * unit,
            standing_eye_x: 0.6 * unit,
            standing_eye_y: 1.4 * unit,
            minimum_c: 0.09 * unit,
        }
    }

    /// Seated or standing eye offset as `(x, y)`.
    #[must_use]
    pub const fn eye(&self, standing: bool) -> (f64, f64) {
        if standing {
            (self.standing_eye_x, self.standing_eye_y)
        } else {
            (self.eye_x, self.eye_y)
        }
    }
}

impl Default for SpectatorParameters {
    fn default() -> Self {
        Self::with_unit(1.0)
    }
}

/// An elevated row (wheelchair platform, vomitory landing) inserted into a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperRiser {
    /// Row index the super riser occupies.
    pub row: usize,
    /// Tread depth of the super row. Replaces `row_widths[row]`.
    pub width: f64,
    /// Optional curb in front of the super row.
    pub curb_width: f64,
    pub curb_height: f64,
    /// Guardrail depth at the back of the super row.
    pub guardrail_width: f64,
    pub eye_x: f64,
    pub eye_y: f64,
    pub standing_eye_x: f64,
    pub standing_eye_y: f64,
}

impl SuperRiser {
    #[must_use]
    pub fn with_unit(unit: f64, row: usize) -> Self {
        Self {
            row,
            width: 2.4 * unit,
            curb_width: 0.0,
            curb_height: 0.0,
            guardrail_width: 0.0,
            eye_x: 1.6 * unit,
            eye_y: 1.2 * unit,
            standing_eye_x: 1.8 * unit,
            standing_eye_y: 1.4 * unit,
        }
    }

    /// Seated or standing eye offset as `(x, y)`.
    #[must_use]
    pub const fn eye(&self, standing: bool) -> (f64, f64) {
        if standing {
            (self.standing_eye_x, self.standing_eye_y)
        } else {
            (self.eye_x, self.eye_y)
        }
    }

    #[must_use]
    pub fn has_curb(&self) -> bool {
        self.curb_width > 0.0
    }
}

/// Input configuration of one seating tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig {
    /// Model unit scale the defaults and the guardrail drop are expressed in.
    pub unit: f64,
    /// Offset of the tier start from the point of focus. Ignored when the tier
    /// builds from the previous tier.
    pub start_x: f64,
    pub start_y: f64,
    pub build_from_previous_tier: bool,
    pub row_count: usize,
    pub row_widths: Vec<f64>,
    /// Hard ceiling on any riser's rise over run, in radians.
    pub max_rake_angle: f64,
    /// Riser rounding increment. Kept with the configuration but not applied;
    /// zero by default, and a nonzero value is logged as ignored.
    pub round_to: f64,
    /// Height of the fascia face in front of the first row.
    pub fascia_height: f64,
    pub spectators: SpectatorParameters,
    pub super_riser: Option<SuperRiser>,
}

impl TierConfig {
    /// Default tier expressed in the given unit scale (1.0 = metres, 1000.0 = millimetres).
    #[must_use]
    pub fn with_unit(unit: f64) -> Self {
        let row_count = 25;
        Self {
            unit,
            start_x: 5.0 * unit,
            start_y: 1.0 * unit,
            build_from_previous_tier: false,
            row_count,
            row_widths: vec![0.8 * unit; row_count],
            max_rake_angle: DEFAULT_MAX_RAKE_ANGLE,
            round_to: 0.0,
            fascia_height: 1.0 * unit,
            spectators: SpectatorParameters::with_unit(unit),
            super_riser: None,
        }
    }

    /// Replace the rows with `row_count` rows of equal width.
    #[must_use]
    pub fn with_rows(mut self, row_count: usize, width: f64) -> Self {
        self.row_count = row_count;
        self.row_widths = vec![width; row_count];
        self
    }

    #[must_use]
    pub fn with_row_widths(mut self, row_widths: Vec<f64>) -> Self {
        self.row_count = row_widths.len();
        self.row_widths = row_widths;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start_x: f64, start_y: f64) -> Self {
        self.start_x = start_x;
        self.start_y = start_y;
        self
    }

    #[must_use]
    pub fn with_super_riser(mut self, super_riser: SuperRiser) -> Self {
        self.super_riser = Some(super_riser);
        self
    }

    #[must_use]
    pub fn chained(mut self) -> Self {
        self.build_from_previous_tier = true;
        self
    }

    /// Tread depth of `row`, with the super riser width standing in for its row.
    #[must_use]
    pub fn row_width(&self, row: usize) -> f64 {
        match self.super_riser {
            Some(sr) if sr.row == row => sr.width,
            _ => self.row_widths[row],
        }
    }

    /// Super riser on exactly this row, if any.
    #[must_use]
    pub fn super_riser_at(&self, row: usize) -> Option<&SuperRiser> {
        self.super_riser.as_ref().filter(|sr| sr.row == row)
    }

    /// Vertical drop behind a super riser guardrail, scaled to the tier's unit.
    #[must_use]
    pub fn guardrail_drop(&self) -> f64 {
        GUARDRAIL_DROP * self.unit
    }

    /// Number of profile points the generator emits for this configuration.
    ///
    /// Two points per row, one for a fascia, and the extra corners a super riser
    /// adds: the curb (when the super row has a row in front of it) and the
    /// guardrail (when the super row has a row behind it).
    #[must_use]
    pub fn point_capacity(&self) -> usize {
        let mut count = self.row_count * 2;
        if self.fascia_height != 0.0 {
            count += 1;
        }
        if let Some(sr) = self.super_riser {
            if sr.row >= 1 && sr.has_curb() {
                count += 1;
                if sr.curb_height > 0.0 {
                    count += 1;
                }
            }
            if sr.row + 1 < self.row_count {
                count += 2;
            }
        }
        count
    }

    /// Check the configuration before any geometry is generated.
    ///
    /// # Errors
    /// `SectionError::InvalidConfiguration` naming the first offending field.
    pub fn validate(&self, tier: usize) -> Result<(), SectionError> {
        if !self.unit.is_finite() || self.unit <= 0.0 {
            return Err(SectionError::invalid(tier, "unit scale must be finite and positive"));
        }
        if self.row_count < 1 {
            return Err(SectionError::invalid(tier, "row count must be at least 1"));
        }
        if self.row_widths.len() != self.row_count {
            return Err(SectionError::invalid(
                tier,
                format!(
                    "{} row widths given for {} rows",
                    self.row_widths.len(),
                    self.row_count
                ),
            ));
        }
        if let Some(row) = self
            .row_widths
            .iter()
            .position(|w| !w.is_finite() || *w <= 0.0)
        {
            return Err(SectionError::invalid(
                tier,
                format!("row width {row} must be finite and positive"),
            ));
        }
        let finite = [
            self.start_x,
            self.start_y,
            self.fascia_height,
            self.spectators.eye_x,
            self.spectators.eye_y,
            self.spectators.standing_eye_x,
            self.spectators.standing_eye_y,
            self.spectators.minimum_c,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(SectionError::invalid(
                tier,
                "offsets, eye positions and minimum C-value must be finite",
            ));
        }
        if !(0.0..FRAC_PI_2).contains(&self.max_rake_angle) {
            return Err(SectionError::invalid(
                tier,
                format!(
                    "max rake angle {} must lie in [0, pi/2) radians",
                    self.max_rake_angle
                ),
            ));
        }
        if !self.round_to.is_finite() || self.round_to < 0.0 {
            return Err(SectionError::invalid(tier, "round-to increment must be finite and non-negative"));
        }
        if let Some(sr) = self.super_riser {
            validate_super_riser(&sr, self.row_count, tier)?;
        }
        Ok(())
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self::with_unit(1.0)
    }
}

fn validate_super_riser(sr: &SuperRiser, row_count: usize, tier: usize) -> Result<(), SectionError> {
    if sr.row >= row_count {
        return Err(SectionError::invalid(
            tier,
            format!("super riser row {} is outside {} rows", sr.row, row_count),
        ));
    }
    if !sr.width.is_finite() || sr.width <= 0.0 {
        return Err(SectionError::invalid(tier, "super riser width must be finite and positive"));
    }
    let dimensions = [sr.curb_width, sr.curb_height, sr.guardrail_width];
    if dimensions.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(SectionError::invalid(
            tier,
            "super riser curb and guardrail dimensions must be finite and non-negative",
        ));
    }
    let eyes = [sr.eye_x, sr.eye_y, sr.standing_eye_x, sr.standing_eye_y];
    if eyes.iter().any(|v| !v.is_finite()) {
        return Err(SectionError::invalid(tier, "super riser eye positions must be finite"));
    }
    Ok(())
}

/// A seating tier with its computed profile and spectators.
///
/// Produced only by section construction; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub(crate) config: TierConfig,
    pub(crate) section_index: usize,
    pub(crate) plane: Plane,
    pub(crate) points: Vec<Point2>,
    pub(crate) spectators: Vec<Spectator>,
}

impl Tier {
    #[must_use]
    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    #[must_use]
    pub fn section_index(&self) -> usize {
        self.section_index
    }

    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Tread/riser corner points, front to back.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// One spectator per row, in row order.
    #[must_use]
    pub fn spectators(&self) -> &[Spectator] {
        &self.spectators
    }

    #[must_use]
    pub fn first_point(&self) -> Option<Point2> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last_point(&self) -> Option<Point2> {
        self.points.last().copied()
    }

    pub(crate) fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
        for spectator in &mut self.spectators {
            spectator.plane = plane;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SectionError, SuperRiser, TierConfig};

    #[test]
    fn plain_tier_capacity_is_two_points_per_row() {
        let mut tier = TierConfig::default().with_rows(3, 1.0);
        tier.fascia_height = 0.0;
        assert_eq!(tier.point_capacity(), 6);

        tier.fascia_height = 0.5;
        assert_eq!(tier.point_capacity(), 7);
    }

    #[test]
    fn super_riser_capacity_counts_curb_and_guardrail_corners() {
        let mut sr = SuperRiser::with_unit(1.0, 2);
        sr.curb_width = 0.3;
        sr.curb_height = 0.2;
        let mut tier = TierConfig::default().with_rows(6, 0.8).with_super_riser(sr);
        tier.fascia_height = 0.0;
        assert_eq!(tier.point_capacity(), 12 + 2 + 2);

        // Last row: no guardrail behind it.
        let mut last = sr;
        last.row = 5;
        tier.super_riser = Some(last);
        assert_eq!(tier.point_capacity(), 12 + 2);

        // First row: nothing in front of it to carry a curb.
        let mut first = sr;
        first.row = 0;
        tier.super_riser = Some(first);
        assert_eq!(tier.point_capacity(), 12 + 2);
    }

    #[test]
    fn unit_scale_applies_to_every_default_length() {
        let mm = TierConfig::with_unit(1000.0);
        assert_eq!(mm.start_x, 5000.0);
        assert_eq!(mm.row_widths[0], 800.0);
        assert_eq!(mm.spectators.minimum_c, 90.0);
        assert_eq!(mm.guardrail_drop(), 250.0);
        assert_eq!(mm.max_rake_angle, TierConfig::default().max_rake_angle);
    }

    #[test]
    fn default_tier_requests_no_riser_rounding() {
        assert_eq!(TierConfig::default().round_to, 0.0);
        assert_eq!(TierConfig::with_unit(1000.0).round_to, 0.0);
        assert!(TierConfig::default().validate(0).is_ok());
    }

    #[test]
    fn super_row_uses_super_riser_width() {
        let tier = TierConfig::default()
            .with_rows(4, 0.8)
            .with_super_riser(SuperRiser::with_unit(1.0, 2));
        assert_eq!(tier.row_width(1), 0.8);
        assert_eq!(tier.row_width(2), 2.4);
    }

    #[test]
    fn validate_rejects_mismatched_row_widths() {
        let mut tier = TierConfig::default();
        tier.row_widths.pop();
        assert!(matches!(
            tier.validate(3),
            Err(SectionError::InvalidConfiguration { tier: 3, .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_rows_and_bad_angles() {
        let tier = TierConfig::default().with_rows(0, 0.8);
        assert!(tier.validate(0).is_err());

        let mut steep = TierConfig::default();
        steep.max_rake_angle = std::f64::consts::FRAC_PI_2;
        assert!(steep.validate(0).is_err());

        let mut negative = TierConfig::default();
        negative.max_rake_angle = -0.1;
        assert!(negative.validate(0).is_err());
    }

    #[test]
    fn validate_rejects_super_riser_outside_the_tier() {
        let tier = TierConfig::default()
            .with_rows(4, 0.8)
            .with_super_riser(SuperRiser::with_unit(1.0, 4));
        let err = tier.validate(1).unwrap_err();
        assert!(err.to_string().contains("super riser row 4"));
    }
}

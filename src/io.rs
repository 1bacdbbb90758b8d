//! Data-transfer types between a host (the wasm facade, the CLI) and the section core.
//!
//! Inputs are lenient: every tier field is optional and falls back to the tier
//! defaults for the requested unit scale. Outputs are plain arrays so they
//! serialise cleanly to JS.

use serde::{Deserialize, Serialize};

use crate::bowl::{Section, SectionError, Spectator, SuperRiser, Tier, TierConfig};
use crate::geom::{Plane, Point3, Vec3};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("section plane is degenerate: axes must be finite, non-zero and not parallel")]
    InvalidPlane,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuperRiserInput {
    pub row: usize,
    pub width: Option<f64>,
    pub curb_width: Option<f64>,
    pub curb_height: Option<f64>,
    pub guardrail_width: Option<f64>,
    pub eye_x: Option<f64>,
    pub eye_y: Option<f64>,
    pub standing_eye_x: Option<f64>,
    pub standing_eye_y: Option<f64>,
}

impl SuperRiserInput {
    fn into_super_riser(self, unit: f64) -> SuperRiser {
        let base = SuperRiser::with_unit(unit, self.row);
        SuperRiser {
            row: self.row,
            width: self.width.unwrap_or(base.width),
            curb_width: self.curb_width.unwrap_or(base.curb_width),
            curb_height: self.curb_height.unwrap_or(base.curb_height),
            guardrail_width: self.guardrail_width.unwrap_or(base.guardrail_width),
            eye_x: self.eye_x.unwrap_or(base.eye_x),
            eye_y: self.eye_y.unwrap_or(base.eye_y),
            standing_eye_x: self.standing_eye_x.unwrap_or(base.standing_eye_x),
            standing_eye_y: self.standing_eye_y.unwrap_or(base.standing_eye_y),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierInput {
    pub unit: Option<f64>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub build_from_previous_tier: Option<bool>,
    pub row_count: Option<usize>,
    /// Per-row tread depths. Takes precedence over `row_width`.
    pub row_widths: Option<Vec<f64>>,
    /// Single tread depth applied to every row.
    pub row_width: Option<f64>,
    pub max_rake_angle: Option<f64>,
    pub round_to: Option<f64>,
    pub fascia_height: Option<f64>,
    pub eye_x: Option<f64>,
    pub eye_y: Option<f64>,
    pub standing_eye_x: Option<f64>,
    pub standing_eye_y: Option<f64>,
    pub minimum_c: Option<f64>,
    pub super_riser: Option<SuperRiserInput>,
}

impl TierInput {
    /// Resolve to a tier configuration. Row counts and widths that disagree are
    /// passed through unchanged so section validation can report them.
    #[must_use]
    pub fn into_config(self) -> TierConfig {
        let unit = self.unit.unwrap_or(1.0);
        let mut config = TierConfig::with_unit(unit);
        let default_width = config.row_widths[0];

        match (self.row_widths, self.row_count) {
            (Some(widths), Some(count)) => {
                config.row_count = count;
                config.row_widths = widths;
            }
            (Some(widths), None) => config = config.with_row_widths(widths),
            (None, count) => {
                let count = count.unwrap_or(config.row_count);
                config = config.with_rows(count, self.row_width.unwrap_or(default_width));
            }
        }

        config.start_x = self.start_x.unwrap_or(config.start_x);
        config.start_y = self.start_y.unwrap_or(config.start_y);
        config.build_from_previous_tier = self
            .build_from_previous_tier
            .unwrap_or(config.build_from_previous_tier);
        config.max_rake_angle = self.max_rake_angle.unwrap_or(config.max_rake_angle);
        config.round_to = self.round_to.unwrap_or(config.round_to);
        config.fascia_height = self.fascia_height.unwrap_or(config.fascia_height);

        let spectators = &mut config.spectators;
        spectators.eye_x = self.eye_x.unwrap_or(spectators.eye_x);
        spectators.eye_y = self.eye_y.unwrap_or(spectators.eye_y);
        spectators.standing_eye_x = self.standing_eye_x.unwrap_or(spectators.standing_eye_x);
        spectators.standing_eye_y = self.standing_eye_y.unwrap_or(spectators.standing_eye_y);
        spectators.minimum_c = self.minimum_c.unwrap_or(spectators.minimum_c);

        config.super_riser = self.super_riser.map(|sr| sr.into_super_riser(unit));
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneInput {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
}

impl PlaneInput {
    /// # Errors
    /// `InputError::InvalidPlane` when the axes cannot form a frame.
    pub fn to_plane(self) -> Result<Plane, InputError> {
        Plane::from_axes(
            Point3::from_array(self.origin),
            Vec3::from_array(self.x_axis),
            Vec3::from_array(self.y_axis),
        )
        .ok_or(InputError::InvalidPlane)
    }
}

/// Everything needed to build one section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionRequest {
    pub tiers: Vec<TierInput>,
    /// Section plane; world YZ when absent, so the profile rises along world Z.
    pub plane: Option<PlaneInput>,
}

impl SectionRequest {
    /// # Errors
    /// `InvalidPlane` for an unusable plane, otherwise any section construction error.
    pub fn build(self) -> Result<Section, InputError> {
        let plane = match self.plane {
            Some(plane) => plane.to_plane()?,
            None => Plane::world_yz(),
        };
        let configs = self.tiers.into_iter().map(TierInput::into_config).collect();
        Ok(Section::new(configs, plane)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectatorReport {
    pub row: usize,
    pub eye: [f64; 2],
    pub eye_standing: [f64; 2],
    pub sightline: [f64; 2],
    pub sightline_standing: [f64; 2],
    pub c_value: f64,
    pub c_value_standing: f64,
}

impl From<&Spectator> for SpectatorReport {
    fn from(s: &Spectator) -> Self {
        Self {
            row: s.row(),
            eye: s.eye(false).to_array(),
            eye_standing: s.eye(true).to_array(),
            sightline: s.sightline(false).to_array(),
            sightline_standing: s.sightline(true).to_array(),
            c_value: s.c_value(false),
            c_value_standing: s.c_value(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierReport {
    pub section_index: usize,
    pub points: Vec<[f64; 2]>,
    pub points_3d: Vec<[f64; 3]>,
    pub spectators: Vec<SpectatorReport>,
}

impl From<&Tier> for TierReport {
    fn from(tier: &Tier) -> Self {
        Self {
            section_index: tier.section_index(),
            points: tier.points().iter().map(|p| p.to_array()).collect(),
            points_3d: tier
                .points()
                .iter()
                .map(|p| tier.plane().point_at_2d(*p).to_array())
                .collect(),
            spectators: tier.spectators().iter().map(SpectatorReport::from).collect(),
        }
    }
}

/// Serialisable snapshot of a built section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub point_of_focus: [f64; 2],
    pub focus_3d: [f64; 3],
    pub tiers: Vec<TierReport>,
}

impl From<&Section> for SectionReport {
    fn from(section: &Section) -> Self {
        Self {
            point_of_focus: section.point_of_focus().to_array(),
            focus_3d: section.plane().origin.to_array(),
            tiers: section.tiers().iter().map(TierReport::from).collect(),
        }
    }
}

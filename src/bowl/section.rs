use crate::geom::{Plane, Point2, Point3, Vec2};

use super::error::SectionError;
use super::profile::build_tier;
use super::tier::{Tier, TierConfig};

/// An ordered stack of seating tiers sharing one plane and point of focus.
///
/// Every tier is fully computed on construction. `Clone` copies all tiers,
/// points and spectators; a clone never shares state with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    plane: Plane,
    tiers: Vec<Tier>,
}

impl Section {
    /// Build a section in `plane` from tier configurations, front tier first.
    ///
    /// The first tier always anchors to the point of focus; every later tier with
    /// `build_from_previous_tier` set starts where the previous tier ends.
    ///
    /// # Errors
    /// `EmptySection` for no tiers, `InvalidConfiguration` for the first invalid
    /// tier (checked before anything is generated), and any error raised while
    /// generating a tier profile.
    pub fn new(configs: Vec<TierConfig>, plane: Plane) -> Result<Self, SectionError> {
        if configs.is_empty() {
            return Err(SectionError::EmptySection);
        }
        for (index, config) in configs.iter().enumerate() {
            config.validate(index)?;
        }
        if configs.iter().any(|c| c.round_to != 0.0) {
            log::warn!("riser heights are not rounded; configured round-to increments are ignored");
        }

        let focus = plane.focus_2d();
        let mut tiers: Vec<Tier> = Vec::with_capacity(configs.len());
        for (index, mut config) in configs.into_iter().enumerate() {
            if index == 0 {
                config.build_from_previous_tier = false;
            }
            let anchor = match tiers.last() {
                Some(previous) if config.build_from_previous_tier => previous
                    .last_point()
                    .ok_or(SectionError::InternalInconsistency {
                        tier: index - 1,
                        expected: previous.config.point_capacity(),
                        actual: 0,
                    })?,
                _ => Point2::new(focus.x + config.start_x, focus.y + config.start_y),
            };
            tiers.push(build_tier(config, index, plane, anchor)?);
        }

        log::debug!("section built with {} tiers", tiers.len());
        Ok(Self { plane, tiers })
    }

    /// Build a section in the world XY plane.
    ///
    /// # Errors
    /// See [`Section::new`].
    pub fn from_tiers(configs: Vec<TierConfig>) -> Result<Self, SectionError> {
        Self::new(configs, Plane::world_xy())
    }

    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Move the section to another plane.
    ///
    /// Profiles are expressed relative to the point of focus, so only the world
    /// embedding changes.
    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
        for tier in &mut self.tiers {
            tier.set_plane(plane);
        }
    }

    #[must_use]
    pub fn point_of_focus(&self) -> Point2 {
        self.plane.focus_2d()
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false for a constructed section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Profile points of every tier.
    #[must_use]
    pub fn profile_points(&self) -> Vec<Vec<Point2>> {
        self.tiers.iter().map(|t| t.points.clone()).collect()
    }

    /// Profile points of every tier, in world coordinates.
    #[must_use]
    pub fn profile_points_3d(&self) -> Vec<Vec<Point3>> {
        self.tiers
            .iter()
            .map(|t| t.points.iter().map(|p| self.plane.point_at_2d(*p)).collect())
            .collect()
    }

    /// Seated or standing C-value of every row.
    #[must_use]
    pub fn c_values(&self, standing: bool) -> Vec<Vec<f64>> {
        self.per_spectator(|s| s.c_value(standing))
    }

    /// Seated or standing eye location of every row.
    #[must_use]
    pub fn spectator_points(&self, standing: bool) -> Vec<Vec<Point2>> {
        self.per_spectator(|s| s.eye(standing))
    }

    #[must_use]
    pub fn spectator_points_3d(&self, standing: bool) -> Vec<Vec<Point3>> {
        self.per_spectator(|s| self.plane.point_at_2d(s.eye(standing)))
    }

    /// Seated or standing sightline of every row.
    #[must_use]
    pub fn sightlines(&self, standing: bool) -> Vec<Vec<Vec2>> {
        self.per_spectator(|s| s.sightline(standing))
    }

    fn per_spectator<T>(&self, f: impl Fn(&super::Spectator) -> T) -> Vec<Vec<T>> {
        self.tiers
            .iter()
            .map(|t| t.spectators.iter().map(&f).collect())
            .collect()
    }
}

/// One independent section to build.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionJob {
    pub tiers: Vec<TierConfig>,
    pub plane: Plane,
}

/// Build independent sections, in parallel when the `parallel` feature is enabled.
///
/// Results come back in job order.
#[must_use]
pub fn build_sections(jobs: Vec<SectionJob>) -> Vec<Result<Section, SectionError>> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "parallel")] {
            use rayon::prelude::*;
            jobs.into_par_iter()
                .map(|job| Section::new(job.tiers, job.plane))
                .collect()
        } else {
            jobs.into_iter()
                .map(|job| Section::new(job.tiers, job.plane))
                .collect()
        }
    }
}

//! Stadium bowl section geometry: tiers, spectators and the seating profile.
//!
//! A [`Section`] is an ordered stack of [`Tier`]s drawn in one [`Plane`](crate::geom::Plane)
//! whose origin is the point of focus. Building a section runs the profile
//! generator over every tier in order, chaining each tier onto the end of the
//! previous one where requested.
//!
//! # Example
//!
//! ```
//! use bowl_engine::bowl::{Section, TierConfig};
//! use bowl_engine::geom::Plane;
//!
//! let lower = TierConfig::default().with_rows(10, 0.8);
//! let upper = TierConfig::default().with_rows(8, 0.9).chained();
//! let section = Section::new(vec![lower, upper], Plane::world_yz()).unwrap();
//!
//! let points = section.profile_points();
//! assert_eq!(points[1][0], *points[0].last().unwrap());
//! ```

mod error;
mod profile;
mod section;
mod spectator;
mod tier;

pub use error::SectionError;
pub use section::{Section, SectionJob, build_sections};
pub use spectator::Spectator;
pub use tier::{
    DEFAULT_MAX_RAKE_ANGLE, GUARDRAIL_DROP, SpectatorParameters, SuperRiser, Tier, TierConfig,
};

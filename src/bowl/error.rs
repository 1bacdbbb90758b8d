/// Failure modes of section construction.
///
/// Construction is all-or-nothing: any of these aborts the whole section.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SectionError {
    #[error("a section requires at least one tier")]
    EmptySection,
    #[error("tier {tier}: invalid configuration: {reason}")]
    InvalidConfiguration { tier: usize, reason: String },
    #[error("tier {tier}: generated {actual} profile points, expected {expected}")]
    InternalInconsistency {
        tier: usize,
        expected: usize,
        actual: usize,
    },
    #[error("tier {tier}, row {row}: degenerate geometry: {reason}")]
    DegenerateGeometry {
        tier: usize,
        row: usize,
        reason: &'static str,
    },
}

impl SectionError {
    pub(crate) fn invalid(tier: usize, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            tier,
            reason: reason.into(),
        }
    }
}

use crate::clock::Timestamp;

use super::template::{PatternTemplate, ALL_TEMPLATES};

/// One template a company has had verified against it at least once.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedPattern {
    pub template: PatternTemplate,
    pub usage_count: u32,
    pub last_verified: Timestamp,
}

/// Orders candidate templates for a company: learned templates first (by
/// usage count descending, ties broken by most-recently-verified first),
/// then — if fewer than 5 candidates so far — every remaining template in
/// declared order, skipping anything already present.
pub fn rank(verified: &[VerifiedPattern]) -> Vec<PatternTemplate> {
    let mut learned: Vec<VerifiedPattern> = verified.to_vec();
    learned.sort_by(|a, b| {
        b.usage_count
            .cmp(&a.usage_count)
            .then_with(|| b.last_verified.cmp(&a.last_verified))
    });

    let mut out: Vec<PatternTemplate> = learned.into_iter().map(|p| p.template).collect();

    if out.len() < 5 {
        for template in ALL_TEMPLATES {
            if !out.contains(&template) {
                out.push(template);
            }
        }
    }

    out
}

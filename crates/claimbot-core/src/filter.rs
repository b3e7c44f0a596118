//! Deterministic bounty selection
//!
//! Pure functions only: the same listing and criteria always select the same
//! bounties, in listing order.

use crate::types::Bounty;

/// Operator-supplied selection criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Lower-cased tags; empty means no tag restriction
    pub tags: Vec<String>,
    /// Minimum reward in USDC, inclusive
    pub min_reward: f64,
}

impl FilterCriteria {
    /// Build criteria from a comma-separated tag list and a minimum reward
    pub fn new(tags: &str, min_reward: f64) -> Self {
        Self {
            tags: parse_tags(tags),
            min_reward,
        }
    }

    /// Whether a single bounty satisfies every predicate
    pub fn matches(&self, bounty: &Bounty) -> bool {
        if !bounty.is_open() {
            return false;
        }

        if bounty.reward_usdc() < self.min_reward {
            return false;
        }

        if self.tags.is_empty() {
            return true;
        }

        bounty
            .tags
            .iter()
            .any(|tag| self.tags.contains(&tag.to_lowercase()))
    }

    /// Human-readable tag list for log lines
    pub fn tags_display(&self) -> String {
        if self.tags.is_empty() {
            "any".to_string()
        } else {
            self.tags.join(", ")
        }
    }
}

/// Split a comma-separated tag list: trimmed, lower-cased, empties dropped
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Select the bounties matching `criteria`, preserving input order
pub fn filter_bounties<'a>(bounties: &'a [Bounty], criteria: &FilterCriteria) -> Vec<&'a Bounty> {
    bounties.iter().filter(|b| criteria.matches(b)).collect()
}

//! Achievement Scanner & Distributor.
//!
//! Two phases, deliberately separated:
//! - **scan** is pure and side-effect free: it evaluates rule predicates
//!   against the current state and returns the pending awards. Already-held
//!   badges are excluded, which makes the scan idempotent.
//! - **distribute** applies a batch of awards. All awards destined for one
//!   agency are applied to a single clone of that agency, then committed in
//!   one write per agency through the aggregate store's atomic batch. This
//!   is the only engine path that talks to the store: writing one award at
//!   a time against independently re-fetched state would lose earlier
//!   awards of the same batch to a last-write-wins race.
//!
//! A manual award path exists for instructor overrides, including an
//! explicit over-cap flag for the student score.

mod distribute;
mod rules;

pub use distribute::{award_badge_manual, distribute, AwardError, DistributionError, ManualTarget};
pub use rules::{builtin_rules, AchievementCondition, AchievementRule};

use serde::{Deserialize, Serialize};

use crate::models::agency::Agency;

/// What kind of aggregate an award targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardTarget {
    Agency,
    Student,
}

/// A detected, not-yet-applied badge award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAward {
    /// Agency id or student id, per `target_type`
    pub target_id: String,
    pub target_type: AwardTarget,
    pub badge: crate::models::badge::Badge,
    /// Why the rule fired, for the audit event
    pub reason: String,
}

/// Evaluate all rules against all agencies (pool excluded).
///
/// Pure detection pass: no state is touched. Targets that already hold the
/// badge are excluded, so running the scan twice without an intervening
/// mutation yields the same list, and running it after distribution yields
/// none of the distributed awards again.
pub fn scan(agencies: &[Agency], rules: &[AchievementRule]) -> Vec<PendingAward> {
    let mut pending = Vec::new();

    for agency in agencies.iter().filter(|a| !a.is_unemployment_pool()) {
        for rule in rules {
            rule.detect(agency, &mut pending);
        }
    }

    pending
}

//! Batched award application and the manual award path.
//!
//! Distribution groups a scan's pending awards by the agency owning each
//! target, applies all of an agency's awards to one clone, and commits one
//! write per agency via the store's atomic batch. See the module docs in
//! [`crate::achievements`] for why per-award writes are not acceptable.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::cycle::Timestamp;
use crate::models::agency::Agency;
use crate::models::badge::Badge;
use crate::models::event::EventKind;
use crate::store::{AgencyStore, StoreError};

use super::{AwardTarget, PendingAward};

/// Errors from the manual award path
#[derive(Debug, Error, PartialEq)]
pub enum AwardError {
    #[error("target {target_id} already holds badge {badge_id}")]
    AlreadyHeld { target_id: String, badge_id: String },

    #[error("student {student_id} is not a member of agency {agency_id}")]
    StudentNotFound {
        student_id: String,
        agency_id: String,
    },
}

/// Errors from batched distribution
#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    #[error("award target {target_id} not found in the supplied agencies")]
    TargetNotFound { target_id: String },

    #[error("store rejected the batch: {0}")]
    Store(#[from] StoreError),
}

/// Target of a manual award within one agency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualTarget {
    /// The agency itself
    Agency,
    /// A member of the agency, by student id
    Student(String),
}

/// Apply a batch of pending awards and commit one write per agency.
///
/// Student ownership is resolved via membership lookup across the supplied
/// agencies. Every award for a given agency lands on a single clone of that
/// agency, so no award in the batch can overwrite another. The store's
/// `batch_commit` is atomic: on rejection, nothing is persisted and the
/// supplied snapshots are untouched.
///
/// Awards whose target already holds the badge are skipped silently (the
/// scan normally excludes them; skipping keeps re-distribution idempotent).
/// An unknown target id fails the whole batch before any store contact.
///
/// Returns the updated agencies that were committed, in first-award order.
pub fn distribute<S: AgencyStore>(
    store: &mut S,
    agencies: &[Agency],
    awards: &[PendingAward],
    now: Timestamp,
) -> Result<Vec<Agency>, DistributionError> {
    // One clone per affected agency, keyed by agency id.
    let mut updated: HashMap<String, Agency> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for award in awards {
        let agency_id = owning_agency_id(agencies, award)
            .ok_or_else(|| DistributionError::TargetNotFound {
                target_id: award.target_id.clone(),
            })?;

        if !updated.contains_key(&agency_id) {
            // Safe: owning_agency_id found it in `agencies`.
            let agency = agencies
                .iter()
                .find(|a| a.id == agency_id)
                .cloned()
                .ok_or_else(|| DistributionError::TargetNotFound {
                    target_id: award.target_id.clone(),
                })?;
            updated.insert(agency_id.clone(), agency);
            order.push(agency_id.clone());
        }

        // Clone is present by construction of the map above.
        if let Some(agency) = updated.get_mut(&agency_id) {
            apply_award(agency, award, now);
        }
    }

    let committed: Vec<Agency> = order
        .iter()
        .filter_map(|id| updated.get(id).cloned())
        .collect();

    store.batch_commit(committed.clone())?;
    Ok(committed)
}

/// Resolve which agency owns the award's target.
fn owning_agency_id(agencies: &[Agency], award: &PendingAward) -> Option<String> {
    match award.target_type {
        AwardTarget::Agency => agencies
            .iter()
            .find(|a| a.id == award.target_id)
            .map(|a| a.id.clone()),
        AwardTarget::Student => agencies
            .iter()
            .find(|a| a.member(&award.target_id).is_some())
            .map(|a| a.id.clone()),
    }
}

/// Apply one award to the (already cloned) owning agency.
///
/// Badge append is id-unique; a duplicate makes the award a no-op. Rewards:
/// score clamped to [0,100] after addition, VE floored at 0, wallet/budget/
/// karma unclamped. One REWARD audit event per applied award, carrying the
/// applied agency-level deltas.
fn apply_award(agency: &mut Agency, award: &PendingAward, now: Timestamp) {
    let badge = award.badge.unlocked(now);
    let rewards = badge.rewards;

    let added = match award.target_type {
        AwardTarget::Agency => agency.add_badge(badge.clone()),
        AwardTarget::Student => match agency.members.iter_mut().find(|m| m.id == award.target_id)
        {
            Some(member) => {
                let added = member.add_badge(badge.clone());
                if added {
                    if let Some(score) = rewards.score {
                        member.adjust_score(score);
                    }
                    if let Some(wallet) = rewards.wallet {
                        member.adjust_wallet(wallet);
                    }
                    if let Some(karma) = rewards.karma {
                        member.adjust_karma(karma);
                    }
                }
                added
            }
            None => false,
        },
    };

    if !added {
        return;
    }

    let applied_ve = match rewards.ve {
        Some(ve) => agency.apply_ve_delta(ve),
        None => 0,
    };
    let budget = rewards.budget.unwrap_or(0);
    agency.apply_budget_delta(budget);

    agency.append_event(
        now,
        EventKind::Reward,
        &badge.label,
        &format!("Badge {} awarded: {}", badge.id, award.reason),
        applied_ve,
        budget,
    );
}

/// Manually award a badge to a single target inside one agency.
///
/// Instructor escape hatch: `allow_over_cap` lets a score reward push the
/// student past 100 (the soft cap every other path enforces). Duplicate
/// badge ids are rejected before any mutation.
///
/// Returns the updated agency; the caller persists it.
pub fn award_badge_manual(
    agency: &Agency,
    target: &ManualTarget,
    badge: &Badge,
    allow_over_cap: bool,
    now: Timestamp,
) -> Result<Agency, AwardError> {
    // Duplicate guard before mutation
    match target {
        ManualTarget::Agency => {
            if agency.has_badge(&badge.id) {
                return Err(AwardError::AlreadyHeld {
                    target_id: agency.id.clone(),
                    badge_id: badge.id.clone(),
                });
            }
        }
        ManualTarget::Student(student_id) => {
            let member =
                agency
                    .member(student_id)
                    .ok_or_else(|| AwardError::StudentNotFound {
                        student_id: student_id.clone(),
                        agency_id: agency.id.clone(),
                    })?;
            if member.has_badge(&badge.id) {
                return Err(AwardError::AlreadyHeld {
                    target_id: student_id.clone(),
                    badge_id: badge.id.clone(),
                });
            }
        }
    }

    let mut updated = agency.clone();
    let stamped = badge.unlocked(now);
    let rewards = stamped.rewards;

    match target {
        ManualTarget::Agency => {
            updated.add_badge(stamped.clone());
        }
        ManualTarget::Student(student_id) => {
            if let Some(member) = updated.members.iter_mut().find(|m| &m.id == student_id) {
                member.add_badge(stamped.clone());
                if let Some(score) = rewards.score {
                    if allow_over_cap {
                        member.adjust_score_uncapped(score);
                    } else {
                        member.adjust_score(score);
                    }
                }
                if let Some(wallet) = rewards.wallet {
                    member.adjust_wallet(wallet);
                }
                if let Some(karma) = rewards.karma {
                    member.adjust_karma(karma);
                }
            }
        }
    }

    let applied_ve = match rewards.ve {
        Some(ve) => updated.apply_ve_delta(ve),
        None => 0,
    };
    let budget = rewards.budget.unwrap_or(0);
    updated.apply_budget_delta(budget);

    updated.append_event(
        now,
        EventKind::Reward,
        &stamped.label,
        &format!("Badge {} awarded manually", stamped.id),
        applied_ve,
        budget,
    );

    Ok(updated)
}

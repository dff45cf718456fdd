//! Achievement rules: condition predicates paired with the badge they award.
//!
//! Rules are data, not code: the instructor catalog is a list of
//! `AchievementRule` values the scan evaluates. Conditions are fixed
//! predicates over the agency aggregate.

use serde::{Deserialize, Serialize};

use crate::models::agency::Agency;
use crate::models::badge::{Badge, BadgeRewards};

use super::{AwardTarget, PendingAward};

/// Predicate deciding whether (and to whom) a rule's badge is awarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AchievementCondition {
    /// Agency reputation reached the threshold: badge to the agency
    AgencyVeAtLeast(i64),
    /// Agency budget reached the threshold: badge to every member lacking it
    AgencyBudgetAtLeast(i64),
    /// A member's score reached the threshold: badge to that member
    MemberScoreAtLeast(i64),
}

/// A condition paired with the badge it awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRule {
    pub badge: Badge,
    pub condition: AchievementCondition,
}

impl AchievementRule {
    /// Append this rule's pending awards for one agency.
    ///
    /// Targets already holding the badge are skipped (idempotence).
    pub(super) fn detect(&self, agency: &Agency, pending: &mut Vec<PendingAward>) {
        match self.condition {
            AchievementCondition::AgencyVeAtLeast(threshold) => {
                if agency.ve_current >= threshold && !agency.has_badge(&self.badge.id) {
                    pending.push(PendingAward {
                        target_id: agency.id.clone(),
                        target_type: AwardTarget::Agency,
                        badge: self.badge.clone(),
                        reason: format!("VE reached {}", threshold),
                    });
                }
            }
            AchievementCondition::AgencyBudgetAtLeast(threshold) => {
                if agency.budget_real >= threshold {
                    for member in agency.members.iter().filter(|m| !m.has_badge(&self.badge.id)) {
                        pending.push(PendingAward {
                            target_id: member.id.clone(),
                            target_type: AwardTarget::Student,
                            badge: self.badge.clone(),
                            reason: format!("Agency budget reached {}", threshold),
                        });
                    }
                }
            }
            AchievementCondition::MemberScoreAtLeast(threshold) => {
                for member in agency
                    .members
                    .iter()
                    .filter(|m| m.individual_score >= threshold && !m.has_badge(&self.badge.id))
                {
                    pending.push(PendingAward {
                        target_id: member.id.clone(),
                        target_type: AwardTarget::Student,
                        badge: self.badge.clone(),
                        reason: format!("Score reached {}", threshold),
                    });
                }
            }
        }
    }
}

/// The built-in instructor catalog.
pub fn builtin_rules() -> Vec<AchievementRule> {
    vec![
        AchievementRule {
            badge: Badge::new(
                "agence-prestige",
                "Agence de Prestige",
                "🏛️",
                "Agency reputation reached 100",
                BadgeRewards {
                    budget: Some(2_000),
                    ..BadgeRewards::none()
                },
            ),
            condition: AchievementCondition::AgencyVeAtLeast(100),
        },
        AchievementRule {
            badge: Badge::new(
                "fortune-faite",
                "Fortune Faite",
                "💰",
                "Member of an agency holding 20,000 PiXi",
                BadgeRewards {
                    wallet: Some(250),
                    karma: Some(5),
                    ..BadgeRewards::none()
                },
            ),
            condition: AchievementCondition::AgencyBudgetAtLeast(20_000),
        },
        AchievementRule {
            badge: Badge::new(
                "score-parfait",
                "Score Parfait",
                "🎯",
                "Individual score reached 100",
                BadgeRewards {
                    score: Some(5),
                    wallet: Some(500),
                    ..BadgeRewards::none()
                },
            ),
            condition: AchievementCondition::MemberScoreAtLeast(100),
        },
    ]
}

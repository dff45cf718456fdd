//! Achievement badges.
//!
//! A badge couples a display identity (label, icon, description) with an
//! optional reward payload. Rewards are validated once at badge-definition
//! time: each axis is an explicit `Option<i64>`, absence meaning "no effect
//! on that axis". Badge sets (on students and agencies) are unique by id.

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;

/// Reward payload attached to a badge.
///
/// Each field is independently optional. Application rules live in the
/// achievements engine: `score` is clamped to [0,100] after addition,
/// `ve` is floored at 0, `wallet`/`budget`/`karma` are unclamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRewards {
    /// Individual score bonus for a student target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    /// Wallet bonus in PiXi for a student target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<i64>,

    /// VE bonus for the owning agency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ve: Option<i64>,

    /// Budget bonus in PiXi for the owning agency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,

    /// Hidden karma adjustment for a student target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma: Option<i64>,
}

impl BadgeRewards {
    /// Rewards with no effect on any axis
    pub fn none() -> Self {
        Self::default()
    }

    /// True if no axis is affected
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.wallet.is_none()
            && self.ve.is_none()
            && self.budget.is_none()
            && self.karma.is_none()
    }
}

/// An achievement badge.
///
/// # Example
/// ```
/// use agency_sim_core_rs::{Badge, BadgeRewards};
///
/// let badge = Badge::new(
///     "first-centurion",
///     "Centurion",
///     "🏆",
///     "Reached a score of 100",
///     BadgeRewards { wallet: Some(500), ..BadgeRewards::none() },
/// );
/// assert_eq!(badge.id, "first-centurion");
/// assert!(badge.unlocked_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable identifier, unique within any badge set
    pub id: String,

    /// Display name
    pub label: String,

    /// Display icon (emoji or asset key)
    pub icon: String,

    /// Display description
    pub description: String,

    /// Reward payload applied at award time
    pub rewards: BadgeRewards,

    /// Stamped when the badge is awarded; None on the catalog definition
    pub unlocked_at: Option<Timestamp>,
}

impl Badge {
    /// Create a badge definition (not yet unlocked)
    pub fn new(
        id: &str,
        label: &str,
        icon: &str,
        description: &str,
        rewards: BadgeRewards,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            rewards,
            unlocked_at: None,
        }
    }

    /// Copy of this badge stamped with its award date
    pub fn unlocked(&self, date: Timestamp) -> Self {
        let mut badge = self.clone();
        badge.unlocked_at = Some(date);
        badge
    }
}

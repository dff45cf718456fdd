//! Student model and career history.
//!
//! A student belongs to exactly one agency (or the unemployment pool) at any
//! time; only the mercato engine moves them. The individual score is always
//! clamped to [0,100] (the manual award path's explicit over-cap flag is the
//! sole sanctioned exception). The wallet is signed: negative means loan debt.

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;
use crate::models::badge::Badge;

/// Default hidden karma baseline for a fresh student record
pub const KARMA_BASELINE: i64 = 50;

/// What happened to the student at an agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    /// Joined the agency (hire, transfer-in, founding)
    Joined,
    /// Left voluntarily or via transfer-out
    Left,
    /// Dismissed by the agency
    Fired,
}

/// One entry of a student's career history.
///
/// Entries carry a snapshot of the agency's VE and budget at the moment of
/// the move, so the timeline reads like a career ledger even after the
/// agency's numbers change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentHistoryEntry {
    pub date: Timestamp,
    pub agency_id: String,
    pub agency_name: String,
    pub action: HistoryAction,
    /// Agency VE at the moment of the move
    pub context_ve: i64,
    /// Agency budget at the moment of the move (PiXi)
    pub context_budget: i64,
    pub reason: String,
}

/// A student (agency member).
///
/// # Example
/// ```
/// use agency_sim_core_rs::{ClassId, Student};
///
/// let student = Student::new("stu_01", "Ada", ClassId::A, 62);
/// assert_eq!(student.individual_score, 62);
/// assert_eq!(student.wallet, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_id: crate::models::agency::ClassId,

    /// Visible performance score, clamped to [0,100]
    pub individual_score: i64,

    /// Personal currency in PiXi; negative = loan debt
    pub wallet: i64,

    /// Hidden behavioral score, distinct from the visible score
    pub karma: i64,

    /// Badges held, unique by id
    pub badges: Vec<Badge>,

    /// Career history, ordered by append
    pub history: Vec<StudentHistoryEntry>,
}

impl Student {
    /// Create a student with an empty history and the karma baseline
    pub fn new(id: &str, name: &str, class_id: crate::models::agency::ClassId, score: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class_id,
            individual_score: score.clamp(0, 100),
            wallet: 0,
            karma: KARMA_BASELINE,
            badges: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Check whether the student already holds a badge id
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }

    /// Add a badge if the id is not already held.
    ///
    /// Returns true if the badge was added.
    pub fn add_badge(&mut self, badge: Badge) -> bool {
        if self.has_badge(&badge.id) {
            return false;
        }
        self.badges.push(badge);
        true
    }

    /// Adjust the individual score, clamped to [0,100].
    ///
    /// Returns the applied delta (may differ from the requested one when
    /// the clamp intervenes).
    ///
    /// # Example
    /// ```
    /// use agency_sim_core_rs::{ClassId, Student};
    ///
    /// let mut student = Student::new("stu_01", "Ada", ClassId::A, 95);
    /// let applied = student.adjust_score(10);
    /// assert_eq!(applied, 5);
    /// assert_eq!(student.individual_score, 100);
    /// ```
    pub fn adjust_score(&mut self, delta: i64) -> i64 {
        let before = self.individual_score;
        self.individual_score = (before + delta).clamp(0, 100);
        self.individual_score - before
    }

    /// Adjust the score without the upper clamp (manual over-cap awards).
    ///
    /// The lower bound of 0 still applies. Returns the applied delta.
    pub fn adjust_score_uncapped(&mut self, delta: i64) -> i64 {
        let before = self.individual_score;
        self.individual_score = (before + delta).max(0);
        self.individual_score - before
    }

    /// Adjust the wallet (unclamped; may go into debt)
    pub fn adjust_wallet(&mut self, delta: i64) {
        self.wallet += delta;
    }

    /// Adjust hidden karma (unclamped)
    pub fn adjust_karma(&mut self, delta: i64) {
        self.karma += delta;
    }

    /// Append a career history entry
    pub fn push_history(&mut self, entry: StudentHistoryEntry) {
        self.history.push(entry);
    }
}

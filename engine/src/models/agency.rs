//! Agency aggregate root.
//!
//! An agency owns its members, its append-only event log, its badge set and
//! its pending mercato requests. Engines clone an agency, mutate the clone
//! through the methods below and return it; callers persist the returned
//! snapshot. This keeps every rule family operating on the same aggregate
//! shape without aliasing a shared document.
//!
//! # Critical Invariants
//!
//! 1. `ve_current >= 0` always (no ceiling unless `ve_cap_override` is set,
//!    and the engine never silently clamps to that override — it is a
//!    display cap only)
//! 2. `badges` contains no duplicate id
//! 3. Every VE/budget change goes through a method that appends a GameEvent
//!    carrying the applied deltas
//! 4. `event_seq` is monotonic; event ids sort with insertion order

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::cycle::Timestamp;
use crate::models::badge::Badge;
use crate::models::event::{EventKind, GameEvent};
use crate::models::request::WorkforceRequest;
use crate::models::student::Student;

/// Reserved agency id for the unemployment pool.
///
/// The pool holds students not currently assigned to a team. No reputation
/// or budget semantics apply to it: it is excluded from financial impacts,
/// achievement scans, automatic VE effects and weekly settlement.
pub const UNEMPLOYMENT_POOL_ID: &str = "pole-emploi";

/// Errors that can occur during agency-level operations
#[derive(Debug, Error, PartialEq)]
pub enum AgencyError {
    #[error("student {student_id} is not a member of agency {agency_id}")]
    StudentNotFound {
        student_id: String,
        agency_id: String,
    },

    #[error("badge {badge_id} is already held by {holder_id}")]
    DuplicateBadge { badge_id: String, holder_id: String },
}

/// Classroom section an agency (and its students) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassId {
    A,
    B,
}

/// A student team running a fictional business.
///
/// # Example
/// ```
/// use agency_sim_core_rs::{Agency, ClassId};
///
/// let agency = Agency::new("ag_01", "Pixel Forge", ClassId::A, 40, 5_000);
/// assert_eq!(agency.ve_current, 40);
/// assert_eq!(agency.budget_real, 5_000);
/// assert!(!agency.is_unemployment_pool());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub class_id: ClassId,

    /// Reputation score. Floor 0; no inherent ceiling.
    pub ve_current: i64,

    /// Optional per-agency display cap. The engine records it but never
    /// clamps VE against it.
    pub ve_cap_override: Option<i64>,

    /// Currency balance in PiXi; negative = debt
    pub budget_real: i64,

    /// Percentage tax accumulated from percentage-based budget penalties,
    /// settled (and reset) by the weekly cycle
    pub weekly_tax: f64,

    /// Percentage modifier applied to the weekly base revenue
    pub weekly_revenue_modifier: f64,

    /// Display status (e.g. "critique" for a freshly founded agency)
    pub status: String,

    /// Members, ordered
    pub members: Vec<Student>,

    /// Append-only audit trail
    pub event_log: Vec<GameEvent>,

    /// Badges held, unique by id
    pub badges: Vec<Badge>,

    /// Pending workforce requests
    pub mercato_requests: Vec<WorkforceRequest>,

    /// Monotonic counter feeding event ids
    pub event_seq: u64,
}

impl Agency {
    /// Create an agency with empty members, log and badge set
    pub fn new(id: &str, name: &str, class_id: ClassId, ve: i64, budget: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class_id,
            ve_current: ve.max(0),
            ve_cap_override: None,
            budget_real: budget,
            weekly_tax: 0.0,
            weekly_revenue_modifier: 0.0,
            status: "active".to_string(),
            members: Vec::new(),
            event_log: Vec::new(),
            badges: Vec::new(),
            mercato_requests: Vec::new(),
            event_seq: 0,
        }
    }

    /// Create the reserved unemployment pool aggregate
    pub fn unemployment_pool(class_id: ClassId) -> Self {
        let mut pool = Self::new(UNEMPLOYMENT_POOL_ID, "Pôle Emploi", class_id, 0, 0);
        pool.status = "pool".to_string();
        pool
    }

    /// True for the reserved unemployment pool aggregate
    pub fn is_unemployment_pool(&self) -> bool {
        self.id == UNEMPLOYMENT_POOL_ID
    }

    // =========================================================================
    // Event log
    // =========================================================================

    /// Append a GameEvent, assigning its id from the monotonic sequence.
    ///
    /// This is the single construction point for events: engines never
    /// build a `GameEvent` id themselves. Deltas passed here must be the
    /// **applied** values, post-clamp.
    pub fn append_event(
        &mut self,
        date: Timestamp,
        kind: EventKind,
        label: &str,
        description: &str,
        delta_ve: i64,
        delta_budget: i64,
    ) {
        self.event_seq += 1;
        self.event_log.push(GameEvent {
            id: GameEvent::format_id(self.event_seq),
            date,
            kind,
            label: label.to_string(),
            description: description.to_string(),
            delta_ve,
            delta_budget,
        });
    }

    // =========================================================================
    // Numeric state
    // =========================================================================

    /// Apply a VE delta, floored at 0.
    ///
    /// Returns the applied delta (differs from `delta` when the floor
    /// intervenes). Does NOT append an event; callers pair this with
    /// [`Agency::append_event`] so the event carries the applied value.
    ///
    /// # Example
    /// ```
    /// use agency_sim_core_rs::{Agency, ClassId};
    ///
    /// let mut agency = Agency::new("ag_01", "Pixel Forge", ClassId::A, 12, 0);
    /// assert_eq!(agency.apply_ve_delta(-20), -12);
    /// assert_eq!(agency.ve_current, 0);
    /// ```
    pub fn apply_ve_delta(&mut self, delta: i64) -> i64 {
        let before = self.ve_current;
        self.ve_current = (before + delta).max(0);
        self.ve_current - before
    }

    /// Apply a budget delta (unclamped; may go into debt)
    pub fn apply_budget_delta(&mut self, delta: i64) {
        self.budget_real += delta;
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Find a member by id
    pub fn member(&self, student_id: &str) -> Option<&Student> {
        self.members.iter().find(|s| s.id == student_id)
    }

    /// Remove and return a member by id
    pub fn take_member(&mut self, student_id: &str) -> Result<Student, AgencyError> {
        match self.members.iter().position(|s| s.id == student_id) {
            Some(pos) => Ok(self.members.remove(pos)),
            None => Err(AgencyError::StudentNotFound {
                student_id: student_id.to_string(),
                agency_id: self.id.clone(),
            }),
        }
    }

    /// Append a member (ordered list, no uniqueness enforcement here:
    /// the mercato engine guarantees a student is listed exactly once)
    pub fn push_member(&mut self, student: Student) {
        self.members.push(student);
    }

    // =========================================================================
    // Badges
    // =========================================================================

    /// Check whether the agency already holds a badge id
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
}

//! Game event audit trail.
//!
//! Every mutation of an agency's VE or budget appends one or more immutable
//! GameEvent entries to that agency's ordered event log. Events enable:
//! - Auditing (verify each applied delta against the trail)
//! - Display (chronological feed on the instructor console)
//! - Debugging (understand what happened and when)
//!
//! # Critical Invariants
//!
//! 1. Entries are never edited or removed once appended
//! 2. `delta_ve` / `delta_budget` record the **applied** change, not the
//!    requested one (clamping may have altered it)
//! 3. Event ids sort consistently with insertion order
//!
//! Events are constructed through [`crate::Agency::append_event`], which
//! assigns the id from the agency's monotonic sequence counter.

use serde::{Deserialize, Serialize};

use crate::core::cycle::Timestamp;

/// Category of a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Negative instructor-injected impact or reputation loss
    Crisis,
    /// Badge or instructor reward
    Reward,
    /// Reputation change outside a crisis (tier effects, positive impacts)
    VeDelta,
    /// Informational entry with no numeric effect (founding, notes)
    Info,
    /// Weekly salary payout to members
    Payroll,
    /// Weekly revenue settlement
    Revenue,
}

/// One immutable entry in an agency's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Per-agency identifier, `evt_{seq:08}`. Zero-padding makes the
    /// lexicographic order equal the insertion order.
    pub id: String,

    /// When the event was applied (Unix seconds)
    pub date: Timestamp,

    /// Event category
    pub kind: EventKind,

    /// Short display label (e.g. "Restructuration")
    pub label: String,

    /// Free-text description shown on the event feed
    pub description: String,

    /// Applied VE change (post-floor), 0 if none
    pub delta_ve: i64,

    /// Applied budget change in PiXi, 0 if none
    pub delta_budget: i64,
}

impl GameEvent {
    /// Format an event id from a sequence number.
    ///
    /// # Example
    /// ```
    /// use agency_sim_core_rs::GameEvent;
    ///
    /// assert_eq!(GameEvent::format_id(42), "evt_00000042");
    /// ```
    pub fn format_id(seq: u64) -> String {
        format!("evt_{:08}", seq)
    }

    /// True if the event carries no numeric effect
    pub fn is_informational(&self) -> bool {
        self.delta_ve == 0 && self.delta_budget == 0
    }
}

/// Sort events chronologically for display.
///
/// Primary key is the date; ties within the same second fall back to the
/// sequence-derived id, which preserves insertion order.
pub fn sort_chronological(events: &mut [GameEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}

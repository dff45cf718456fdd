//! Workforce Transfer Engine ("mercato").
//!
//! Moves a student between agencies (or to/from the unemployment pool),
//! writing bidirectional career history and applying score-tiered reputation
//! effects. Two entry paths share the same core:
//! - the request lifecycle (PENDING → APPROVED/REJECTED), and
//! - a direct force-transfer path that bypasses the queue.
//!
//! Founding a new agency is a distinct path in [`founding`].
//!
//! # Critical Invariants
//!
//! - A transfer is atomic with respect to membership: after
//!   [`execute_transfer`] the student is listed exactly once, on the target.
//!   Any validation failure aborts before mutation.
//! - History entries are written LEFT/FIRED on source then JOINED on target
//!   (pool sides skipped), same timestamp, each carrying the agency's
//!   pre-effect VE/budget snapshot.
//! - Reputation events record the applied (post-floor) delta.
//! - The unemployment pool never receives a VE effect or event: no
//!   reputation semantics apply to it.

pub mod founding;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::cycle::Timestamp;
use crate::models::agency::Agency;
use crate::models::event::EventKind;
use crate::models::request::{RequestKind, RequestStatus, WorkforceRequest};
use crate::models::student::{HistoryAction, StudentHistoryEntry};

pub use founding::{found_agency, Financing, FoundingOutcome};

/// Errors that can occur during workforce operations
#[derive(Debug, Error, PartialEq)]
pub enum MercatoError {
    #[error("student {student_id} is not a member of agency {agency_id}")]
    StudentNotFound {
        student_id: String,
        agency_id: String,
    },

    #[error("student class {student_class:?} does not match agency {agency_id} class {agency_class:?}")]
    ClassMismatch {
        student_class: crate::models::agency::ClassId,
        agency_id: String,
        agency_class: crate::models::agency::ClassId,
    },

    #[error("source and target agency are both {agency_id}")]
    SameAgency { agency_id: String },

    #[error("request {request_id} is not pending")]
    RequestNotPending { request_id: String },

    #[error("request {request_id} not found on agency {agency_id}")]
    RequestNotFound {
        request_id: String,
        agency_id: String,
    },

    #[error("request {request_id} targets agency {expected}, not {actual}")]
    TargetMismatch {
        request_id: String,
        expected: String,
        actual: String,
    },

    #[error("request {request_id} has a kind the approval path does not handle")]
    UnsupportedRequestKind { request_id: String },

    #[error("founder {student_id} must come from the unemployment pool")]
    FounderNotInPool { student_id: String },
}

/// Kind of workforce movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferKind {
    /// Target integrates an external student: fixed -5 VE on target
    Hire,
    /// Source dismisses the student: tiered VE effect on source
    Fire,
    /// Neutral move, no automatic VE effect
    Transfer,
}

/// Updated snapshots produced by a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub source: Agency,
    pub target: Agency,
}

/// VE the target pays for integrating an external hire, regardless of the
/// hired student's score
pub const HIRE_VE_PENALTY: i64 = -5;

/// Fixed costs and seeds for workforce operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MercatoConfig {
    /// PiXi deducted from a founder's wallet (floored at 0)
    pub creation_cost_wallet: i64,
    /// Score deducted from a founder (floored at 0)
    pub creation_cost_score: i64,
    /// Opening budget of a founded agency
    pub starting_budget: i64,
    /// Opening VE of a founded agency
    pub founding_ve: i64,
}

impl Default for MercatoConfig {
    fn default() -> Self {
        Self {
            creation_cost_wallet: 500,
            creation_cost_score: 10,
            starting_budget: 1_000,
            founding_ve: 20,
        }
    }
}

/// Reputation effect on the source agency when firing a student, tiered by
/// the departing student's score.
///
/// Losing a weak performer reads as restructuring (reputation gain);
/// losing a strong one reads as a competence loss (reputation hit).
///
/// # Example
/// ```
/// use agency_sim_core_rs::mercato::firing_ve_delta;
///
/// assert_eq!(firing_ve_delta(29), 10);
/// assert_eq!(firing_ve_delta(30), 5);
/// assert_eq!(firing_ve_delta(50), -5);
/// assert_eq!(firing_ve_delta(90), -25);
/// ```
pub fn firing_ve_delta(score: i64) -> i64 {
    match score {
        s if s < 30 => 10,
        s if s < 50 => 5,
        s if s < 70 => -5,
        s if s < 90 => -15,
        _ => -25,
    }
}

/// Move a student from `source` to `target`.
///
/// Returns updated clones of both agencies; the inputs are untouched, so a
/// validation error leaves the caller's snapshot exactly as it was.
///
/// Steps:
/// 1. Validate: distinct agencies, student present in source, class
///    compatibility (waived when the target is the unemployment pool).
/// 2. Write history: LEFT (or FIRED) on source, JOINED on target — pool
///    sides skipped — same timestamp, pre-effect VE/budget snapshots.
/// 3. Move the student.
/// 4. Apply the reputation effect for the kind and append its audit event
///    (skipped when the affected side is the unemployment pool).
pub fn execute_transfer(
    source: &Agency,
    target: &Agency,
    student_id: &str,
    kind: TransferKind,
    reason: &str,
    now: Timestamp,
) -> Result<TransferOutcome, MercatoError> {
    if source.id == target.id {
        return Err(MercatoError::SameAgency {
            agency_id: source.id.clone(),
        });
    }

    let student = source
        .member(student_id)
        .ok_or_else(|| MercatoError::StudentNotFound {
            student_id: student_id.to_string(),
            agency_id: source.id.clone(),
        })?;

    // Class rule: no constraint when parking a student in the pool.
    if !target.is_unemployment_pool() && student.class_id != target.class_id {
        return Err(MercatoError::ClassMismatch {
            student_class: student.class_id,
            agency_id: target.id.clone(),
            agency_class: target.class_id,
        });
    }

    let mut source = source.clone();
    let mut target = target.clone();

    // take_member cannot fail here: membership was checked above.
    let mut student = source
        .take_member(student_id)
        .map_err(|_| MercatoError::StudentNotFound {
            student_id: student_id.to_string(),
            agency_id: source.id.clone(),
        })?;

    // History first, on the pre-effect numbers, LEFT/FIRED then JOINED.
    if !source.is_unemployment_pool() {
        let action = match kind {
            TransferKind::Fire => HistoryAction::Fired,
            _ => HistoryAction::Left,
        };
        student.push_history(StudentHistoryEntry {
            date: now,
            agency_id: source.id.clone(),
            agency_name: source.name.clone(),
            action,
            context_ve: source.ve_current,
            context_budget: source.budget_real,
            reason: reason.to_string(),
        });
    }
    if !target.is_unemployment_pool() {
        student.push_history(StudentHistoryEntry {
            date: now,
            agency_id: target.id.clone(),
            agency_name: target.name.clone(),
            action: HistoryAction::Joined,
            context_ve: target.ve_current,
            context_budget: target.budget_real,
            reason: reason.to_string(),
        });
    }

    let departing_score = student.individual_score;
    target.push_member(student);

    // No reputation semantics apply to the pool: a pool-side fire or hire
    // moves the student without any VE effect or event.
    match kind {
        TransferKind::Fire if !source.is_unemployment_pool() => {
            let requested = firing_ve_delta(departing_score);
            let applied = source.apply_ve_delta(requested);
            let (label, event_kind) = if requested > 0 {
                ("Restructuration", EventKind::VeDelta)
            } else {
                ("Perte Compétence", EventKind::Crisis)
            };
            let description = format!("Departure of a member scoring {}", departing_score);
            source.append_event(now, event_kind, label, &description, applied, 0);
        }
        TransferKind::Hire if !target.is_unemployment_pool() => {
            let applied = target.apply_ve_delta(HIRE_VE_PENALTY);
            append_hire_event(&mut target, now, applied);
        }
        // Plain transfers are neutral by themselves; callers wanting a dual
        // effect compose an explicit HIRE+FIRE pair.
        _ => {}
    }

    Ok(TransferOutcome { source, target })
}

fn append_hire_event(target: &mut Agency, now: Timestamp, applied: i64) {
    target.append_event(
        now,
        EventKind::VeDelta,
        "Intégration",
        "Onboarding cost of an external hire",
        applied,
        0,
    );
}

// =============================================================================
// Request lifecycle
// =============================================================================

/// Queue a new PENDING workforce request on the agency.
///
/// Pure bookkeeping: nothing moves until the request is approved. The
/// queued request is the last element of the returned agency's
/// `mercato_requests`.
pub fn submit_request(
    agency: &Agency,
    kind: RequestKind,
    student_id: &str,
    target_agency_id: &str,
    motivation: &str,
) -> Agency {
    let mut updated = agency.clone();
    updated.mercato_requests.push(WorkforceRequest::new(
        kind,
        student_id,
        target_agency_id,
        motivation,
    ));
    updated
}

/// Approve a pending request on `source` and execute the movement.
///
/// The supplied `target` snapshot must be the agency the request names;
/// a mismatch aborts before any movement. The approved request stays on
/// the returned source agency with status APPROVED. FOUND_AGENCY requests
/// are not handled here: founding needs the pool, a name and a financing
/// mode, so it goes through [`founding::found_agency`] directly.
pub fn approve_request(
    source: &Agency,
    target: &Agency,
    request_id: &str,
    now: Timestamp,
) -> Result<TransferOutcome, MercatoError> {
    let request = find_pending(source, request_id)?.clone();

    if target.id != request.target_agency_id {
        return Err(MercatoError::TargetMismatch {
            request_id: request_id.to_string(),
            expected: request.target_agency_id.clone(),
            actual: target.id.clone(),
        });
    }

    let kind = match request.kind {
        RequestKind::Hire => TransferKind::Hire,
        RequestKind::Fire => TransferKind::Fire,
        RequestKind::Transfer => TransferKind::Transfer,
        RequestKind::FoundAgency => {
            return Err(MercatoError::UnsupportedRequestKind {
                request_id: request_id.to_string(),
            })
        }
    };

    let mut outcome =
        execute_transfer(source, target, &request.student_id, kind, &request.motivation, now)?;
    set_request_status(&mut outcome.source, request_id, RequestStatus::Approved);
    Ok(outcome)
}

/// Reject a pending request, returning the updated agency.
///
/// Pure bookkeeping: no student moves, no VE effect.
pub fn reject_request(agency: &Agency, request_id: &str) -> Result<Agency, MercatoError> {
    find_pending(agency, request_id)?;
    let mut updated = agency.clone();
    set_request_status(&mut updated, request_id, RequestStatus::Rejected);
    Ok(updated)
}

fn find_pending<'a>(
    agency: &'a Agency,
    request_id: &str,
) -> Result<&'a WorkforceRequest, MercatoError> {
    let request = agency
        .mercato_requests
        .iter()
        .find(|r| r.id == request_id)
        .ok_or_else(|| MercatoError::RequestNotFound {
            request_id: request_id.to_string(),
            agency_id: agency.id.clone(),
        })?;
    if !request.is_pending() {
        return Err(MercatoError::RequestNotPending {
            request_id: request_id.to_string(),
        });
    }
    Ok(request)
}

fn set_request_status(agency: &mut Agency, request_id: &str, status: RequestStatus) {
    if let Some(request) = agency.mercato_requests.iter_mut().find(|r| r.id == request_id) {
        request.status = status;
    }
}

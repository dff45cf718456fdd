//! Workforce (mercato) requests.
//!
//! A request is a student-initiated or instructor-initiated proposal to
//! move a student. Its lifecycle is PENDING → {APPROVED, REJECTED}; only
//! PENDING requests may transition. The mercato engine executes the actual
//! move; approval/rejection here is pure bookkeeping.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of workforce movement requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    Hire,
    Fire,
    Transfer,
    FoundAgency,
}

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A pending workforce movement proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceRequest {
    pub id: String,
    pub kind: RequestKind,
    pub student_id: String,
    pub target_agency_id: String,
    /// Free-text motivation supplied by the requester
    pub motivation: String,
    pub status: RequestStatus,
}

impl WorkforceRequest {
    /// Create a new PENDING request with a fresh uuid
    pub fn new(kind: RequestKind, student_id: &str, target_agency_id: &str, motivation: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            student_id: student_id.to_string(),
            target_agency_id: target_agency_id.to_string(),
            motivation: motivation.to_string(),
            status: RequestStatus::Pending,
        }
    }

    /// True if the request can still transition
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

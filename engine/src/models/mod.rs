//! Domain models for the agency simulation.
//!
//! These are the persisted document shapes the aggregate store holds:
//! - **agency**: the Agency aggregate root (members, event log, badges)
//! - **student**: Student and career history entries
//! - **event**: the append-only GameEvent audit trail
//! - **badge**: achievement badges and their reward payloads
//! - **request**: pending workforce (mercato) requests

pub mod agency;
pub mod badge;
pub mod event;
pub mod request;
pub mod student;

pub use agency::{Agency, AgencyError, ClassId, UNEMPLOYMENT_POOL_ID};
pub use badge::{Badge, BadgeRewards};
pub use event::{EventKind, GameEvent};
pub use request::{RequestKind, RequestStatus, WorkforceRequest};
pub use student::{HistoryAction, Student, StudentHistoryEntry};

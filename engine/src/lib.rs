//! Agency Simulator Core - Rust Engine
//!
//! Rules engine for a classroom business simulation. Student teams
//! ("agencies") accumulate a reputation score (VE) and a currency balance
//! (PiXi); an instructor console injects crises and rewards, moves students
//! between agencies, awards achievement badges, and rotates a time-gated
//! black-market catalog.
//!
//! # Architecture
//!
//! - **core**: time and cycle primitives (explicit parameters, never ambient)
//! - **models**: domain types (Agency, Student, GameEvent, Badge, requests)
//! - **impact**: financial impact engine (crisis/reward deltas)
//! - **mercato**: workforce transfer engine (hire/fire/transfer/found)
//! - **achievements**: badge scanner and batched distributor
//! - **market**: deterministic market rotation scheduler
//! - **weekly**: weekly revenue/payroll settlement
//! - **store**: aggregate store contract and in-memory implementation
//! - **narrative**: untrusted AI-text JSON extraction
//!
//! # Critical Invariants
//!
//! 1. All currency values are i64 (PiXi)
//! 2. Student scores stay in [0,100]; agency VE stays >= 0
//! 3. Every VE/budget change appends a GameEvent carrying the applied deltas
//! 4. Engines are pure: they take snapshots and return new snapshots

// Module declarations
pub mod achievements;
pub mod core;
pub mod impact;
pub mod market;
pub mod mercato;
pub mod models;
pub mod narrative;
pub mod store;
pub mod weekly;

// Re-exports for convenience
pub use crate::core::cycle::{CycleContext, Timestamp};
pub use models::{
    agency::{Agency, AgencyError, ClassId, UNEMPLOYMENT_POOL_ID},
    badge::{Badge, BadgeRewards},
    event::{EventKind, GameEvent},
    request::{RequestKind, RequestStatus, WorkforceRequest},
    student::{HistoryAction, Student, StudentHistoryEntry},
};

pub use achievements::{
    award_badge_manual, builtin_rules, distribute, scan, AchievementCondition, AchievementRule,
    AwardError, AwardTarget, DistributionError, ManualTarget, PendingAward,
};
pub use impact::{apply_financial_impact, ImpactCategory, ImpactRequest, TargetSelector};
pub use market::{
    active_stock, cycle_index, next_rotation_in, rotation_key, MarketItem, ROTATION_WINDOW_SECS,
};
pub use mercato::{
    approve_request, execute_transfer, found_agency, reject_request, submit_request, Financing,
    FoundingOutcome, MercatoConfig, MercatoError, TransferKind, TransferOutcome,
};
pub use narrative::{extract_json, parse_payload, NarrativeError};
pub use store::{AgencyStore, InMemoryStore, StoreError};
pub use weekly::{settle_week, WeeklyTerms};

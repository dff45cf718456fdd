//! Time and cycle primitives.
//!
//! All engine functions take the current time (and, where relevant, the
//! current game week) as explicit parameters. Nothing in this crate reads
//! a global clock: two callers supplying the same inputs always observe
//! the same outputs, which is what makes the market rotation (and replay
//! of the event trail) deterministic across viewers.

use serde::{Deserialize, Serialize};

/// Unix timestamp in whole seconds.
///
/// The engine never interprets timestamps beyond ordering and the market
/// rotation window arithmetic, so a plain i64 is sufficient.
pub type Timestamp = i64;

/// Read-only position in the game calendar, supplied by the caller.
///
/// The original system kept the "current week" in process-wide state read
/// by several engines; here it is an explicit value passed into each call
/// that needs it (weekly settlement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleContext {
    /// Game week number, starting at 1.
    pub week: u32,
}

impl CycleContext {
    /// Create a cycle context for the given week
    pub fn new(week: u32) -> Self {
        Self { week }
    }
}

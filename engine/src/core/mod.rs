//! Core primitives: time and cycle handling.

pub mod cycle;

pub use cycle::{CycleContext, Timestamp};

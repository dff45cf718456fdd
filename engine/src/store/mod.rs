//! Aggregate store contract.
//!
//! The store is a collaborator: engines are pure and hand updated snapshots
//! back to the caller, who persists them. The single exception is badge
//! distribution, which commits its coalesced batch itself (see
//! [`crate::achievements::distribute`]).
//!
//! # Critical Invariants
//!
//! - `batch_commit` is atomic all-or-nothing: a rejected batch leaves every
//!   targeted aggregate unchanged. The engine implements no locking or
//!   optimistic-concurrency retry of its own; a failed batch is surfaced to
//!   the caller, who re-attempts or reports it.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::agency::Agency;

/// Errors that can occur against the aggregate store
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("agency {id} not found")]
    NotFound { id: String },

    #[error("batch rejected: {reason}")]
    BatchRejected { reason: String },
}

/// Contract the persistence collaborator fulfils.
pub trait AgencyStore {
    /// Read a whole agency document
    fn read(&self, id: &str) -> Result<Agency, StoreError>;

    /// Write (insert or replace) a whole agency document
    fn write(&mut self, agency: Agency) -> Result<(), StoreError>;

    /// Atomically write a batch of agency documents: all or nothing
    fn batch_commit(&mut self, agencies: Vec<Agency>) -> Result<(), StoreError>;
}

/// Reference in-memory implementation, used by tests and as the executable
/// description of the contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    agencies: HashMap<String, Agency>,
    /// When set, every batch is rejected (failure injection for tests)
    reject_batches: bool,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with agencies
    pub fn with_agencies(agencies: Vec<Agency>) -> Self {
        Self {
            agencies: agencies.into_iter().map(|a| (a.id.clone(), a)).collect(),
            reject_batches: false,
        }
    }

    /// Make every subsequent `batch_commit` fail, to exercise the
    /// all-or-nothing contract in tests
    pub fn reject_batches(&mut self, reject: bool) {
        self.reject_batches = reject;
    }

    /// Number of stored agencies
    pub fn len(&self) -> usize {
        self.agencies.len()
    }

    /// True if the store holds no agency
    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
    }
}

impl AgencyStore for InMemoryStore {
    fn read(&self, id: &str) -> Result<Agency, StoreError> {
        self.agencies
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn write(&mut self, agency: Agency) -> Result<(), StoreError> {
        self.agencies.insert(agency.id.clone(), agency);
        Ok(())
    }

    fn batch_commit(&mut self, agencies: Vec<Agency>) -> Result<(), StoreError> {
        if self.reject_batches {
            return Err(StoreError::BatchRejected {
                reason: "injected failure".to_string(),
            });
        }

        // Validate the whole batch before touching any document
        for (i, agency) in agencies.iter().enumerate() {
            if agency.id.is_empty() {
                return Err(StoreError::BatchRejected {
                    reason: format!("document {} has an empty id", i),
                });
            }
            if agencies[..i].iter().any(|a| a.id == agency.id) {
                return Err(StoreError::BatchRejected {
                    reason: format!("duplicate document id {}", agency.id),
                });
            }
        }

        for agency in agencies {
            self.agencies.insert(agency.id.clone(), agency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agency::ClassId;

    fn agency(id: &str) -> Agency {
        Agency::new(id, id, ClassId::A, 20, 0)
    }

    #[test]
    fn test_read_missing_agency() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.read("ghost").unwrap_err(),
            StoreError::NotFound {
                id: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_batch_commit_all_or_nothing_on_duplicate() {
        let mut store = InMemoryStore::new();
        let err = store
            .batch_commit(vec![agency("ag_01"), agency("ag_01")])
            .unwrap_err();
        assert!(matches!(err, StoreError::BatchRejected { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_batch_commit_applies_all() {
        let mut store = InMemoryStore::new();
        store
            .batch_commit(vec![agency("ag_01"), agency("ag_02")])
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.read("ag_02").is_ok());
    }
}

//! The persistence seam.
//!
//! The engine hands a full [`Snapshot`] to its store collaborator after every
//! successful mutation, and never waits on it for correctness: a failed save
//! is logged and the operation still succeeds.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingredients::Ingredient;
use crate::recipes::RecipeBook;
use crate::transactions::Transaction;

/// The full observable state: the three independently persisted collections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ingredients: Vec<Ingredient>,
    pub recipes: RecipeBook,
    pub ledger: Vec<Transaction>,
}

/// Store-side failures. Logged by the engine, never surfaced to callers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Where snapshots go.
///
/// `load` is all-or-nothing: a partial or unreadable snapshot yields `None`
/// and the engine starts over from seed data, never a mix of the two.
pub trait SnapshotStore: fmt::Debug + Send + Sync {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

impl<S: SnapshotStore> SnapshotStore for Arc<S> {
    fn load(&self) -> Option<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}

/// In-memory store for tests and ephemeral sessions. Round-trips through
/// JSON so it exercises the same serialization as a file-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        let slot = self.slot.lock().ok()?;
        let blob = slot.as_ref()?;
        serde_json::from_str(blob).ok()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let blob = serde_json::to_string(snapshot)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(blob);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_nothing() {
        assert!(MemoryStore::new().load().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let snapshot = Snapshot {
            ingredients: Vec::new(),
            recipes: RecipeBook::new(),
            ledger: Vec::new(),
        };

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }
}

//! File-backed snapshot store: three independent JSON blobs in one data
//! directory, one per collection.

use std::fs;
use std::path::{Path, PathBuf};

use engine::{Snapshot, SnapshotStore, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;

const INGREDIENTS_FILE: &str = "ingredients.json";
const RECIPES_FILE: &str = "recipes.json";
const LEDGER_FILE: &str = "ledger.json";

#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn read_blob<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let bytes = fs::read(self.dir.join(file)).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("discarding unreadable blob {file}: {err}");
                None
            }
        }
    }

    fn write_blob<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(self.dir.join(file), bytes)?;
        Ok(())
    }
}

impl SnapshotStore for JsonStore {
    /// All three blobs must be present and parse; anything less yields
    /// `None` so the engine starts over from seed data.
    fn load(&self) -> Option<Snapshot> {
        let ingredients = self.read_blob(INGREDIENTS_FILE)?;
        let recipes = self.read_blob(RECIPES_FILE)?;
        let ledger = self.read_blob(LEDGER_FILE)?;
        Some(Snapshot {
            ingredients,
            recipes,
            ledger,
        })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        self.write_blob(INGREDIENTS_FILE, &snapshot.ingredients)?;
        self.write_blob(RECIPES_FILE, &snapshot.recipes)?;
        self.write_blob(LEDGER_FILE, &snapshot.ledger)?;
        Ok(())
    }
}

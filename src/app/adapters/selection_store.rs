//! Persistence for the order selection map
//!
//! The selection map is the only durable state of an in-progress order. A
//! store must tolerate a first run (nothing saved yet) and damaged data;
//! both load as an empty map rather than an error.

use crate::app::models::SelectionMap;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Storage medium for the selection map
pub trait SelectionStore: Send + Sync {
    /// Read the saved map; absent or unreadable data is an empty map
    fn load(&self) -> SelectionMap;

    /// Replace the saved map
    fn save(&self, selections: &SelectionMap) -> Result<()>;

    /// Forget the saved map entirely
    fn clear(&self) -> Result<()>;
}

/// Selection map stored as a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileSelectionStore {
    path: PathBuf,
}

impl JsonFileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStore for JsonFileSelectionStore {
    fn load(&self) -> SelectionMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved selections at {}", self.path.display());
                return SelectionMap::new();
            }
            Err(e) => {
                warn!(
                    "Could not read selections from {}: {}",
                    self.path.display(),
                    e
                );
                return SelectionMap::new();
            }
        };

        match serde_json::from_str::<SelectionMap>(&content) {
            Ok(selections) => selections,
            Err(e) => {
                warn!(
                    "Ignoring corrupt selections file {}: {}",
                    self.path.display(),
                    e
                );
                SelectionMap::new()
            }
        }
    }

    fn save(&self, selections: &SelectionMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::storage(
                        format!("Failed to create directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let json = serde_json::to_string_pretty(selections)
            .map_err(|e| Error::serialization("Failed to encode selections", e))?;

        fs::write(&self.path, json).map_err(|e| {
            Error::storage(
                format!("Failed to write selections to {}", self.path.display()),
                e,
            )
        })?;

        debug!(
            "Saved {} selections to {}",
            selections.len(),
            self.path.display()
        );
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(
                format!("Failed to remove {}", self.path.display()),
                e,
            )),
        }
    }
}

/// In-process store, used by tests and one-shot sessions
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selections: Mutex<Option<SelectionMap>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a saved map
    pub fn with_selections(selections: SelectionMap) -> Self {
        Self {
            selections: Mutex::new(Some(selections)),
        }
    }

    /// Whether anything is currently saved
    pub fn is_saved(&self) -> bool {
        self.selections
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> SelectionMap {
        self.selections
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn save(&self, selections: &SelectionMap) -> Result<()> {
        let mut guard = self
            .selections
            .lock()
            .map_err(|_| Error::configuration("selection store lock poisoned"))?;
        *guard = Some(selections.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .selections
            .lock()
            .map_err(|_| Error::configuration("selection store lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSelectionStore::new(dir.path().join("selections.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let store = JsonFileSelectionStore::new(file.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSelectionStore::new(dir.path().join("nested").join("sel.json"));

        let mut selections = SelectionMap::new();
        selections.insert("Almonds".to_string(), 3);
        selections.insert("Cashew".to_string(), 1);
        store.save(&selections).unwrap();

        assert_eq!(store.load(), selections);
    }

    #[test]
    fn test_file_is_a_flat_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sel.json");
        let store = JsonFileSelectionStore::new(&path);

        let mut selections = SelectionMap::new();
        selections.insert("Almonds".to_string(), 2);
        store.save(&selections).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "Almonds": 2 }));
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sel.json");
        let store = JsonFileSelectionStore::new(&path);

        store.save(&SelectionMap::new()).unwrap();
        assert!(path.exists());
        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySelectionStore::new();
        assert!(!store.is_saved());

        let mut selections = SelectionMap::new();
        selections.insert("Walnuts".to_string(), 4);
        store.save(&selections).unwrap();
        assert_eq!(store.load().get("Walnuts"), Some(&4));

        store.clear().unwrap();
        assert!(!store.is_saved());
        assert!(store.load().is_empty());
    }
}

//! # Persistence
//!
//! Each collection is mirrored to `<data_dir>/<key>.json` as a JSON array in the
//! same camelCase layout the records serialize to.
//!
//! Loading never fails: a missing file yields the bundled fixtures, and an
//! unreadable or malformed file is logged and also replaced by the fixtures.
//! Saving is driven by a [`ChangeObserver`] registered on each actor; a failed
//! save is logged and does not undo the mutation.
//!
//! Saves run synchronously on the actor's task, so writes to one file happen
//! in mutation order. Each save goes to `<key>.json.tmp` first and is renamed
//! over the collection file, which therefore always holds a complete array.

use collection_actor::ChangeObserver;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// The persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Orders,
    Machines,
    Materials,
    Operators,
    Quality,
    Processes,
    Traceability,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Orders,
        Collection::Machines,
        Collection::Materials,
        Collection::Operators,
        Collection::Quality,
        Collection::Processes,
        Collection::Traceability,
    ];

    /// Storage key, also the file stem.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Orders => "prod_orders",
            Collection::Machines => "prod_machines",
            Collection::Materials => "prod_materials",
            Collection::Operators => "prod_operators",
            Collection::Quality => "prod_quality",
            Collection::Processes => "prod_processes",
            Collection::Traceability => "prod_traceability",
        }
    }

    fn fixture(&self) -> &'static str {
        match self {
            Collection::Orders => include_str!("../../fixtures/orders.json"),
            Collection::Machines => include_str!("../../fixtures/machines.json"),
            Collection::Materials => include_str!("../../fixtures/materials.json"),
            Collection::Operators => include_str!("../../fixtures/operators.json"),
            Collection::Quality => include_str!("../../fixtures/quality.json"),
            Collection::Processes => include_str!("../../fixtures/processes.json"),
            Collection::Traceability => include_str!("../../fixtures/traceability.json"),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {collection}: {source}")]
    Serialize {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("Bundled fixture for {collection} is invalid: {source}")]
    Fixture {
        collection: Collection,
        source: serde_json::Error,
    },
}

/// A directory of JSON collection files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }

    /// The stored collection, or `None` when its file does not exist.
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<Vec<T>>, StorageError> {
        let path = self.path(collection);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Parse { path, source })
    }

    /// The stored collection, falling back to the bundled fixtures when the file
    /// is missing or cannot be used.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        match self.read(collection) {
            Ok(Some(items)) => {
                info!(%collection, count = items.len(), "Loaded collection");
                items
            }
            Ok(None) => {
                debug!(%collection, "No stored collection, using fixtures");
                fixture_or_empty(collection)
            }
            Err(e) => {
                error!(%collection, error = %e, "Failed to load collection, using fixtures");
                fixture_or_empty(collection)
            }
        }
    }

    pub fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)
            .map_err(|source| StorageError::Serialize { collection, source })?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path(collection);
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, content).map_err(|source| StorageError::Write {
            path: staging.clone(),
            source,
        })?;
        std::fs::rename(&staging, &path).map_err(|source| StorageError::Write { path, source })?;
        debug!(%collection, count = items.len(), "Saved collection");
        Ok(())
    }

    /// An observer that writes the collection back after every mutation.
    pub fn persist<T: Serialize + 'static>(&self, collection: Collection) -> impl ChangeObserver<T> + 'static {
        let store = self.clone();
        move |items: &[T]| {
            if let Err(e) = store.save(collection, items) {
                warn!(%collection, error = %e, "Failed to persist collection");
            }
        }
    }
}

/// The bundled seed data for `collection`.
pub fn fixture<T: DeserializeOwned>(collection: Collection) -> Result<Vec<T>, StorageError> {
    serde_json::from_str(collection.fixture())
        .map_err(|source| StorageError::Fixture { collection, source })
}

fn fixture_or_empty<T: DeserializeOwned>(collection: Collection) -> Vec<T> {
    fixture(collection).unwrap_or_else(|e| {
        error!(error = %e, "Starting with an empty collection");
        Vec::new()
    })
}

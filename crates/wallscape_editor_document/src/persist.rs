// SPDX-License-Identifier: MIT OR Apache-2.0
//! The persistence bridge: load/save document snapshots by project id.
//!
//! The core calls [`DocumentStorage::load`] once at session start and
//! [`DocumentStorage::save`] after persisted mutations. Saves are
//! fire-and-forget from the store's perspective: the store logs
//! failures and moves on; retries belong to the bridge implementation.

use crate::document::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wallscape_editor_scene::ProjectId;

/// Errors from a persistence bridge implementation
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Provider of document snapshots keyed by project identity
pub trait DocumentStorage {
    /// The last saved snapshot for a project, or `None` if the project
    /// has never been saved
    fn load(&self, project: ProjectId) -> Result<Option<Document>, StorageError>;

    /// Persist a snapshot for a project, replacing any previous one
    fn save(&mut self, project: ProjectId, document: &Document) -> Result<(), StorageError>;
}

/// In-memory bridge holding encoded snapshots.
///
/// Snapshots are kept as JSON strings so loads exercise the same
/// encode/decode path as a real backend. Also counts saves, which is
/// useful both for diagnostics and for asserting that transient
/// mutations never write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<ProjectId, String>,
    saves: usize,
}

impl MemoryStorage {
    /// Create an empty in-memory bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot has been saved yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of save calls since creation
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self, project: ProjectId) -> Result<Option<Document>, StorageError> {
        match self.entries.get(&project) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, project: ProjectId, document: &Document) -> Result<(), StorageError> {
        let json = serde_json::to_string(document)?;
        self.entries.insert(project, json);
        self.saves += 1;
        Ok(())
    }
}

/// File-backed bridge: one JSON file per project under a root directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create a bridge rooted at the given directory.
    ///
    /// The directory is created on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The snapshot path for a project
    pub fn path_for(&self, project: ProjectId) -> PathBuf {
        self.root.join(format!("{project}.json"))
    }

    /// The root directory snapshots are stored under
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStorage for JsonFileStorage {
    fn load(&self, project: ProjectId) -> Result<Option<Document>, StorageError> {
        let path = self.path_for(project);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let document = serde_json::from_str(&content)?;
        tracing::debug!(%project, path = %path.display(), "Document loaded");
        Ok(Some(document))
    }

    fn save(&mut self, project: ProjectId, document: &Document) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(project);
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&path, json)?;
        tracing::debug!(%project, path = %path.display(), "Document saved");
        Ok(())
    }
}

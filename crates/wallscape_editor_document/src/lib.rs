// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document store for Wallscape Editor.
//!
//! This crate composes the scene graph and the timeline into a single
//! versioned document and owns the mutation policy around it:
//! - The [`Document`]: layers, selection, timeline, animation tracks
//! - The [`DocumentStore`]: the one mutation entry point, split between
//!   persisted mutations (history checkpoint + save) and transient
//!   mutations (neither)
//! - [`DocumentHistory`]: linear undo/redo stacks of document snapshots
//! - The persistence bridge: load/save a snapshot keyed by project id
//! - Editor configuration loaded from disk
//!
//! ## Architecture
//!
//! The document is single-owner, single-writer: the store mutates it,
//! everything else reads snapshots. Saves after persisted mutations are
//! fire-and-forget; failures are logged and the document stays intact
//! in memory. High-frequency updates (drags, playback ticks) go through
//! the transient path and never touch history or storage.

pub mod config;
pub mod document;
pub mod drag;
pub mod error;
pub mod history;
pub mod persist;
pub mod store;

pub use config::{CanvasDefaults, ConfigError, EditorConfig, CONFIG_FILE_NAME, CONFIG_FORMAT_VERSION};
pub use document::Document;
pub use error::DocumentError;
pub use history::{DocumentHistory, DEFAULT_HISTORY_DEPTH};
pub use persist::{DocumentStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::DocumentStore;

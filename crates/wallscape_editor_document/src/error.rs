// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the document store.

use crate::persist::StorageError;
use thiserror::Error;

/// Errors surfaced by the document store.
///
/// Data-shape mismatches (missing layer ids, empty tracks, out-of-range
/// times) are absorbed as no-ops and never reach this type. Only
/// structural misuse and explicit persistence requests can fail.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A mutation was attempted before a document was opened or created
    #[error("Document store is not initialized")]
    NotInitialized,

    /// The persistence bridge failed on an explicit load or save
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

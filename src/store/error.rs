//! Typed errors for the record-store seam. Load problems are fatal to
//! construction; save problems leave the in-memory catalog valid so the
//! caller can retry. "Not found" is never an error anywhere in the store,
//! it is an absent result or a `false` return.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why the schema/instance pair could not be turned into a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The schema or instance file does not exist at the given path.
    #[error("store file {} does not exist", .path.display())]
    MissingFile { path: PathBuf },

    /// The schema file could not be parsed or declares an unusable shape
    /// (missing key column, dangling reference target, unexpected tables).
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },

    /// The instance file parsed and matched the schema but violates catalog
    /// invariants: duplicate or non-positive song ids, or a membership row
    /// referencing a song that does not exist. Duplicates are rejected,
    /// never deduplicated.
    #[error("malformed instance data: {reason}")]
    MalformedData { reason: String },

    /// The instance file does not conform to the declared schema: unknown
    /// table, missing or unknown field, or a field of the wrong type.
    #[error("instance data does not match schema: {reason}")]
    SchemaDataMismatch { reason: String },
}

/// Why the catalog could not be persisted.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write catalog to {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize catalog")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

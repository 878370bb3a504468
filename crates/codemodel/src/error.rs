//! Errors raised while loading a code model.

use std::path::PathBuf;

/// Failure to read, decode or validate a code model.
#[derive(Debug, thiserror::Error)]
pub enum CodeModelError {
    /// The model file could not be read.
    #[error("Failed to read code model {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The model is not valid JSON or does not match the expected shape.
    #[error("Failed to parse code model: {0}")]
    Parse(#[from] serde_json::Error),

    /// An id does not point at an entry of its table.
    #[error("{owner}: {field} refers to {table} #{id}, but only {len} exist")]
    DanglingId {
        /// Human-readable owner of the id, e.g. `parameter 'user'`.
        owner: String,
        /// Field holding the id.
        field: &'static str,
        /// Table the id points into.
        table: &'static str,
        /// The offending id.
        id: usize,
        /// Number of entries in the table.
        len: usize,
    },

    /// A chain of array/constant schemas loops back on itself.
    #[error("schema '{schema}' is part of an element type cycle")]
    SchemaCycle {
        /// Name of the schema where the cycle was detected.
        schema: String,
    },
}

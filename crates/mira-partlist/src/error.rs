//! Error types for mira-partlist.

use mira_topology::TopologyError;
use thiserror::Error;

/// Result type for partition list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or writing a partition list.
#[derive(Debug, Error)]
pub enum Error {
    /// The rack topology failed its integrity checks.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Two extents produced the same partition name.
    #[error("Duplicate partition name: {0}")]
    DuplicateName(String),

    /// Writing the document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

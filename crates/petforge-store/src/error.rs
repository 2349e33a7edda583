//! Error types for the store layer.

use petforge_status::StatusError;

/// Errors that can occur while loading or saving the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the snapshot from the backing medium failed.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// Writing the snapshot to the backing medium failed.
    ///
    /// The in-memory snapshot is unaffected; the next save attempt will
    /// carry the same (or newer) state.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    /// The stored bytes exist but could not be decoded as a snapshot.
    /// Distinct from [`StoreError::Read`] so callers can tell "disk
    /// problem" apart from "corrupt record".
    #[error(transparent)]
    Codec(#[from] StatusError),
}

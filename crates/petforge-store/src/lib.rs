//! Persistence abstraction layer for Petforge.
//!
//! Provides the [`StatusStore`] trait that abstracts over where the pet's
//! snapshot lives, plus two implementations:
//!
//! - [`JsonFileStore`] (feature `file`, default) — one JSON file on disk,
//!   written atomically via a temp file and rename.
//! - [`MemoryStore`] — in-process only; for tests and ephemeral runs.
//!
//! The store holds exactly one snapshot under one fixed logical key.
//! There is no multi-record surface: `load` after `save(x)` yields a value
//! structurally equal to `x`, absent external tampering.
//!
//! Store failures are expected to be survivable. Callers log a failed
//! `save` and keep going; the next save carries the same in-memory state,
//! so nothing is lost but durability. A failed `load` degrades to the
//! first-run defaults.

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "file")]
mod file;
mod memory;

pub use error::StoreError;
#[cfg(feature = "file")]
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use petforge_status::PetStatus;

/// The fixed logical key the snapshot is stored under.
///
/// File-backed stores use this as the file name; other backends would use
/// it as their record key.
pub const STATUS_KEY: &str = "pet_status";

/// Reads and writes the single persisted status snapshot.
pub trait StatusStore: Send + Sync + 'static {
    /// The error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Loads the persisted snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has ever been saved. A corrupt
    /// or unreadable snapshot is an `Err`; the caller decides whether to
    /// fall back to defaults (the engine does).
    async fn load(&self) -> Result<Option<PetStatus>, Self::Error>;

    /// Persists the snapshot, replacing any previous one.
    async fn save(&self, status: &PetStatus) -> Result<(), Self::Error>;
}

/// A shared store is still a store. Lets a caller keep one end of an
/// `Arc` for inspection while the engine owns the other.
impl<T: StatusStore> StatusStore for std::sync::Arc<T> {
    type Error = T::Error;

    async fn load(&self) -> Result<Option<PetStatus>, Self::Error> {
        (**self).load().await
    }

    async fn save(&self, status: &PetStatus) -> Result<(), Self::Error> {
        (**self).save(status).await
    }
}

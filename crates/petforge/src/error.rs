//! Unified error type for the Petforge meta crate.

use petforge_room::RoomError;
use petforge_status::StatusError;
use petforge_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `petforge` meta crate, callers deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attributes auto-generate `From` impls so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PetforgeError {
    /// A snapshot encode/decode error.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A persistence error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A navigation refusal (the pet is sleeping).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// The engine task is gone; the handle can no longer reach it.
    #[error("the pet engine is not running")]
    EngineClosed,
}

//! Status snapshot types for Petforge.
//!
//! This crate defines the one record that outlives the process:
//!
//! - **Types** ([`PetStatus`] and its stat-map semantics) — the open
//!   mapping of meters that gets persisted across runs.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how a snapshot is
//!   converted to/from bytes.
//! - **Errors** ([`StatusError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The status layer sits below everything else. It doesn't know about
//! files, timers, or rooms; it only knows the shape of the snapshot and
//! how to serialize it.
//!
//! ```text
//! Store (bytes on disk) → Status (PetStatus) → Lifecycle (simulation)
//! ```

mod codec;
mod error;
mod status;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::StatusError;
pub use status::{DEFAULT_STATS, ENERGY, PetStatus, STAT_MAX};

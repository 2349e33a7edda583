//! In-memory snapshot store for tests and ephemeral runs.

use std::sync::Mutex;

use petforge_status::PetStatus;

use crate::{StatusStore, StoreError};

/// A [`StatusStore`] holding the snapshot in process memory.
///
/// Honors the same round-trip contract as the file store, minus
/// durability. Useful in tests (no disk access, no cleanup) and as a
/// stand-in when a host doesn't want persistence at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<PetStatus>>,
    saves: Mutex<u64>,
}

impl MemoryStore {
    /// Creates an empty store (no snapshot yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a snapshot, as if a previous run
    /// had saved it.
    pub fn with_snapshot(status: PetStatus) -> Self {
        Self {
            snapshot: Mutex::new(Some(status)),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful saves. Tests use this to assert that the
    /// engine persists on every mutation.
    pub fn save_count(&self) -> u64 {
        *self.saves.lock().expect("save counter poisoned")
    }
}

impl StatusStore for MemoryStore {
    type Error = StoreError;

    async fn load(&self) -> Result<Option<PetStatus>, StoreError> {
        Ok(self.snapshot.lock().expect("snapshot poisoned").clone())
    }

    async fn save(&self, status: &PetStatus) -> Result<(), StoreError> {
        *self.snapshot.lock().expect("snapshot poisoned") = Some(status.clone());
        *self.saves.lock().expect("save counter poisoned") += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_empty_store_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let mut status = PetStatus::new();
        status.set_energy(37);

        store.save(&status).await.unwrap();
        let loaded = store.load().await.unwrap().expect("snapshot saved");

        assert_eq!(loaded, status);
    }

    #[tokio::test]
    async fn test_with_snapshot_preloads() {
        let mut status = PetStatus::new();
        status.set_energy(5);
        let store = MemoryStore::with_snapshot(status.clone());

        assert_eq!(store.load().await.unwrap(), Some(status));
    }

    #[tokio::test]
    async fn test_save_count_tracks_saves() {
        let store = MemoryStore::new();
        assert_eq!(store.save_count(), 0);

        store.save(&PetStatus::new()).await.unwrap();
        store.save(&PetStatus::new()).await.unwrap();

        assert_eq!(store.save_count(), 2);
    }
}

//! JSON-file-backed snapshot store.
//!
//! One file, one snapshot. Writes go through a temp file in the same
//! directory followed by a rename, so a crash mid-write leaves either the
//! old snapshot or the new one on disk, never a torn half of each.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use petforge_status::{Codec, JsonCodec, PetStatus};
use tokio::fs;
use tracing::trace;

use crate::{STATUS_KEY, StatusStore, StoreError};

/// A [`StatusStore`] that keeps the snapshot in a single JSON file.
///
/// The file lives at `<dir>/pet_status.json` (see [`STATUS_KEY`]). The
/// directory is created on first save if it doesn't exist.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    codec: JsonCodec,
}

impl JsonFileStore {
    /// Creates a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(format!("{STATUS_KEY}.json"));
        Self {
            path,
            codec: JsonCodec,
        }
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl StatusStore for JsonFileStore {
    type Error = StoreError;

    async fn load(&self) -> Result<Option<PetStatus>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                let status = self.codec.decode(&bytes)?;
                trace!(path = %self.path.display(), "snapshot loaded");
                Ok(Some(status))
            }
            // A missing file is the normal first-run case, not a failure.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    async fn save(&self, status: &PetStatus) -> Result<(), StoreError> {
        let bytes = self.codec.encode(status)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(StoreError::Write)?;
        }

        // Temp file + rename keeps the previous snapshot intact if the
        // write dies partway.
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).await.map_err(StoreError::Write)?;
        fs::rename(&tmp, &self.path).await.map_err(StoreError::Write)?;

        trace!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

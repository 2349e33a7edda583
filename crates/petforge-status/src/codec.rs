//! Codec trait and implementations for serializing the status snapshot.
//!
//! A codec converts between Rust types and raw bytes. The store layer
//! doesn't care how the snapshot is serialized; it just needs something
//! implementing the [`Codec`] trait. Currently we provide [`JsonCodec`]
//! (human-readable, trivially inspectable on disk). A compact binary
//! codec could be added later without changing any other code.

use serde::{Serialize, de::DeserializeOwned};

use crate::StatusError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` so a single codec value can be shared by the
/// engine task and any test harness without lifetime gymnastics.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`StatusError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, StatusError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`StatusError::Decode`] if the bytes are malformed,
    /// truncated, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, StatusError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// JSON keeps the saved snapshot editable and diffable, which matters far
/// more here than byte size: the whole record is a handful of small
/// integers.
///
/// ## Example
///
/// ```rust
/// use petforge_status::{Codec, JsonCodec, PetStatus};
///
/// let codec = JsonCodec;
/// let status = PetStatus::new();
///
/// let bytes = codec.encode(&status).unwrap();
/// let decoded: PetStatus = codec.decode(&bytes).unwrap();
/// assert_eq!(status, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, StatusError> {
        serde_json::to_vec(value).map_err(StatusError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, StatusError> {
        serde_json::from_slice(data).map_err(StatusError::Decode)
    }
}

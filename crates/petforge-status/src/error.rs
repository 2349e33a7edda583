//! Error types for the status layer.
//!
//! Each crate in Petforge defines its own error enum. A `StatusError`
//! always means a serialization problem, never a disk or game-rule one.

/// Errors that can occur while encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Note that an out-of-range or missing stat is NOT a decode error:
    /// sanitization repairs those. This fires only for bytes that are not
    /// a JSON object of numbers at all.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The snapshot is invalid at the domain level even though it parsed,
    /// e.g. a stat name that is empty or unreasonably long.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

//! The pet status snapshot: the one record that survives across runs.
//!
//! A status is an open mapping from stat name to an integer meter in
//! `0..=100`. `energy` is the only mandatory stat and the only one the
//! lifecycle simulates. Any other key (hunger, cleanliness, happiness, or
//! whatever a future screen attaches) is display-only: it is loaded,
//! shown, and saved back untouched unless something explicitly mutates it.
//!
//! The snapshot serializes as a flat JSON object:
//!
//! ```text
//! { "cleanliness": 100, "energy": 87, "happiness": 100, "hunger": 100 }
//! ```
//!
//! A `BTreeMap` keeps the key order stable, so two structurally equal
//! snapshots always serialize to identical bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Name of the mandatory stat. The lifecycle controller only simulates this one.
pub const ENERGY: &str = "energy";

/// Upper bound for every stat meter. The lower bound is 0.
pub const STAT_MAX: u8 = 100;

/// Stats present in a freshly created snapshot, all starting at [`STAT_MAX`].
///
/// `energy` must be first-class here; the rest are the display-only meters
/// the status bar knows how to render.
pub const DEFAULT_STATS: &[&str] = &["energy", "hunger", "cleanliness", "happiness"];

/// An open map of stat meters with `energy` always present.
///
/// Invariant: every stored value is within `0..=100`. All mutation paths
/// clamp, and deserialization sanitizes, so code holding a `PetStatus`
/// never needs to re-check the range.
///
/// `#[serde(transparent)]` serializes the wrapper as just the inner map,
/// producing the flat-object wire shape shown in the module docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PetStatus {
    stats: BTreeMap<String, u8>,
}

impl PetStatus {
    /// Creates the first-run snapshot: every default stat at the maximum.
    pub fn new() -> Self {
        let stats = DEFAULT_STATS
            .iter()
            .map(|name| (name.to_string(), STAT_MAX))
            .collect();
        Self { stats }
    }

    /// Builds a sanitized snapshot from untrusted raw values.
    ///
    /// Rules, applied per key so one bad field never rejects the rest:
    /// - values below 0 clamp to 0, values above 100 clamp to 100;
    /// - a missing `energy` key is restored at [`STAT_MAX`];
    /// - unknown keys are kept as-is (clamped), preserving whatever a
    ///   newer or older build attached.
    pub fn from_raw(raw: BTreeMap<String, i64>) -> Self {
        let mut stats: BTreeMap<String, u8> = raw
            .into_iter()
            .map(|(name, value)| (name, clamp_stat(value)))
            .collect();
        stats.entry(ENERGY.to_string()).or_insert(STAT_MAX);
        Self { stats }
    }

    /// Current energy level, `0..=100`.
    pub fn energy(&self) -> u8 {
        // The energy key is guaranteed by every constructor; the fallback
        // only guards against a hand-built map from a future refactor.
        self.stats.get(ENERGY).copied().unwrap_or(STAT_MAX)
    }

    /// Sets energy, clamped to `0..=100`. Returns the stored value.
    pub fn set_energy(&mut self, value: u8) -> u8 {
        self.set_stat(ENERGY, value)
    }

    /// Adds `delta` to energy, saturating at both bounds.
    /// Returns the new energy level.
    pub fn adjust_energy(&mut self, delta: i16) -> u8 {
        let next = (i16::from(self.energy()) + delta).clamp(0, i16::from(STAT_MAX));
        self.set_energy(next as u8)
    }

    /// Reads a stat by name. `None` if the stat was never attached.
    pub fn stat(&self, name: &str) -> Option<u8> {
        self.stats.get(name).copied()
    }

    /// Sets (or attaches) a stat, clamped to `0..=100`.
    /// Returns the stored value.
    pub fn set_stat(&mut self, name: &str, value: u8) -> u8 {
        let value = value.min(STAT_MAX);
        self.stats.insert(name.to_string(), value);
        value
    }

    /// Iterates every stat in stable (alphabetical) order.
    pub fn stats(&self) -> impl Iterator<Item = (&str, u8)> {
        self.stats.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of attached stats (always at least 1: energy).
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Never true in practice; provided for completeness with `len`.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl Default for PetStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialization goes through [`PetStatus::from_raw`] so a persisted
/// snapshot is sanitized at the moment it enters the process, not at
/// every read site.
impl<'de> Deserialize<'de> for PetStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, i64>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

fn clamp_stat(value: i64) -> u8 {
    value.clamp(0, i64::from(STAT_MAX)) as u8
}

// =========================================================================
// Tests
// =========================================================================

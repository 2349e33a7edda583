//! Lifecycle configuration.

use std::time::Duration;

use petforge_status::STAT_MAX;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunable constants for the energy simulation.
///
/// The defaults reproduce the shipped behavior: regenerate 1 energy per
/// second while sleeping, decay 1 energy per 10 seconds while awake,
/// warn at 20, force the Bedroom at 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Period of the base tick. While sleeping, every base tick
    /// regenerates 1 energy.
    pub regen_period: Duration,

    /// While awake, energy decays 1 point every this-many base ticks.
    /// Draining is deliberately much slower than recovering; the default
    /// of 10 preserves that asymmetry and must stay ≥ 1.
    pub decay_multiplier: u32,

    /// At or below this level, navigation is forced to the Bedroom and
    /// the auto-sleep notice fires.
    pub low_energy_threshold: u8,

    /// Exactly at this level, a one-shot low-energy warning fires
    /// (re-armed once energy rises above it again).
    pub warn_threshold: u8,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            regen_period: Duration::from_secs(1),
            decay_multiplier: 10,
            low_energy_threshold: 10,
            warn_threshold: 20,
        }
    }
}

impl LifecycleConfig {
    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called automatically by the controller constructor. Rules:
    /// - `regen_period` must be non-zero (falls back to the default 1 s);
    /// - `decay_multiplier` is at least 1;
    /// - both thresholds are capped at [`STAT_MAX`];
    /// - `warn_threshold` is forced ≥ `low_energy_threshold` (a warning
    ///   below the forced-sleep line could never fire before it).
    pub fn validated(mut self) -> Self {
        if self.regen_period.is_zero() {
            warn!("regen_period of zero would stall the simulation, using 1s");
            self.regen_period = Duration::from_secs(1);
        }
        if self.decay_multiplier == 0 {
            warn!("decay_multiplier of zero is invalid, clamping to 1");
            self.decay_multiplier = 1;
        }
        self.low_energy_threshold = self.low_energy_threshold.min(STAT_MAX);
        self.warn_threshold = self.warn_threshold.min(STAT_MAX);
        if self.warn_threshold < self.low_energy_threshold {
            self.warn_threshold = self.low_energy_threshold;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_behavior() {
        let config = LifecycleConfig::default();
        assert_eq!(config.regen_period, Duration::from_secs(1));
        assert_eq!(config.decay_multiplier, 10);
        assert_eq!(config.low_energy_threshold, 10);
        assert_eq!(config.warn_threshold, 20);
    }

    #[test]
    fn test_validated_fixes_zero_values() {
        let config = LifecycleConfig {
            regen_period: Duration::ZERO,
            decay_multiplier: 0,
            ..LifecycleConfig::default()
        }
        .validated();

        assert_eq!(config.regen_period, Duration::from_secs(1));
        assert_eq!(config.decay_multiplier, 1);
    }

    #[test]
    fn test_validated_caps_thresholds() {
        let config = LifecycleConfig {
            low_energy_threshold: 200,
            warn_threshold: 250,
            ..LifecycleConfig::default()
        }
        .validated();

        assert_eq!(config.low_energy_threshold, 100);
        assert_eq!(config.warn_threshold, 100);
    }

    #[test]
    fn test_validated_orders_thresholds() {
        let config = LifecycleConfig {
            low_energy_threshold: 30,
            warn_threshold: 5,
            ..LifecycleConfig::default()
        }
        .validated();

        assert_eq!(config.warn_threshold, 30);
    }
}

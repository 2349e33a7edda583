//! The lifecycle controller: owns the status snapshot and advances it.
//!
//! The controller is deliberately pure with respect to time and IO. It
//! never sleeps, schedules, persists, or plays anything; it is called on
//! every base tick and answers with the list of [`LifecycleEvent`]s the
//! engine must act on. That split keeps every rule in this file testable
//! with a plain loop, no clocks involved.

use petforge_status::{PetStatus, STAT_MAX};
use tracing::{debug, info};

use crate::{LifecycleConfig, NavPolicy, SleepState};

/// Something the engine must react to after a tick or a light switch.
///
/// Events in one batch are ordered: the energy change comes first (it is
/// what gets persisted), then the sleep transition if one happened, then
/// the threshold notices in their fixed priority (auto-sleep before the
/// low-energy warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Energy moved; persist the snapshot.
    EnergyChanged { energy: u8 },

    /// The pet fell asleep (energy hit 0, or the light was switched
    /// off). The light is now off.
    FellAsleep,

    /// The pet woke up (energy reached 100, or the light was switched
    /// on). The light is now on.
    WokeUp,

    /// Energy is at or below the low threshold. If the current room is
    /// not the Bedroom, the engine forces the switch, raises the
    /// auto-sleep notice, and plays the alert tone. Takes precedence
    /// over any voluntary navigation.
    AutoSleepTriggered { energy: u8 },

    /// Energy sits exactly on the warning threshold and no warning has
    /// fired for this dip. One push-style warning; re-armed once energy
    /// rises above the threshold again.
    LowEnergyWarning { energy: u8 },
}

/// Owns energy, derives awake/asleep, and decides every transition.
pub struct LifecycleController {
    status: PetStatus,
    sleep: SleepState,
    light_on: bool,
    /// Low-energy warning hysteresis: set when the warning fires, cleared
    /// when energy rises back above the threshold.
    warned: bool,
    /// Base ticks accumulated toward the next decay step while awake.
    ticks_toward_decay: u32,
    config: LifecycleConfig,
}

impl LifecycleController {
    /// Creates the controller from an optional persisted snapshot.
    ///
    /// A present snapshot is used as-is (it was sanitized on decode); a
    /// missing one means first run, which starts from the defaults. The
    /// pet always starts awake with the light on; if the loaded energy is
    /// already zero, the first tick forces sleep.
    pub fn new(persisted: Option<PetStatus>, config: LifecycleConfig) -> Self {
        let status = match persisted {
            Some(status) => {
                info!(energy = status.energy(), "lifecycle restored from snapshot");
                status
            }
            None => {
                info!("no snapshot, lifecycle starting fresh");
                PetStatus::new()
            }
        };

        Self {
            status,
            sleep: SleepState::Awake,
            light_on: true,
            warned: false,
            ticks_toward_decay: 0,
            config: config.validated(),
        }
    }

    /// Advances the simulation by one base tick.
    ///
    /// Sleeping: +1 energy per tick; waking up at 100.
    /// Awake: −1 energy every `decay_multiplier` ticks; falling asleep
    /// at 0. The 10× default asymmetry (slow drain, fast recovery) is a
    /// deliberate design choice, not an accident of the timer layout.
    pub fn on_tick(&mut self) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();

        match self.sleep {
            SleepState::Sleeping => {
                let energy = self.status.adjust_energy(1);
                events.push(LifecycleEvent::EnergyChanged { energy });
                if energy >= STAT_MAX {
                    self.transition(SleepState::Awake, &mut events);
                }
                self.check_thresholds(energy, &mut events);
            }
            SleepState::Awake => {
                if self.status.energy() == 0 {
                    // A manual wake at zero energy holds for exactly one
                    // tick before the automatic rule reasserts itself.
                    self.transition(SleepState::Sleeping, &mut events);
                    return events;
                }

                self.ticks_toward_decay += 1;
                if self.ticks_toward_decay >= self.config.decay_multiplier {
                    self.ticks_toward_decay = 0;
                    let energy = self.status.adjust_energy(-1);
                    events.push(LifecycleEvent::EnergyChanged { energy });
                    if energy == 0 {
                        self.transition(SleepState::Sleeping, &mut events);
                    }
                    self.check_thresholds(energy, &mut events);
                }
            }
        }

        events
    }

    /// Manual light switch: off puts the pet to sleep immediately, on
    /// wakes it immediately. No energy precondition in either direction.
    pub fn set_light(&mut self, on: bool) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        if on == self.light_on {
            return events;
        }

        let target = if on {
            SleepState::Awake
        } else {
            SleepState::Sleeping
        };
        self.transition(target, &mut events);
        events
    }

    /// What navigation is allowed right now.
    ///
    /// Checked in the same order the app always has: sleeping blocks
    /// outright, then low energy forces the Bedroom, then free movement.
    pub fn navigation_policy(&self) -> NavPolicy {
        if self.sleep.is_sleeping() {
            NavPolicy::Blocked
        } else if self.status.energy() <= self.config.low_energy_threshold {
            NavPolicy::ForceBedroom
        } else {
            NavPolicy::Free
        }
    }

    /// The current snapshot (persist this on every `EnergyChanged`).
    pub fn status(&self) -> &PetStatus {
        &self.status
    }

    /// Current energy, `0..=100`.
    pub fn energy(&self) -> u8 {
        self.status.energy()
    }

    /// Current sleep state.
    pub fn sleep_state(&self) -> SleepState {
        self.sleep
    }

    /// Whether the bedroom light is on (mirrors the sleep state).
    pub fn light_on(&self) -> bool {
        self.light_on
    }

    /// The validated configuration in effect.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Mutates a display-only stat (clamped) and reports the change so
    /// the engine persists it like any other mutation.
    pub fn set_stat(&mut self, name: &str, value: u8) -> LifecycleEvent {
        self.status.set_stat(name, value);
        LifecycleEvent::EnergyChanged {
            energy: self.status.energy(),
        }
    }

    fn transition(&mut self, target: SleepState, events: &mut Vec<LifecycleEvent>) {
        if self.sleep == target {
            return;
        }
        self.sleep = target;
        self.ticks_toward_decay = 0;
        match target {
            SleepState::Sleeping => {
                self.light_on = false;
                info!(energy = self.status.energy(), "pet fell asleep, light off");
                events.push(LifecycleEvent::FellAsleep);
            }
            SleepState::Awake => {
                self.light_on = true;
                info!(energy = self.status.energy(), "pet woke up, light on");
                events.push(LifecycleEvent::WokeUp);
            }
        }
    }

    /// Threshold side effects, evaluated in their fixed order after every
    /// energy change: the forced-Bedroom rule first, the warning second.
    fn check_thresholds(&mut self, energy: u8, events: &mut Vec<LifecycleEvent>) {
        if energy <= self.config.low_energy_threshold {
            events.push(LifecycleEvent::AutoSleepTriggered { energy });
        }

        if energy == self.config.warn_threshold && !self.warned {
            self.warned = true;
            debug!(energy, "low-energy warning armed and fired");
            events.push(LifecycleEvent::LowEnergyWarning { energy });
        }
        if energy > self.config.warn_threshold && self.warned {
            self.warned = false;
            debug!(energy, "low-energy warning re-armed");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for the lifecycle state machine.
    //!
    //! The controller is clock-free, so a "decay tick" here is just
    //! `decay_multiplier` calls to `on_tick`. Naming convention:
    //! `test_{operation}_{scenario}_{expected}`.

    use super::*;

    // -- Helpers ----------------------------------------------------------

    /// Controller with default config and the given starting energy, awake.
    fn awake_at(energy: u8) -> LifecycleController {
        let mut status = PetStatus::new();
        status.set_energy(energy);
        LifecycleController::new(Some(status), LifecycleConfig::default())
    }

    /// Controller already sleeping at the given energy.
    fn sleeping_at(energy: u8) -> LifecycleController {
        let mut c = awake_at(energy);
        c.set_light(false);
        c
    }

    /// Runs one full decay step (default: 10 base ticks) and returns the
    /// events of the final base tick, where the decay lands.
    fn decay_step(c: &mut LifecycleController) -> Vec<LifecycleEvent> {
        let mut last = Vec::new();
        for _ in 0..c.config().decay_multiplier {
            last = c.on_tick();
        }
        last
    }

    fn has_event(events: &[LifecycleEvent], wanted: &LifecycleEvent) -> bool {
        events.iter().any(|e| e == wanted)
    }

    // =====================================================================
    // Initialization
    // =====================================================================

    #[test]
    fn test_new_without_snapshot_uses_defaults() {
        let c = LifecycleController::new(None, LifecycleConfig::default());
        assert_eq!(c.energy(), 100);
        assert_eq!(c.sleep_state(), SleepState::Awake);
        assert!(c.light_on());
    }

    #[test]
    fn test_new_with_snapshot_restores_it() {
        let mut status = PetStatus::new();
        status.set_energy(42);
        status.set_stat("sparkle", 9);

        let c = LifecycleController::new(Some(status), LifecycleConfig::default());
        assert_eq!(c.energy(), 42);
        assert_eq!(c.status().stat("sparkle"), Some(9));
    }

    // =====================================================================
    // Decay while awake
    // =====================================================================

    #[test]
    fn test_decay_fires_every_multiplier_ticks() {
        let mut c = awake_at(50);

        // Nine base ticks: nothing happens yet.
        for _ in 0..9 {
            assert!(c.on_tick().is_empty());
        }
        assert_eq!(c.energy(), 50);

        // The tenth lands the decay.
        let events = c.on_tick();
        assert!(has_event(&events, &LifecycleEvent::EnergyChanged { energy: 49 }));
        assert_eq!(c.energy(), 49);
    }

    #[test]
    fn test_decay_tick_from_one_reaches_zero_and_sleeps() {
        // Sleep/wake determinism, falling half: Awake at 1, one decay
        // step later energy is 0 and the pet is sleeping.
        let mut c = awake_at(1);

        let events = decay_step(&mut c);

        assert_eq!(c.energy(), 0);
        assert_eq!(c.sleep_state(), SleepState::Sleeping);
        assert!(!c.light_on());
        assert!(has_event(&events, &LifecycleEvent::FellAsleep));
    }

    #[test]
    fn test_energy_invariant_holds_across_long_run() {
        let mut c = awake_at(100);

        // Long enough to drain fully, sleep, refill, and drain again.
        for _ in 0..4_000 {
            c.on_tick();
            assert!(c.energy() <= 100, "energy above 100");
        }
    }

    // =====================================================================
    // Regeneration while sleeping
    // =====================================================================

    #[test]
    fn test_regen_one_per_tick_while_sleeping() {
        let mut c = sleeping_at(40);

        let events = c.on_tick();
        assert_eq!(c.energy(), 41);
        assert!(has_event(&events, &LifecycleEvent::EnergyChanged { energy: 41 }));
    }

    #[test]
    fn test_hundred_regen_ticks_from_zero_wakes_at_full() {
        // Sleep/wake determinism, rising half: Sleeping at 0, exactly 100
        // regen ticks later the pet is awake at 100.
        let mut c = sleeping_at(0);

        for i in 0..99 {
            c.on_tick();
            assert_eq!(c.sleep_state(), SleepState::Sleeping, "tick {i}");
        }
        let events = c.on_tick();

        assert_eq!(c.energy(), 100);
        assert_eq!(c.sleep_state(), SleepState::Awake);
        assert!(c.light_on());
        assert!(has_event(&events, &LifecycleEvent::WokeUp));
    }

    #[test]
    fn test_full_cycle_drain_then_refill() {
        let mut c = awake_at(2);

        decay_step(&mut c); // 2 → 1
        decay_step(&mut c); // 1 → 0, falls asleep
        assert_eq!(c.sleep_state(), SleepState::Sleeping);

        for _ in 0..100 {
            c.on_tick();
        }
        assert_eq!(c.sleep_state(), SleepState::Awake);
        assert_eq!(c.energy(), 100);
    }

    // =====================================================================
    // Threshold events and their ordering
    // =====================================================================

    #[test]
    fn test_warning_fires_exactly_once_at_threshold() {
        let mut c = awake_at(21);

        let events = decay_step(&mut c); // 21 → 20
        assert!(has_event(&events, &LifecycleEvent::LowEnergyWarning { energy: 20 }));

        // Lingering at or below the threshold must not refire.
        let events = decay_step(&mut c); // 20 → 19
        assert!(!events
            .iter()
            .any(|e| matches!(e, LifecycleEvent::LowEnergyWarning { .. })));
    }

    #[test]
    fn test_warning_rearms_after_energy_recovers() {
        // Hysteresis, not a one-shot-forever latch: drain to 20, recover
        // above 20, drain back to 20, the warning fires again.
        let mut c = awake_at(21);
        let events = decay_step(&mut c); // 21 → 20, warns
        assert!(has_event(&events, &LifecycleEvent::LowEnergyWarning { energy: 20 }));

        c.set_light(false);
        for _ in 0..5 {
            c.on_tick(); // 20 → 25 while sleeping, clears the flag
        }
        c.set_light(true);

        let events = decay_step(&mut c); // 25 → 24
        assert!(!events
            .iter()
            .any(|e| matches!(e, LifecycleEvent::LowEnergyWarning { .. })));
        for _ in 0..3 {
            decay_step(&mut c); // 24 → 21
        }
        let events = decay_step(&mut c); // 21 → 20, warns again
        assert!(has_event(&events, &LifecycleEvent::LowEnergyWarning { energy: 20 }));
    }

    #[test]
    fn test_warning_fires_when_regen_passes_threshold() {
        // The check is on the value, not the direction: regenerating
        // through exactly 20 also warns (and re-arms above it).
        let mut c = sleeping_at(19);

        let events = c.on_tick(); // 19 → 20
        assert!(has_event(&events, &LifecycleEvent::LowEnergyWarning { energy: 20 }));
    }

    #[test]
    fn test_auto_sleep_event_at_low_threshold() {
        let mut c = awake_at(11);

        let events = decay_step(&mut c); // 11 → 10
        assert!(has_event(&events, &LifecycleEvent::AutoSleepTriggered { energy: 10 }));
    }

    #[test]
    fn test_auto_sleep_repeats_while_condition_holds() {
        // Unlike the warning, the forced-Bedroom rule has no latch: it
        // overrides navigation for as long as energy stays low, so the
        // event recurs on every change in the low band.
        let mut c = awake_at(11);

        let first = decay_step(&mut c); // 11 → 10
        let second = decay_step(&mut c); // 10 → 9
        assert!(has_event(&first, &LifecycleEvent::AutoSleepTriggered { energy: 10 }));
        assert!(has_event(&second, &LifecycleEvent::AutoSleepTriggered { energy: 9 }));
    }

    #[test]
    fn test_auto_sleep_ordered_before_warning() {
        // Both thresholds can be crossed by the same change when the
        // config squeezes them together; the forced-room rule comes first.
        let config = LifecycleConfig {
            low_energy_threshold: 20,
            warn_threshold: 20,
            ..LifecycleConfig::default()
        };
        let mut status = PetStatus::new();
        status.set_energy(21);
        let mut c = LifecycleController::new(Some(status), config);

        let events = decay_step(&mut c); // 21 → 20
        let auto = events
            .iter()
            .position(|e| matches!(e, LifecycleEvent::AutoSleepTriggered { .. }))
            .expect("auto-sleep fired");
        let warn = events
            .iter()
            .position(|e| matches!(e, LifecycleEvent::LowEnergyWarning { .. }))
            .expect("warning fired");
        assert!(auto < warn, "auto-sleep must be evaluated before the warning");
    }

    // =====================================================================
    // Manual light switch
    // =====================================================================

    #[test]
    fn test_light_off_sleeps_immediately_at_any_energy() {
        let mut c = awake_at(90);

        let events = c.set_light(false);

        assert_eq!(c.sleep_state(), SleepState::Sleeping);
        assert!(!c.light_on());
        assert!(has_event(&events, &LifecycleEvent::FellAsleep));
    }

    #[test]
    fn test_light_on_wakes_immediately_at_any_energy() {
        let mut c = sleeping_at(3);

        let events = c.set_light(true);

        assert_eq!(c.sleep_state(), SleepState::Awake);
        assert!(c.light_on());
        assert!(has_event(&events, &LifecycleEvent::WokeUp));
    }

    #[test]
    fn test_light_switch_same_position_is_noop() {
        let mut c = awake_at(50);
        assert!(c.set_light(true).is_empty());
        assert_eq!(c.sleep_state(), SleepState::Awake);
    }

    #[test]
    fn test_manual_wake_at_zero_resleeps_on_next_tick() {
        // Manual override holds until the next tick, then the automatic
        // rule reasserts itself.
        let mut c = sleeping_at(0);
        c.set_light(true);
        assert_eq!(c.sleep_state(), SleepState::Awake);

        let events = c.on_tick();
        assert_eq!(c.sleep_state(), SleepState::Sleeping);
        assert!(has_event(&events, &LifecycleEvent::FellAsleep));
    }

    #[test]
    fn test_light_switch_resets_decay_accumulator() {
        let mut c = awake_at(50);

        // Nine of ten base ticks toward a decay.
        for _ in 0..9 {
            c.on_tick();
        }
        c.set_light(false);
        c.set_light(true);

        // The partial progress must not carry over.
        for _ in 0..9 {
            assert!(c.on_tick().is_empty());
        }
        assert_eq!(c.energy(), 50);
        c.on_tick();
        assert_eq!(c.energy(), 49);
    }

    // =====================================================================
    // Navigation policy
    // =====================================================================

    #[test]
    fn test_policy_blocked_while_sleeping() {
        let c = sleeping_at(50);
        assert_eq!(c.navigation_policy(), NavPolicy::Blocked);
    }

    #[test]
    fn test_policy_forces_bedroom_at_low_energy() {
        let c = awake_at(10);
        assert_eq!(c.navigation_policy(), NavPolicy::ForceBedroom);
    }

    #[test]
    fn test_policy_free_above_threshold() {
        let c = awake_at(11);
        assert_eq!(c.navigation_policy(), NavPolicy::Free);
    }

    #[test]
    fn test_policy_sleeping_wins_over_low_energy() {
        // A sleeping pet at 5 energy is Blocked, not ForceBedroom; the
        // checks happen in a fixed order.
        let c = sleeping_at(5);
        assert_eq!(c.navigation_policy(), NavPolicy::Blocked);
    }
}

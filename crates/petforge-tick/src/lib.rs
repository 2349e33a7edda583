//! Named fixed-period tick scheduler for Petforge.
//!
//! Everything periodic in the app (energy decay/regen, the match-game
//! countdown, the reading-trainer advance) is driven by a scheduler from
//! this crate sitting inside the engine's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle user commands */ }
//!         info = lifecycle_ticker.wait_for_tick() => {
//!             let events = controller.on_tick();
//!             // dispatch events
//!         }
//!     }
//! }
//! ```
//!
//! # Cancel-before-start discipline
//!
//! Duplicate concurrent timers are the classic defect in timer-driven UI
//! code (an interval started without clearing the previous one). The
//! scheduler rules this out by construction: a scheduler is an owned
//! value, [`TickScheduler::restart`] replaces the pending deadline in
//! place, and dropping the scheduler cancels it. There is never a
//! detached handle that keeps firing.
//!
//! # Disabled mode
//!
//! With a zero period the scheduler is disabled and
//! [`TickScheduler::wait_for_tick`] pends forever. A pending branch in
//! `select!` simply never fires, which is exactly what a room without a
//! timed session wants.

use std::time::Duration;

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Tick info (returned to caller each tick)
// ---------------------------------------------------------------------------

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1, survives
    /// pause/resume, resets on [`TickScheduler::restart`]).
    pub tick: u64,
    /// Fixed delta time for this tick (always the configured period).
    /// Consumers should advance simulation by this, not by wall-clock
    /// elapsed time, to stay deterministic under test-paused clocks.
    pub dt: Duration,
    /// How many whole periods were missed before this tick fired.
    /// Non-zero only when the loop stalled; the schedule resumes from
    /// now rather than replaying the backlog.
    pub ticks_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// A named, cancelable, fixed-period tick source.
///
/// One scheduler per concern; the name shows up in logs so overlapping
/// timers are traceable to their owner.
pub struct TickScheduler {
    name: &'static str,
    period: Option<Duration>,
    tick_count: u64,
    /// When the next tick should fire. `None` while disabled.
    next_tick: Option<TokioInstant>,
    paused: bool,
}

impl TickScheduler {
    /// Creates a scheduler firing every `period`.
    ///
    /// A zero period creates a disabled scheduler (never fires); use
    /// [`TickScheduler::disabled`] to say that explicitly.
    pub fn new(name: &'static str, period: Duration) -> Self {
        let period = (!period.is_zero()).then_some(period);
        let next_tick = period.map(|p| TokioInstant::now() + p);

        match period {
            Some(p) => debug!(name, period_ms = p.as_millis() as u64, "tick scheduler created"),
            None => debug!(name, "tick scheduler created disabled"),
        }

        Self {
            name,
            period,
            tick_count: 0,
            next_tick,
            paused: false,
        }
    }

    /// Creates a scheduler that never fires until [`restart`](Self::restart)ed.
    pub fn disabled(name: &'static str) -> Self {
        Self::new(name, Duration::ZERO)
    }

    /// Waits until the next tick is due.
    ///
    /// Pends forever while disabled or paused; `select!` keeps servicing
    /// its other branches.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let (next, period) = match (self.next_tick, self.period) {
            (Some(next), Some(period)) if !self.paused => (next, period),
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        let now = TokioInstant::now();
        self.tick_count += 1;

        // If the loop stalled for more than a period, skip the backlog
        // and resume the cadence from now. Replaying missed ticks would
        // compress hours of decay into one burst.
        let late_by = now.saturating_duration_since(next);
        let ticks_skipped = if late_by >= period {
            let skipped = (late_by.as_nanos() / period.as_nanos()) as u64;
            warn!(
                name = self.name,
                tick = self.tick_count,
                skipped,
                late_ms = late_by.as_millis() as u64,
                "tick overran its period, skipping ahead"
            );
            skipped
        } else {
            0
        };
        self.next_tick = Some(now + period);

        trace!(name = self.name, tick = self.tick_count, "tick fired");

        TickInfo {
            tick: self.tick_count,
            dt: period,
            ticks_skipped,
        }
    }

    /// Replaces the schedule with a fresh one at `period`, canceling the
    /// pending deadline and resetting the tick counter.
    ///
    /// This is the cancel-before-start primitive: re-entering a room
    /// restarts its scheduler instead of stacking a second interval.
    /// A zero period disables the scheduler.
    pub fn restart(&mut self, period: Duration) {
        self.period = (!period.is_zero()).then_some(period);
        self.next_tick = self.period.map(|p| TokioInstant::now() + p);
        self.tick_count = 0;
        self.paused = false;
        debug!(
            name = self.name,
            period_ms = period.as_millis() as u64,
            "tick scheduler restarted"
        );
    }

    /// Disables the scheduler without consuming it. Equivalent to
    /// `restart(Duration::ZERO)` but keeps the tick counter for logs.
    pub fn cancel(&mut self) {
        if self.period.take().is_some() {
            self.next_tick = None;
            debug!(name = self.name, tick = self.tick_count, "tick scheduler canceled");
        }
    }

    /// Pauses the scheduler. `wait_for_tick` pends until
    /// [`resume`](Self::resume). Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(name = self.name, tick = self.tick_count, "tick scheduler paused");
        }
    }

    /// Resumes after a pause.
    ///
    /// The next deadline is reset to `now + period` so time spent paused
    /// doesn't burst out as catch-up ticks.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            if let Some(period) = self.period {
                self.next_tick = Some(TokioInstant::now() + period);
            }
            debug!(name = self.name, tick = self.tick_count, "tick scheduler resumed");
        }
    }

    /// Whether the scheduler is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the scheduler has a period and will fire.
    pub fn is_enabled(&self) -> bool {
        self.period.is_some()
    }

    /// The scheduler's name (as shown in logs).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ticks fired since creation or the last restart.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The fixed period, or `None` while disabled.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

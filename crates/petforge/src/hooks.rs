//! Collaborator hooks: the outward-facing side effects the core triggers
//! but doesn't implement.
//!
//! Petforge doesn't render notifications, decode audio, or synthesize
//! speech. It defines one trait per collaborator and calls it at the
//! right moments; the host app plugs in the platform implementation, a
//! dev build plugs in loggers, and tests plug in recorders.
//!
//! Every hook is fire-and-forget by contract: implementations swallow
//! and log their own failures. A broken speaker must never block or
//! corrupt a game-state transition, which is why none of these methods
//! return a `Result`.

use tracing::debug;

/// A short sound effect the engine can ask for.
///
/// Cues name the moment, not the asset; the player maps them to clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Attention tone (low-energy alert, sleeping notice).
    Notif,
    /// Celebration (perfect quiz score).
    Win,
    /// A card turning over.
    Flip,
    /// A pair matched, or a gacha row win.
    Match,
    /// The match game ran out of time.
    GameOver,
    /// Big success fanfare (match win, gacha jackpot).
    LevelUp,
    /// The gacha reels rolling.
    Spin,
}

/// Delivers an immediate, push-style alert to the user.
pub trait AlertSink: Send + Sync + 'static {
    /// Fire-and-forget; failures are the implementation's to log.
    fn alert(&self, title: &str, body: &str);
}

/// Plays short sound effects.
pub trait SoundPlayer: Send + Sync + 'static {
    /// Fire-and-forget; playback is asynchronous and the clip unloads
    /// itself when done.
    fn play(&self, cue: SoundCue);
}

/// Speaks text aloud (the reading trainer's voice).
pub trait SpeechSynth: Send + Sync + 'static {
    /// Fire-and-forget.
    fn speak(&self, text: &str);
    /// Cuts any utterance in flight.
    fn stop(&self);
}

// ---------------------------------------------------------------------------
// Default (no-op) implementations
// ---------------------------------------------------------------------------

/// Discards alerts, logging them at debug. The builder's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlerts;

impl AlertSink for NoopAlerts {
    fn alert(&self, title: &str, body: &str) {
        debug!(title, body, "alert (no sink installed)");
    }
}

/// Discards sound cues, logging them at debug. The builder's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSounds;

impl SoundPlayer for NoopSounds {
    fn play(&self, cue: SoundCue) {
        debug!(?cue, "sound (no player installed)");
    }
}

/// Discards speech, logging it at debug. The builder's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpeech;

impl SpeechSynth for NoopSpeech {
    fn speak(&self, text: &str) {
        debug!(text, "speak (no synth installed)");
    }

    fn stop(&self) {
        debug!("speech stop (no synth installed)");
    }
}

//! The Library's letter-reading trainer: A through Z, one letter every
//! 1.5 seconds, spoken aloud.
//!
//! The session only sequences; actually voicing a letter is the speech
//! collaborator's job, triggered by the [`ReadingEvent::Speak`] events.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use petforge_room::MiniGame;

/// The letters read out, in order.
pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed trainer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Time between letters. Default: 1.5 seconds.
    pub interval: Duration,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1_500),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Reading-trainer session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingState {
    /// Index of the letter currently shown.
    pub current_index: usize,
    pub playing: bool,
    /// Accumulator toward the next advance.
    carry: Duration,
    /// Copied from config at init.
    interval: Duration,
}

impl ReadingState {
    /// The letter currently shown.
    pub fn current_letter(&self) -> char {
        LETTERS[self.current_index]
    }
}

/// Player actions.
#[derive(Debug, Clone, Copy)]
pub enum ReadingAction {
    /// Start (or resume) reading from the current letter.
    Play,
    /// Stop reading and cut speech.
    Pause,
}

/// Trainer outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingEvent {
    /// Voice this letter now.
    Speak { letter: char },
    /// Playback stopped on request; stop any speech in flight.
    Paused,
    /// The last letter was read; playback stopped on its own.
    Completed,
}

/// The Library's game.
pub struct ReadingGame;

impl MiniGame for ReadingGame {
    type Config = ReadingConfig;
    type State = ReadingState;
    type Action = ReadingAction;
    type Event = ReadingEvent;

    fn init(config: &ReadingConfig) -> ReadingState {
        ReadingState {
            current_index: 0,
            playing: false,
            carry: Duration::ZERO,
            interval: config.interval,
        }
    }

    fn validate_action(state: &ReadingState, action: &ReadingAction) -> Result<(), String> {
        match action {
            ReadingAction::Play if state.playing => Err("already playing".into()),
            ReadingAction::Pause if !state.playing => Err("not playing".into()),
            _ => Ok(()),
        }
    }

    fn handle_action(state: &mut ReadingState, action: ReadingAction) -> Vec<ReadingEvent> {
        match action {
            ReadingAction::Play => {
                state.playing = true;
                state.carry = Duration::ZERO;
                vec![ReadingEvent::Speak {
                    letter: state.current_letter(),
                }]
            }
            ReadingAction::Pause => {
                state.playing = false;
                vec![ReadingEvent::Paused]
            }
        }
    }

    fn tick(state: &mut ReadingState, dt: Duration) -> Vec<ReadingEvent> {
        if !state.playing {
            return Vec::new();
        }

        let mut events = Vec::new();
        state.carry += dt;
        while state.carry >= state.interval {
            state.carry -= state.interval;

            if state.current_index + 1 < LETTERS.len() {
                state.current_index += 1;
                events.push(ReadingEvent::Speak {
                    letter: state.current_letter(),
                });
            } else {
                state.playing = false;
                events.push(ReadingEvent::Completed);
                break;
            }
        }
        events
    }

    fn is_finished(_state: &ReadingState) -> bool {
        // The trainer can always be replayed; reset restarts from A.
        false
    }
}

// =========================================================================
// Tests
// =========================================================================

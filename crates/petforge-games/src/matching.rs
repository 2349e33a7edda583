//! The Matching room: six symbol pairs against a sixty-second clock.
//!
//! Timing note: the session never owns a timer. The mismatch flip-back
//! delay and the countdown are both deadlines advanced by `tick(dt)` from
//! the engine's game ticker, which is what keeps Won/TimedOut mutually
//! exclusive: whichever is reached first flips the phase, and every later
//! tick sees a frozen board.

use std::time::Duration;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use petforge_room::MiniGame;

/// The six card symbols; the board holds each exactly twice.
pub const SYMBOLS: [char; 6] = ['🍎', '🍌', '🍇', '🍓', '🍍', '🥝'];

/// Cards on the board (two per symbol).
pub const BOARD_SIZE: usize = SYMBOLS.len() * 2;

/// Pair evaluator: two cards match when their symbols are equal.
pub fn is_match(a: &Card, b: &Card) -> bool {
    a.symbol == b.symbol
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed match-game settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Countdown duration. Default: 60 seconds.
    pub duration: Duration,
    /// How long a mismatched pair stays face-up before flipping back.
    /// Default: 800 milliseconds.
    pub flip_back_delay: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
            flip_back_delay: Duration::from_millis(800),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable id, equal to the card's board position.
    pub id: usize,
    pub symbol: char,
    /// Face-up? Matched cards stay face-up permanently.
    pub flipped: bool,
    pub matched: bool,
}

/// Where the session is in its lifecycle. `Won` and `TimedOut` are
/// terminal and mutually exclusive: whichever is reached first sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    Won,
    TimedOut,
}

/// Match session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub cards: Vec<Card>,
    /// Ids of face-up cards awaiting resolution. At most two; a
    /// mismatched pair stays here until the flip-back delay clears it,
    /// which is exactly what rejects flips during the delay.
    pub flipped: Vec<usize>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub time_remaining_secs: u32,
    pub phase: MatchPhase,
    /// Remaining flip-back delay for a pending mismatched pair.
    flip_back: Option<Duration>,
    /// Sub-second accumulator toward the next countdown decrement.
    second_carry: Duration,
    /// Copied from config at init so `tick` can re-arm the delay.
    flip_back_delay: Duration,
}

/// A player tapping a card.
#[derive(Debug, Clone, Copy)]
pub struct Flip {
    pub index: usize,
}

/// Match outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// A card turned face-up (plays the flip sound).
    CardFlipped { index: usize },
    /// The pending pair matched (plays the match sound).
    PairMatched { a: usize, b: usize },
    /// The pending pair didn't match; it will flip back after the delay.
    PairMismatched { a: usize, b: usize },
    /// The mismatch delay elapsed and both cards went face-down again.
    FlippedBack { a: usize, b: usize },
    /// One second elapsed on the countdown.
    TimerTick { remaining_secs: u32 },
    /// All pairs found. The countdown stops, whatever was left on it.
    Won { moves: u32 },
    /// The countdown hit zero with the board incomplete. Board frozen.
    TimedOut,
}

/// The Matching room's game.
pub struct MatchingGame;

impl MiniGame for MatchingGame {
    type Config = MatchConfig;
    type State = MatchState;
    type Action = Flip;
    type Event = MatchEvent;

    fn init(config: &MatchConfig) -> MatchState {
        // Two of each symbol, uniformly shuffled; ids are assigned after
        // the shuffle so id always equals board position.
        let mut symbols: Vec<char> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        symbols.shuffle(&mut rand::rng());

        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card {
                id,
                symbol,
                flipped: false,
                matched: false,
            })
            .collect();

        MatchState {
            cards,
            flipped: Vec::new(),
            moves: 0,
            matched_pairs: 0,
            time_remaining_secs: config.duration.as_secs() as u32,
            phase: MatchPhase::Playing,
            flip_back: None,
            second_carry: Duration::ZERO,
            flip_back_delay: config.flip_back_delay,
        }
    }

    fn validate_action(state: &MatchState, action: &Flip) -> Result<(), String> {
        if state.phase != MatchPhase::Playing {
            return Err("game has ended".into());
        }
        let card = state
            .cards
            .get(action.index)
            .ok_or_else(|| format!("no card at index {}", action.index))?;
        if state.flipped.len() == 2 {
            return Err("two cards already awaiting resolution".into());
        }
        if card.matched {
            return Err("card already matched".into());
        }
        if card.flipped {
            return Err("card already face-up".into());
        }
        Ok(())
    }

    fn handle_action(state: &mut MatchState, action: Flip) -> Vec<MatchEvent> {
        let index = action.index;
        state.cards[index].flipped = true;
        state.moves += 1;
        state.flipped.push(index);

        let mut events = vec![MatchEvent::CardFlipped { index }];

        if state.flipped.len() < 2 {
            return events;
        }

        // Second card: resolve synchronously against the evaluator.
        let (a, b) = (state.flipped[0], state.flipped[1]);
        if is_match(&state.cards[a], &state.cards[b]) {
            state.cards[a].matched = true;
            state.cards[b].matched = true;
            state.flipped.clear();
            state.matched_pairs += 1;
            events.push(MatchEvent::PairMatched { a, b });

            if state.matched_pairs == SYMBOLS.len() {
                state.phase = MatchPhase::Won;
                debug!(moves = state.moves, "board cleared");
                events.push(MatchEvent::Won { moves: state.moves });
            }
        } else {
            // The pair stays pending (and keeps further flips rejected)
            // until the delay clears it in `tick`.
            state.flip_back = Some(state.flip_back_delay);
            events.push(MatchEvent::PairMismatched { a, b });
        }

        events
    }

    fn tick(state: &mut MatchState, dt: Duration) -> Vec<MatchEvent> {
        if state.phase != MatchPhase::Playing {
            return Vec::new();
        }

        let mut events = Vec::new();

        // Mismatch flip-back delay.
        if let Some(remaining) = state.flip_back {
            if dt >= remaining {
                state.flip_back = None;
                let pending: Vec<usize> = state.flipped.drain(..).collect();
                for &index in &pending {
                    state.cards[index].flipped = false;
                }
                if let [a, b] = pending[..] {
                    events.push(MatchEvent::FlippedBack { a, b });
                }
            } else {
                state.flip_back = Some(remaining - dt);
            }
        }

        // Countdown, decremented once per whole second.
        state.second_carry += dt;
        while state.second_carry >= Duration::from_secs(1) && state.time_remaining_secs > 0 {
            state.second_carry -= Duration::from_secs(1);
            state.time_remaining_secs -= 1;
            events.push(MatchEvent::TimerTick {
                remaining_secs: state.time_remaining_secs,
            });

            if state.time_remaining_secs == 0 {
                state.phase = MatchPhase::TimedOut;
                debug!(
                    matched_pairs = state.matched_pairs,
                    "clock ran out with an incomplete board"
                );
                events.push(MatchEvent::TimedOut);
                break;
            }
        }

        events
    }

    fn is_finished(state: &MatchState) -> bool {
        state.phase != MatchPhase::Playing
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use petforge_room::GameSession;

    const TICK: Duration = Duration::from_millis(100);

    fn session() -> GameSession<MatchingGame> {
        GameSession::with_defaults()
    }

    /// Two board indices holding the same symbol.
    fn find_pair(state: &MatchState) -> (usize, usize) {
        for symbol in SYMBOLS {
            let positions: Vec<usize> = state
                .cards
                .iter()
                .filter(|c| c.symbol == symbol && !c.matched)
                .map(|c| c.id)
                .collect();
            if let [a, b] = positions[..] {
                return (a, b);
            }
        }
        panic!("no unmatched pair left");
    }

    /// Two board indices holding different symbols.
    fn find_mismatch(state: &MatchState) -> (usize, usize) {
        let first = &state.cards[0];
        let other = state
            .cards
            .iter()
            .find(|c| c.symbol != first.symbol)
            .expect("board has more than one symbol");
        (first.id, other.id)
    }

    fn match_all_pairs(s: &mut GameSession<MatchingGame>) {
        for _ in 0..SYMBOLS.len() {
            let (a, b) = find_pair(s.state());
            s.act(Flip { index: a });
            s.act(Flip { index: b });
        }
    }

    // =====================================================================
    // Board setup
    // =====================================================================

    #[test]
    fn test_init_builds_shuffled_pair_board() {
        let s = session();
        let state = s.state();

        assert_eq!(state.cards.len(), BOARD_SIZE);
        for symbol in SYMBOLS {
            let count = state.cards.iter().filter(|c| c.symbol == symbol).count();
            assert_eq!(count, 2, "symbol {symbol}");
        }
        assert!(state.cards.iter().all(|c| !c.flipped && !c.matched));
        assert_eq!(state.time_remaining_secs, 60);
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_card_ids_equal_positions() {
        let s = session();
        for (position, card) in s.state().cards.iter().enumerate() {
            assert_eq!(card.id, position);
        }
    }

    // =====================================================================
    // Flipping and matching
    // =====================================================================

    #[test]
    fn test_first_flip_counts_a_move() {
        let mut s = session();
        let events = s.act(Flip { index: 0 });

        assert_eq!(events, vec![MatchEvent::CardFlipped { index: 0 }]);
        assert!(s.state().cards[0].flipped);
        assert_eq!(s.state().moves, 1);
    }

    #[test]
    fn test_matching_pair_locks_both_cards() {
        let mut s = session();
        let (a, b) = find_pair(s.state());

        s.act(Flip { index: a });
        let events = s.act(Flip { index: b });

        assert!(events.contains(&MatchEvent::PairMatched { a, b }));
        assert!(s.state().cards[a].matched);
        assert!(s.state().cards[b].matched);
        assert!(s.state().flipped.is_empty(), "pending pair cleared immediately");
        assert_eq!(s.state().matched_pairs, 1);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay_leaving_board_unchanged() {
        let mut s = session();
        let symbols_before: Vec<char> = s.state().cards.iter().map(|c| c.symbol).collect();
        let (a, b) = find_mismatch(s.state());

        s.act(Flip { index: a });
        let events = s.act(Flip { index: b });
        assert!(events.contains(&MatchEvent::PairMismatched { a, b }));

        // During the delay both stay face-up.
        let events = s.tick(Duration::from_millis(400));
        assert!(events.is_empty());
        assert!(s.state().cards[a].flipped);

        // Past the delay both flip back; nothing else changed.
        let events = s.tick(Duration::from_millis(400));
        assert!(events.contains(&MatchEvent::FlippedBack { a, b }));
        assert!(!s.state().cards[a].flipped);
        assert!(!s.state().cards[b].flipped);
        assert!(!s.state().cards[a].matched);
        assert!(!s.state().cards[b].matched);
        assert_eq!(s.state().moves, 2, "the two flips still count as moves");
        let symbols_after: Vec<char> = s.state().cards.iter().map(|c| c.symbol).collect();
        assert_eq!(symbols_after, symbols_before);
    }

    #[test]
    fn test_no_flips_accepted_during_mismatch_delay() {
        let mut s = session();
        let (a, b) = find_mismatch(s.state());
        s.act(Flip { index: a });
        s.act(Flip { index: b });

        // Find a third card and try to flip it mid-delay.
        let third = s
            .state()
            .cards
            .iter()
            .find(|c| c.id != a && c.id != b)
            .unwrap()
            .id;
        let events = s.act(Flip { index: third });

        assert!(events.is_empty());
        assert!(!s.state().cards[third].flipped);
        assert_eq!(s.state().moves, 2);
    }

    #[test]
    fn test_reflip_of_face_up_card_rejected() {
        let mut s = session();
        s.act(Flip { index: 3 });

        let events = s.act(Flip { index: 3 });
        assert!(events.is_empty());
        assert_eq!(s.state().moves, 1);
    }

    #[test]
    fn test_flip_of_matched_card_rejected() {
        let mut s = session();
        let (a, b) = find_pair(s.state());
        s.act(Flip { index: a });
        s.act(Flip { index: b });

        let events = s.act(Flip { index: a });
        assert!(events.is_empty());
        assert_eq!(s.state().moves, 2);
    }

    #[test]
    fn test_out_of_bounds_flip_rejected() {
        let mut s = session();
        let events = s.act(Flip { index: 99 });
        assert!(events.is_empty());
        assert_eq!(s.state().moves, 0);
    }

    // =====================================================================
    // Winning
    // =====================================================================

    #[test]
    fn test_matching_all_pairs_wins_regardless_of_clock() {
        let mut s = session();
        // Burn some clock first so there's visibly time left at the win.
        s.tick(Duration::from_secs(10));
        assert_eq!(s.state().time_remaining_secs, 50);

        match_all_pairs(&mut s);

        assert_eq!(s.state().phase, MatchPhase::Won);
        assert!(s.is_finished());
        assert_eq!(s.state().matched_pairs, SYMBOLS.len());
    }

    #[test]
    fn test_won_stops_the_timer() {
        let mut s = session();
        match_all_pairs(&mut s);
        let remaining = s.state().time_remaining_secs;

        let events = s.tick(Duration::from_secs(5));

        assert!(events.is_empty());
        assert_eq!(s.state().time_remaining_secs, remaining);
    }

    #[test]
    fn test_win_event_reports_moves() {
        let mut s = session();
        match_all_pairs(&mut s);

        // 6 pairs at 2 flips each, all matches, no retries.
        assert_eq!(s.state().moves, 12);
    }

    // =====================================================================
    // Countdown and timeout
    // =====================================================================

    #[test]
    fn test_countdown_decrements_once_per_second() {
        let mut s = session();

        let events = s.tick(Duration::from_millis(2_500));

        assert_eq!(s.state().time_remaining_secs, 58);
        assert_eq!(
            events,
            vec![
                MatchEvent::TimerTick { remaining_secs: 59 },
                MatchEvent::TimerTick { remaining_secs: 58 },
            ]
        );

        // The half second carries over.
        s.tick(Duration::from_millis(500));
        assert_eq!(s.state().time_remaining_secs, 57);
    }

    #[test]
    fn test_clock_exhaustion_times_out_and_freezes() {
        let mut s = session();

        let events = s.tick(Duration::from_secs(60));

        assert_eq!(s.state().phase, MatchPhase::TimedOut);
        assert!(events.contains(&MatchEvent::TimedOut));
        assert!(s.is_finished());

        // Frozen: flips rejected, further ticks change nothing.
        let events = s.act(Flip { index: 0 });
        assert!(events.is_empty());
        let events = s.tick(Duration::from_secs(5));
        assert!(events.is_empty());
        assert_eq!(s.state().time_remaining_secs, 0);
    }

    #[test]
    fn test_timeout_with_pending_mismatch_freezes_as_is() {
        let mut s = session();
        let (a, b) = find_mismatch(s.state());
        s.act(Flip { index: a });
        s.act(Flip { index: b });

        // Run the clock out. The flip-back resolves first (800 ms into
        // the minute), then the timeout freezes whatever is left.
        s.tick(Duration::from_secs(60));

        assert_eq!(s.state().phase, MatchPhase::TimedOut);
        assert!(!s.state().cards[a].matched);
        assert!(!s.state().cards[b].matched);
    }

    // =====================================================================
    // Reset
    // =====================================================================

    #[test]
    fn test_reset_restores_fresh_board_and_clock() {
        let mut s = session();
        let (a, b) = find_pair(s.state());
        s.act(Flip { index: a });
        s.act(Flip { index: b });
        s.tick(Duration::from_secs(7));

        s.reset();

        let state = s.state();
        assert_eq!(state.moves, 0);
        assert_eq!(state.matched_pairs, 0);
        assert_eq!(state.time_remaining_secs, 60);
        assert_eq!(state.phase, MatchPhase::Playing);
        assert!(state.flipped.is_empty());
        assert!(state.cards.iter().all(|c| !c.flipped && !c.matched));
    }
}

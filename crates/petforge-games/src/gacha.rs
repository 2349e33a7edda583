//! The Gacha room: a 3×4 slot grid with a priority payout rule.
//!
//! Payout rules, checked in strict priority (first hit wins, never both):
//!
//! 1. **Jackpot**: any symbol appearing 5 or more times anywhere on the
//!    board pays the fixed jackpot amount. If several symbols qualify,
//!    the one whose cell comes first in board order wins. That tie-break
//!    is an inherited quirk of the original rule's iteration order, kept
//!    as-is rather than redesigned.
//! 2. **Full rows**: each row whose four cells share one symbol pays the
//!    per-row amount; the total is per-row × winning rows.
//! 3. Otherwise: no win.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use petforge_room::MiniGame;

/// The symbol set cells are drawn from, uniformly and independently.
pub const SYMBOLS: [char; 10] = ['🍎', '🍌', '🍇', '🍓', '🍍', '🥝', '🍒', '🍉', '💎', '🔔'];

/// Board rows.
pub const ROWS: usize = 3;
/// Board columns.
pub const COLS: usize = 4;
/// Total cells.
pub const CELLS: usize = ROWS * COLS;

/// Minimum identical symbols anywhere on the board for the jackpot rule.
pub const JACKPOT_MIN_COUNT: usize = 5;

/// Cycles in one bulk spin.
pub const BULK_SPINS: u32 = 10;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed gacha settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaConfig {
    /// Balance a fresh (or reset) session starts with.
    pub starting_balance: u32,
    /// Cost of one spin; a bulk spin costs ten of these.
    pub spin_cost: u32,
    /// Payout of the jackpot rule.
    pub jackpot_amount: u32,
    /// Payout per fully-matching row.
    pub per_row_amount: u32,
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self {
            starting_balance: 100,
            spin_cost: 5,
            jackpot_amount: 10,
            per_row_amount: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Which rule fired for a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinOutcome {
    /// Rule 1 fired for `symbol`, which appears `count` (≥ 5) times.
    Jackpot { symbol: char, count: usize },
    /// Rule 2 fired for these row indices (rule 1 did not).
    RowWin { rows: Vec<usize> },
    /// Neither rule fired.
    NoWin,
}

/// The full result of evaluating one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinResult {
    pub outcome: SpinOutcome,
    pub payout: u32,
    /// Fully-matching rows this spin (0 unless the row rule fired).
    pub rows_won: u32,
    /// Cells to highlight: every cell of the jackpot symbol, or the
    /// union of all winning rows' cells.
    pub winning_cells: BTreeSet<usize>,
}

/// Evaluates a board against the payout rules. Pure: same board, same
/// config, same result.
pub fn evaluate_spin(board: &[char], config: &GachaConfig) -> SpinResult {
    debug_assert_eq!(board.len(), CELLS);

    // Rule 1: five-or-more identical, anywhere. Scanning cells in board
    // order and taking the first whose symbol qualifies is what produces
    // the documented first-in-board-order tie-break.
    for &symbol in board {
        let count = board.iter().filter(|&&s| s == symbol).count();
        if count >= JACKPOT_MIN_COUNT {
            let winning_cells = board
                .iter()
                .enumerate()
                .filter(|&(_, &s)| s == symbol)
                .map(|(i, _)| i)
                .collect();
            return SpinResult {
                outcome: SpinOutcome::Jackpot { symbol, count },
                payout: config.jackpot_amount,
                rows_won: 0,
                winning_cells,
            };
        }
    }

    // Rule 2: fully-matching rows, each judged independently.
    let mut rows = Vec::new();
    let mut winning_cells = BTreeSet::new();
    for row in 0..ROWS {
        let start = row * COLS;
        let cells = &board[start..start + COLS];
        if cells.iter().all(|&s| s == cells[0]) {
            rows.push(row);
            winning_cells.extend(start..start + COLS);
        }
    }

    if !rows.is_empty() {
        let rows_won = rows.len() as u32;
        return SpinResult {
            outcome: SpinOutcome::RowWin { rows },
            payout: config.per_row_amount * rows_won,
            rows_won,
            winning_cells,
        };
    }

    SpinResult {
        outcome: SpinOutcome::NoWin,
        payout: 0,
        rows_won: 0,
        winning_cells: BTreeSet::new(),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Gacha session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaState {
    pub balance: u32,
    /// The displayed board, row-major. After a bulk spin this is the
    /// final cycle's board.
    pub board: Vec<char>,
    pub spins: u32,
    /// Running total of fully-matching rows across the session.
    pub row_wins: u32,
    /// Cells highlighted from the most recent winning spin.
    pub winning_cells: BTreeSet<usize>,
    config: GachaConfig,
}

/// Player actions.
#[derive(Debug, Clone, Copy)]
pub enum GachaAction {
    /// One paid spin.
    Spin,
    /// Ten independent paid cycles, charged up front as a whole.
    SpinTen,
}

/// Gacha outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GachaEvent {
    /// The spin was refused: not enough money. Nothing changed.
    InsufficientBalance { required: u32, balance: u32 },
    /// A single spin resolved (board rerolled, payout credited).
    Spun { payout: u32, balance: u32 },
    /// The jackpot rule fired (plays the jackpot sound).
    Jackpot { symbol: char, count: usize, payout: u32 },
    /// The row rule fired (plays the win sound).
    RowWin { rows_won: u32, payout: u32 },
    /// A bulk spin resolved, with one summary line per cycle.
    BulkSpun {
        summaries: Vec<String>,
        total_payout: u32,
        balance: u32,
    },
}

/// The Gacha room's game.
pub struct GachaGame;

impl GachaGame {
    fn reroll() -> Vec<char> {
        let mut rng = rand::rng();
        (0..CELLS)
            .map(|_| SYMBOLS[rng.random_range(0..SYMBOLS.len())])
            .collect()
    }

    fn outcome_events(result: &SpinResult, events: &mut Vec<GachaEvent>) {
        match &result.outcome {
            SpinOutcome::Jackpot { symbol, count } => events.push(GachaEvent::Jackpot {
                symbol: *symbol,
                count: *count,
                payout: result.payout,
            }),
            SpinOutcome::RowWin { .. } => events.push(GachaEvent::RowWin {
                rows_won: result.rows_won,
                payout: result.payout,
            }),
            SpinOutcome::NoWin => {}
        }
    }

    fn summary_line(index: u32, result: &SpinResult) -> String {
        match &result.outcome {
            SpinOutcome::Jackpot { symbol, count } => format!(
                "Spin {index}: JACKPOT! You got {count}x {symbol}! You won ${}.",
                result.payout
            ),
            SpinOutcome::RowWin { rows } => {
                let plural = if rows.len() > 1 { "s" } else { "" };
                format!(
                    "Spin {index}: {} full row{plural} matched. You won ${}.",
                    rows.len(),
                    result.payout
                )
            }
            SpinOutcome::NoWin => format!("Spin {index}: No win."),
        }
    }
}

impl MiniGame for GachaGame {
    type Config = GachaConfig;
    type State = GachaState;
    type Action = GachaAction;
    type Event = GachaEvent;

    fn init(config: &GachaConfig) -> GachaState {
        GachaState {
            balance: config.starting_balance,
            board: Self::reroll(),
            spins: 0,
            row_wins: 0,
            winning_cells: BTreeSet::new(),
            config: config.clone(),
        }
    }

    fn handle_action(state: &mut GachaState, action: GachaAction) -> Vec<GachaEvent> {
        match action {
            GachaAction::Spin => {
                let cost = state.config.spin_cost;
                if state.balance < cost {
                    // Refused as a whole: no debit, no reroll, no counter.
                    return vec![GachaEvent::InsufficientBalance {
                        required: cost,
                        balance: state.balance,
                    }];
                }

                state.balance -= cost;
                state.board = Self::reroll();
                let result = evaluate_spin(&state.board, &state.config);
                state.balance += result.payout;
                state.spins += 1;
                state.row_wins += result.rows_won;
                state.winning_cells = result.winning_cells.clone();

                let mut events = vec![GachaEvent::Spun {
                    payout: result.payout,
                    balance: state.balance,
                }];
                Self::outcome_events(&result, &mut events);
                events
            }

            GachaAction::SpinTen => {
                let total_cost = state.config.spin_cost * BULK_SPINS;
                if state.balance < total_cost {
                    return vec![GachaEvent::InsufficientBalance {
                        required: total_cost,
                        balance: state.balance,
                    }];
                }

                state.balance -= total_cost;

                let mut events = Vec::new();
                let mut summaries = Vec::with_capacity(BULK_SPINS as usize);
                let mut total_payout = 0;
                let mut total_rows = 0;

                for cycle in 1..=BULK_SPINS {
                    state.board = Self::reroll();
                    let result = evaluate_spin(&state.board, &state.config);
                    total_payout += result.payout;
                    total_rows += result.rows_won;
                    summaries.push(Self::summary_line(cycle, &result));
                    Self::outcome_events(&result, &mut events);
                    // Only the final cycle's highlight survives for display.
                    state.winning_cells = result.winning_cells;
                }

                state.balance += total_payout;
                state.spins += BULK_SPINS;
                state.row_wins += total_rows;
                debug!(total_payout, balance = state.balance, "bulk spin resolved");

                events.push(GachaEvent::BulkSpun {
                    summaries,
                    total_payout,
                    balance: state.balance,
                });
                events
            }
        }
    }

    fn is_finished(_state: &GachaState) -> bool {
        // The gacha never ends; you just run out of money.
        false
    }
}

// =========================================================================
// Tests
// =========================================================================

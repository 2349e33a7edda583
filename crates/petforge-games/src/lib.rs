//! The mini-games hosted by Petforge's rooms.
//!
//! Each module pairs a pure outcome evaluator (plain functions over plain
//! data, no clocks, no randomness) with a [`MiniGame`](petforge_room::MiniGame)
//! implementation that owns the session bookkeeping around it:
//!
//! | Room         | Module       | Evaluator                         |
//! |--------------|--------------|-----------------------------------|
//! | Library      | [`reading`]  | (none, pure sequencing)           |
//! | Math Room    | [`quiz`]     | [`quiz::grade`]                   |
//! | Drawing Room | [`drawing`]  | (none, pure state)                |
//! | Matching     | [`matching`] | [`matching::is_match`]            |
//! | Puzzle       | [`puzzle`]   | [`puzzle::slot_accepts`]          |
//! | Gacha        | [`gacha`]    | [`gacha::evaluate_spin`]          |
//!
//! Randomness (board shuffles, symbol rolls) lives only in `init` and the
//! spin/reset paths; every payout and acceptance decision is testable on
//! a rigged board through the evaluator alone.

pub mod drawing;
pub mod gacha;
pub mod geom;
pub mod matching;
pub mod puzzle;
pub mod quiz;
pub mod reading;

pub use drawing::DrawingGame;
pub use gacha::GachaGame;
pub use geom::Point;
pub use matching::MatchingGame;
pub use puzzle::PuzzleGame;
pub use quiz::QuizGame;
pub use reading::ReadingGame;

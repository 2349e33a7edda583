//! The Math Room quiz: ten fixed arithmetic questions, two choices each.

use serde::{Deserialize, Serialize};

use petforge_room::MiniGame;

/// One quiz question: a prompt, exactly two answer options, and the
/// correct value (always one of the two options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [i32; 2],
    pub correct: i32,
}

/// The fixed ten-question bank, in presentation order.
pub const QUESTION_BANK: [Question; 10] = [
    Question { prompt: "2 + 3 = ?", options: [5, 6], correct: 5 },
    Question { prompt: "7 - 4 = ?", options: [3, 2], correct: 3 },
    Question { prompt: "5 + 6 = ?", options: [10, 11], correct: 11 },
    Question { prompt: "9 - 5 = ?", options: [3, 4], correct: 4 },
    Question { prompt: "8 + 1 = ?", options: [9, 8], correct: 9 },
    Question { prompt: "10 - 6 = ?", options: [5, 4], correct: 4 },
    Question { prompt: "3 + 4 = ?", options: [7, 8], correct: 7 },
    Question { prompt: "6 - 1 = ?", options: [4, 5], correct: 5 },
    Question { prompt: "1 + 7 = ?", options: [8, 9], correct: 8 },
    Question { prompt: "5 - 3 = ?", options: [1, 2], correct: 2 },
];

/// Grades one answer: exact equality against the question's correct value.
pub fn grade(selected: i32, question: &Question) -> bool {
    selected == question.correct
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Quiz session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizState {
    /// Index of the question currently shown, `0..bank len` while
    /// running; equals the bank length once finished.
    pub current_index: usize,
    /// Correct answers so far.
    pub score: u32,
    /// Set when the last question has been answered.
    pub finished: bool,
}

/// A player answering the current question.
#[derive(Debug, Clone, Copy)]
pub struct Answer {
    pub selected: i32,
}

/// Quiz outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// The current question was graded; the session moved on either way.
    Graded {
        question_index: usize,
        correct: bool,
    },
    /// The bank is exhausted. `perfect` means a celebratory modal and
    /// the win sound; otherwise the plain finish screen, no sound.
    Finished { score: u32, perfect: bool },
}

/// The Math Room's game.
pub struct QuizGame;

impl MiniGame for QuizGame {
    type Config = ();
    type State = QuizState;
    type Action = Answer;
    type Event = QuizEvent;

    fn init(_config: &()) -> QuizState {
        QuizState {
            current_index: 0,
            score: 0,
            finished: false,
        }
    }

    fn validate_action(state: &QuizState, _action: &Answer) -> Result<(), String> {
        if state.finished {
            return Err("quiz already finished".into());
        }
        Ok(())
    }

    fn handle_action(state: &mut QuizState, action: Answer) -> Vec<QuizEvent> {
        let question = &QUESTION_BANK[state.current_index];
        let correct = grade(action.selected, question);

        // Score is committed before the finish check below reads it, so
        // the perfect-score decision always includes this last answer.
        if correct {
            state.score += 1;
        }

        let mut events = vec![QuizEvent::Graded {
            question_index: state.current_index,
            correct,
        }];

        state.current_index += 1;
        if state.current_index >= QUESTION_BANK.len() {
            state.finished = true;
            events.push(QuizEvent::Finished {
                score: state.score,
                perfect: state.score == QUESTION_BANK.len() as u32,
            });
        }

        events
    }

    fn is_finished(state: &QuizState) -> bool {
        state.finished
    }
}

// =========================================================================
// Tests
// =========================================================================

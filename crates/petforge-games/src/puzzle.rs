//! The Puzzle room: a 2×2 jigsaw with designated slots.
//!
//! Core owns only the accept/reject decision and the placement set.
//! Spring-back of a rejected piece is presentation: the caller keeps the
//! piece wherever it last was, which is why a rejected drop mutates
//! nothing here.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use petforge_room::MiniGame;

use crate::geom::{Point, Rect};

/// Board rows.
pub const PUZZLE_ROWS: usize = 2;
/// Board columns.
pub const PUZZLE_COLS: usize = 2;
/// Total pieces (one per slot).
pub const PIECE_COUNT: usize = PUZZLE_ROWS * PUZZLE_COLS;

/// Placement evaluator: a drop lands in a slot when its center falls
/// within the slot's bounding rectangle, all four edges inclusive.
pub fn slot_accepts(slot: &Slot, dropped_center: Point) -> bool {
    slot.rect.contains(dropped_center)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed puzzle geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Top-left corner of the puzzle board.
    pub board_origin: Point,
    /// Side length of one (square) piece and its slot.
    pub piece_size: f32,
    /// Top-left corner of the tray where unplaced pieces line up.
    pub tray_origin: Point,
    /// Horizontal distance between tray positions.
    pub tray_spacing: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            board_origin: Point::new(110.0, 150.0),
            piece_size: 90.0,
            tray_origin: Point::new(10.0, 360.0),
            tray_spacing: 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One board slot. Each slot accepts exactly one designated piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: usize,
    pub rect: Rect,
    /// The only piece id this slot accepts.
    pub expected_piece: usize,
}

/// One draggable piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: usize,
    /// The slot this piece belongs in (always `id` in this puzzle).
    pub home_slot: usize,
    /// Current top-left display position (tray position until placed,
    /// slot position after).
    pub position: Point,
    /// Permanent once set; placed pieces are no longer draggable.
    pub placed: bool,
}

/// Puzzle session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleState {
    pub pieces: Vec<Piece>,
    pub slots: Vec<Slot>,
    pub solved: bool,
}

/// A piece released over the board.
#[derive(Debug, Clone, Copy)]
pub struct DropPiece {
    pub piece_id: usize,
    /// Center of the piece at release time.
    pub center: Point,
}

/// Puzzle outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// The drop was accepted; the piece is locked into its slot.
    Placed { piece_id: usize },
    /// The drop missed; the caller springs the piece back.
    Rejected { piece_id: usize },
    /// Every piece is placed.
    Solved,
}

/// The Puzzle room's game.
pub struct PuzzleGame;

impl MiniGame for PuzzleGame {
    type Config = PuzzleConfig;
    type State = PuzzleState;
    type Action = DropPiece;
    type Event = PuzzleEvent;

    fn init(config: &PuzzleConfig) -> PuzzleState {
        let size = config.piece_size;

        let slots: Vec<Slot> = (0..PIECE_COUNT)
            .map(|id| {
                let row = id / PUZZLE_COLS;
                let col = id % PUZZLE_COLS;
                Slot {
                    id,
                    rect: Rect::new(
                        config.board_origin.x + col as f32 * size,
                        config.board_origin.y + row as f32 * size,
                        size,
                        size,
                    ),
                    expected_piece: id,
                }
            })
            .collect();

        // Shuffle which tray position each piece starts in; home slots
        // are fixed, starting spots are not.
        let mut order: Vec<usize> = (0..PIECE_COUNT).collect();
        order.shuffle(&mut rand::rng());

        let mut pieces: Vec<Piece> = (0..PIECE_COUNT)
            .map(|id| Piece {
                id,
                home_slot: id,
                position: Point::new(0.0, 0.0),
                placed: false,
            })
            .collect();
        for (tray_index, &piece_id) in order.iter().enumerate() {
            pieces[piece_id].position = Point::new(
                config.tray_origin.x + tray_index as f32 * config.tray_spacing,
                config.tray_origin.y,
            );
        }

        PuzzleState {
            pieces,
            slots,
            solved: false,
        }
    }

    fn validate_action(state: &PuzzleState, action: &DropPiece) -> Result<(), String> {
        let piece = state
            .pieces
            .get(action.piece_id)
            .ok_or_else(|| format!("no piece with id {}", action.piece_id))?;
        if piece.placed {
            return Err("piece already placed".into());
        }
        Ok(())
    }

    fn handle_action(state: &mut PuzzleState, action: DropPiece) -> Vec<PuzzleEvent> {
        let piece_id = action.piece_id;
        let home_slot = state.pieces[piece_id].home_slot;
        let slot = state.slots[home_slot].clone();

        if !slot_accepts(&slot, action.center) {
            return vec![PuzzleEvent::Rejected { piece_id }];
        }

        let piece = &mut state.pieces[piece_id];
        piece.placed = true;
        piece.position = Point::new(slot.rect.x, slot.rect.y);

        let mut events = vec![PuzzleEvent::Placed { piece_id }];
        if state.pieces.iter().all(|p| p.placed) {
            state.solved = true;
            events.push(PuzzleEvent::Solved);
        }
        events
    }

    fn is_finished(state: &PuzzleState) -> bool {
        state.solved
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use petforge_room::GameSession;

    fn session() -> GameSession<PuzzleGame> {
        GameSession::with_defaults()
    }

    /// The designated slot rect for a piece.
    fn home_rect(s: &GameSession<PuzzleGame>, piece_id: usize) -> Rect {
        let home = s.state().pieces[piece_id].home_slot;
        s.state().slots[home].rect
    }

    fn drop_at(s: &mut GameSession<PuzzleGame>, piece_id: usize, center: Point) -> Vec<PuzzleEvent> {
        s.act(DropPiece { piece_id, center })
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    #[test]
    fn test_init_builds_four_slots_in_a_grid() {
        let s = session();
        let slots = &s.state().slots;

        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].rect, Rect::new(110.0, 150.0, 90.0, 90.0));
        assert_eq!(slots[1].rect, Rect::new(200.0, 150.0, 90.0, 90.0));
        assert_eq!(slots[2].rect, Rect::new(110.0, 240.0, 90.0, 90.0));
        assert_eq!(slots[3].rect, Rect::new(200.0, 240.0, 90.0, 90.0));
    }

    #[test]
    fn test_each_slot_expects_its_own_piece() {
        let s = session();
        for slot in &s.state().slots {
            assert_eq!(slot.expected_piece, slot.id);
        }
    }

    #[test]
    fn test_init_pieces_start_unplaced_in_distinct_tray_spots() {
        let s = session();
        let pieces = &s.state().pieces;

        assert!(pieces.iter().all(|p| !p.placed));
        for a in 0..pieces.len() {
            for b in (a + 1)..pieces.len() {
                assert_ne!(pieces[a].position, pieces[b].position);
            }
        }
    }

    // =====================================================================
    // Placement
    // =====================================================================

    #[test]
    fn test_drop_in_slot_center_is_accepted() {
        let mut s = session();
        let center = home_rect(&s, 0).center();

        let events = drop_at(&mut s, 0, center);

        assert_eq!(events, vec![PuzzleEvent::Placed { piece_id: 0 }]);
        assert!(s.state().pieces[0].placed);
    }

    #[test]
    fn test_drop_on_each_boundary_edge_is_accepted() {
        // Inclusive bound test on all four edges: a center exactly on the
        // slot boundary still lands the piece.
        let rect = home_rect(&session(), 0);
        let mid_x = rect.x + rect.width / 2.0;
        let mid_y = rect.y + rect.height / 2.0;
        let edges = [
            ("left", Point::new(rect.x, mid_y)),
            ("right", Point::new(rect.x + rect.width, mid_y)),
            ("top", Point::new(mid_x, rect.y)),
            ("bottom", Point::new(mid_x, rect.y + rect.height)),
        ];

        for (edge, center) in edges {
            let mut s = session();
            let events = drop_at(&mut s, 0, center);
            assert_eq!(
                events,
                vec![PuzzleEvent::Placed { piece_id: 0 }],
                "{edge} edge"
            );
        }
    }

    #[test]
    fn test_drop_just_outside_is_rejected() {
        let mut s = session();
        let rect = home_rect(&s, 0);
        let outside = Point::new(rect.x - 0.5, rect.y + 10.0);

        let events = drop_at(&mut s, 0, outside);

        assert_eq!(events, vec![PuzzleEvent::Rejected { piece_id: 0 }]);
        assert!(!s.state().pieces[0].placed);
    }

    #[test]
    fn test_rejected_drop_leaves_position_untouched() {
        // Spring-back is the caller's job; core must not move the piece.
        let mut s = session();
        let before = s.state().pieces[0].position;

        drop_at(&mut s, 0, Point::new(-50.0, -50.0));

        assert_eq!(s.state().pieces[0].position, before);
    }

    #[test]
    fn test_drop_in_another_pieces_slot_is_rejected() {
        // Slot 3's rect is not piece 0's designated slot, so even a dead
        // center hit there misses.
        let mut s = session();
        let wrong_center = s.state().slots[3].rect.center();

        let events = drop_at(&mut s, 0, wrong_center);

        assert_eq!(events, vec![PuzzleEvent::Rejected { piece_id: 0 }]);
    }

    #[test]
    fn test_placed_piece_cannot_be_redropped() {
        let mut s = session();
        let center = home_rect(&s, 0).center();
        drop_at(&mut s, 0, center);

        let events = drop_at(&mut s, 0, center);

        assert!(events.is_empty(), "placement is permanent");
    }

    #[test]
    fn test_accepted_piece_snaps_to_slot_origin() {
        let mut s = session();
        let rect = home_rect(&s, 2);

        drop_at(&mut s, 2, rect.center());

        assert_eq!(s.state().pieces[2].position, Point::new(rect.x, rect.y));
    }

    #[test]
    fn test_unknown_piece_id_rejected() {
        let mut s = session();
        let events = drop_at(&mut s, 42, Point::new(0.0, 0.0));
        assert!(events.is_empty());
    }

    // =====================================================================
    // Winning
    // =====================================================================

    #[test]
    fn test_placing_every_piece_solves_the_puzzle() {
        let mut s = session();

        for piece_id in 0..PIECE_COUNT {
            let center = home_rect(&s, piece_id).center();
            let events = drop_at(&mut s, piece_id, center);

            if piece_id + 1 < PIECE_COUNT {
                assert_eq!(events, vec![PuzzleEvent::Placed { piece_id }]);
                assert!(!s.is_finished());
            } else {
                assert_eq!(
                    events,
                    vec![PuzzleEvent::Placed { piece_id }, PuzzleEvent::Solved]
                );
            }
        }

        assert!(s.state().solved);
        assert!(s.is_finished());
    }

    // =====================================================================
    // Reset
    // =====================================================================

    #[test]
    fn test_reset_clears_placements_and_reshuffles_tray() {
        let mut s = session();
        for piece_id in 0..PIECE_COUNT {
            let center = home_rect(&s, piece_id).center();
            drop_at(&mut s, piece_id, center);
        }
        assert!(s.state().solved);

        s.reset();

        let state = s.state();
        assert!(!state.solved);
        assert!(state.pieces.iter().all(|p| !p.placed));
        // Every piece sits at one of the tray positions again (not on
        // the board).
        let tray_y = PuzzleConfig::default().tray_origin.y;
        assert!(state.pieces.iter().all(|p| p.position.y == tray_y));
    }
}

//! The Drawing Room: a free canvas of colored strokes.
//!
//! No rules, no win state; the session just owns the stroke list so the
//! canvas survives leaving and re-entering the room. Touch plumbing and
//! SVG rendering stay in the presentation layer; what arrives here is
//! already "start a stroke / extend it / finish it".

use serde::{Deserialize, Serialize};

use petforge_room::MiniGame;

use crate::geom::Point;

/// The brush color palette, in picker order. The first entry is the
/// starting color.
pub const PALETTE: [&str; 14] = [
    "#000000", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff69b4", "#8a2be2", "#ffa500",
    "#00ffff", "#a52a2a", "#800080", "#008000", "#000080", "#ffc0cb",
];

/// Brush width bounds (the slider's range) and its starting value.
pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 20.0;
pub const DEFAULT_STROKE_WIDTH: f32 = 4.0;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One committed (or in-progress) stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub points: Vec<Point>,
}

/// Drawing session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingState {
    /// Finished strokes, oldest first.
    pub strokes: Vec<Stroke>,
    /// The stroke currently being drawn, if a touch is down.
    pub active: Option<Stroke>,
    /// Color for the next stroke.
    pub color: String,
    /// Width for the next stroke.
    pub stroke_width: f32,
}

/// Player actions.
#[derive(Debug, Clone, Copy)]
pub enum DrawingAction {
    /// Pick a palette color by index.
    SetColor { palette_index: usize },
    /// Move the width slider.
    SetStrokeWidth { width: f32 },
    /// Touch down: begin a stroke at this point.
    StrokeStart { at: Point },
    /// Touch move: extend the active stroke.
    StrokeMove { to: Point },
    /// Touch up: commit the active stroke.
    StrokeEnd,
    /// Wipe the canvas.
    Clear,
}

/// Drawing outcomes for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingEvent {
    ColorChanged { color: String },
    StrokeWidthChanged { width: f32 },
    /// A stroke was committed with this many points.
    StrokeCommitted { points: usize },
    Cleared,
}

/// The Drawing Room's game.
pub struct DrawingGame;

impl MiniGame for DrawingGame {
    type Config = ();
    type State = DrawingState;
    type Action = DrawingAction;
    type Event = DrawingEvent;

    fn init(_config: &()) -> DrawingState {
        DrawingState {
            strokes: Vec::new(),
            active: None,
            color: PALETTE[0].to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    fn validate_action(state: &DrawingState, action: &DrawingAction) -> Result<(), String> {
        match action {
            DrawingAction::SetColor { palette_index } => {
                if *palette_index >= PALETTE.len() {
                    return Err(format!("no palette color at index {palette_index}"));
                }
                Ok(())
            }
            DrawingAction::SetStrokeWidth { width } => {
                if !(MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(width) {
                    return Err(format!("stroke width {width} out of range"));
                }
                Ok(())
            }
            DrawingAction::StrokeStart { .. } if state.active.is_some() => {
                Err("a stroke is already active".into())
            }
            DrawingAction::StrokeMove { .. } | DrawingAction::StrokeEnd
                if state.active.is_none() =>
            {
                Err("no active stroke".into())
            }
            _ => Ok(()),
        }
    }

    fn handle_action(state: &mut DrawingState, action: DrawingAction) -> Vec<DrawingEvent> {
        match action {
            DrawingAction::SetColor { palette_index } => {
                state.color = PALETTE[palette_index].to_string();
                vec![DrawingEvent::ColorChanged {
                    color: state.color.clone(),
                }]
            }
            DrawingAction::SetStrokeWidth { width } => {
                state.stroke_width = width;
                vec![DrawingEvent::StrokeWidthChanged { width }]
            }
            DrawingAction::StrokeStart { at } => {
                state.active = Some(Stroke {
                    color: state.color.clone(),
                    width: state.stroke_width,
                    points: vec![at],
                });
                Vec::new()
            }
            DrawingAction::StrokeMove { to } => {
                state
                    .active
                    .as_mut()
                    .expect("validated: stroke is active")
                    .points
                    .push(to);
                Vec::new()
            }
            DrawingAction::StrokeEnd => {
                let stroke = state.active.take().expect("validated: stroke is active");
                let points = stroke.points.len();
                state.strokes.push(stroke);
                vec![DrawingEvent::StrokeCommitted { points }]
            }
            DrawingAction::Clear => {
                state.strokes.clear();
                state.active = None;
                vec![DrawingEvent::Cleared]
            }
        }
    }

    fn is_finished(_state: &DrawingState) -> bool {
        false
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use petforge_room::GameSession;

    fn session() -> GameSession<DrawingGame> {
        GameSession::with_defaults()
    }

    #[test]
    fn test_starts_with_black_brush_and_default_width() {
        let s = session();
        assert_eq!(s.state().color, "#000000");
        assert_eq!(s.state().stroke_width, DEFAULT_STROKE_WIDTH);
        assert!(s.state().strokes.is_empty());
    }

    #[test]
    fn test_stroke_lifecycle_start_move_end() {
        let mut s = session();

        s.act(DrawingAction::StrokeStart { at: Point::new(1.0, 1.0) });
        s.act(DrawingAction::StrokeMove { to: Point::new(2.0, 2.0) });
        s.act(DrawingAction::StrokeMove { to: Point::new(3.0, 2.0) });
        let events = s.act(DrawingAction::StrokeEnd);

        assert_eq!(events, vec![DrawingEvent::StrokeCommitted { points: 3 }]);
        let state = s.state();
        assert!(state.active.is_none());
        assert_eq!(state.strokes.len(), 1);
        assert_eq!(state.strokes[0].points.len(), 3);
    }

    #[test]
    fn test_stroke_captures_color_and_width_at_start() {
        let mut s = session();
        s.act(DrawingAction::SetColor { palette_index: 1 });
        s.act(DrawingAction::SetStrokeWidth { width: 9.0 });

        s.act(DrawingAction::StrokeStart { at: Point::new(0.0, 0.0) });
        // Changing the brush mid-stroke must not repaint the stroke
        // already in flight.
        s.act(DrawingAction::SetColor { palette_index: 2 });
        s.act(DrawingAction::StrokeEnd);

        let stroke = &s.state().strokes[0];
        assert_eq!(stroke.color, "#ff0000");
        assert_eq!(stroke.width, 9.0);
        assert_eq!(s.state().color, "#00ff00", "next stroke gets the new color");
    }

    #[test]
    fn test_move_without_active_stroke_rejected() {
        let mut s = session();
        let events = s.act(DrawingAction::StrokeMove { to: Point::new(5.0, 5.0) });
        assert!(events.is_empty());
        assert!(s.state().strokes.is_empty());
    }

    #[test]
    fn test_end_without_active_stroke_rejected() {
        let mut s = session();
        assert!(s.act(DrawingAction::StrokeEnd).is_empty());
    }

    #[test]
    fn test_start_while_active_rejected() {
        let mut s = session();
        s.act(DrawingAction::StrokeStart { at: Point::new(0.0, 0.0) });

        let events = s.act(DrawingAction::StrokeStart { at: Point::new(9.0, 9.0) });

        assert!(events.is_empty());
        let active = s.state().active.as_ref().unwrap();
        assert_eq!(active.points, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn test_invalid_palette_index_rejected() {
        let mut s = session();
        let events = s.act(DrawingAction::SetColor { palette_index: 99 });
        assert!(events.is_empty());
        assert_eq!(s.state().color, "#000000");
    }

    #[test]
    fn test_out_of_range_width_rejected() {
        let mut s = session();
        assert!(s.act(DrawingAction::SetStrokeWidth { width: 0.5 }).is_empty());
        assert!(s.act(DrawingAction::SetStrokeWidth { width: 21.0 }).is_empty());
        assert_eq!(s.state().stroke_width, DEFAULT_STROKE_WIDTH);
    }

    #[test]
    fn test_clear_wipes_committed_and_active_strokes() {
        let mut s = session();
        s.act(DrawingAction::StrokeStart { at: Point::new(0.0, 0.0) });
        s.act(DrawingAction::StrokeEnd);
        s.act(DrawingAction::StrokeStart { at: Point::new(1.0, 1.0) });

        let events = s.act(DrawingAction::Clear);

        assert_eq!(events, vec![DrawingEvent::Cleared]);
        assert!(s.state().strokes.is_empty());
        assert!(s.state().active.is_none());
    }
}

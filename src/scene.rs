//! Render stage
//!
//! Turns a [`GameState`] into an ordered list of draw commands. Nothing here
//! mutates the simulation; the renderer and the DOM HUD consume the output.

use glam::Vec2;

use crate::sim::{GameState, Rect, SessionPhase, Viewport};

/// Dimming layer drawn over a finished game
pub const GAME_OVER_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

/// HUD text element a text command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Score,
    GameOverTitle,
    FinalScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Full-screen background layer
    Backdrop { index: usize, alpha: f32 },
    /// The bird sprite; `velocity` lets the renderer tilt the wing
    Bird { rect: Rect, velocity: f32 },
    /// One barrier of a pipe; `flipped` marks the top barrier (lip at its bottom)
    Barrier { rect: Rect, flipped: bool },
    /// Full-screen translucent color
    Overlay { color: [f32; 4] },
    Text {
        slot: TextSlot,
        text: String,
        /// Baseline anchor in screen units
        pos: Vec2,
        size: f32,
        align: TextAlign,
    },
}

/// Everything to draw for one displayed frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn texts(&self) -> impl Iterator<Item = (TextSlot, &str)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { slot, text, .. } => Some((*slot, text.as_str())),
            _ => None,
        })
    }
}

/// Build the draw commands for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let viewport = state.viewport;
    let mut commands = Vec::with_capacity(4 + state.pipes.len() * 2);

    push_backdrop(state, &mut commands);

    if state.phase == SessionPhase::Idle {
        return Frame { viewport, commands };
    }

    commands.push(DrawCommand::Bird {
        rect: state.bird.bounds(),
        velocity: state.bird.velocity,
    });

    for pipe in &state.pipes {
        let top = Rect::new(pipe.x, 0.0, pipe.width, pipe.top);
        if !top.is_empty() {
            commands.push(DrawCommand::Barrier {
                rect: top,
                flipped: true,
            });
        }
        let bottom = Rect::new(pipe.x, pipe.bottom, pipe.width, viewport.height - pipe.bottom);
        if !bottom.is_empty() {
            commands.push(DrawCommand::Barrier {
                rect: bottom,
                flipped: false,
            });
        }
    }

    commands.push(DrawCommand::Text {
        slot: TextSlot::Score,
        text: format!("Score: {}", state.score),
        pos: Vec2::new(20.0, 50.0),
        size: 30.0,
        align: TextAlign::Left,
    });

    if state.phase == SessionPhase::Terminated {
        let center = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);
        commands.push(DrawCommand::Overlay {
            color: GAME_OVER_DIM,
        });
        commands.push(DrawCommand::Text {
            slot: TextSlot::GameOverTitle,
            text: "Game Over".to_string(),
            pos: center - Vec2::new(0.0, 20.0),
            size: 40.0,
            align: TextAlign::Center,
        });
        commands.push(DrawCommand::Text {
            slot: TextSlot::FinalScore,
            text: format!("Score: {}", state.score),
            pos: center + Vec2::new(0.0, 30.0),
            size: 28.0,
            align: TextAlign::Center,
        });
    }

    Frame { viewport, commands }
}

/// Current backdrop opaque, then the incoming one at the fade's opacity
fn push_backdrop(state: &GameState, commands: &mut Vec<DrawCommand>) {
    let fade = &state.backdrop;
    commands.push(DrawCommand::Backdrop {
        index: fade.index,
        alpha: 1.0,
    });
    if fade.active {
        commands.push(DrawCommand::Backdrop {
            index: fade.next_index(),
            alpha: fade.progress(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Pipe, TerminationCause};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(8, Tuning::default(), Viewport::new(1000.0, 800.0))
    }

    #[test]
    fn test_idle_draws_only_backdrop() {
        let frame = build_frame(&state());
        assert_eq!(
            frame.commands,
            vec![DrawCommand::Backdrop {
                index: 0,
                alpha: 1.0
            }]
        );
    }

    #[test]
    fn test_running_frame_order() {
        let mut state = state();
        state.start();
        state.pipes.push(Pipe {
            sequence: 1,
            x: 600.0,
            width: 65.0,
            top: 120.0,
            bottom: 420.0,
            passed: false,
        });
        let frame = build_frame(&state);
        assert!(matches!(frame.commands[0], DrawCommand::Backdrop { .. }));
        assert!(matches!(frame.commands[1], DrawCommand::Bird { .. }));
        assert_eq!(
            frame.commands[2],
            DrawCommand::Barrier {
                rect: Rect::new(600.0, 0.0, 65.0, 120.0),
                flipped: true
            }
        );
        assert_eq!(
            frame.commands[3],
            DrawCommand::Barrier {
                rect: Rect::new(600.0, 420.0, 65.0, 380.0),
                flipped: false
            }
        );
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(texts, vec![(TextSlot::Score, "Score: 0")]);
        assert!(
            !frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Overlay { .. }))
        );
    }

    #[test]
    fn test_fade_draws_two_layers() {
        let mut state = state();
        state.backdrop.index = 2;
        state.backdrop.trigger();
        for _ in 0..10 {
            state.backdrop.advance();
        }
        let frame = build_frame(&state);
        assert_eq!(
            frame.commands,
            vec![
                DrawCommand::Backdrop {
                    index: 2,
                    alpha: 1.0
                },
                DrawCommand::Backdrop {
                    index: 0,
                    alpha: 0.5
                },
            ]
        );
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.start();
        state.score = 7;
        state.terminate(TerminationCause::PipeCollision);
        let frame = build_frame(&state);
        let overlay_at = frame
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Overlay { .. }))
            .unwrap();
        let score_at = frame
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { slot: TextSlot::Score, .. }))
            .unwrap();
        assert!(overlay_at > score_at);
        let texts: Vec<_> = frame.texts().collect();
        assert_eq!(
            texts,
            vec![
                (TextSlot::Score, "Score: 7"),
                (TextSlot::GameOverTitle, "Game Over"),
                (TextSlot::FinalScore, "Score: 7"),
            ]
        );
        if let Some(DrawCommand::Text { pos, align, .. }) = frame.commands.last() {
            assert_eq!(*pos, Vec2::new(500.0, 430.0));
            assert_eq!(*align, TextAlign::Center);
        }
    }

    #[test]
    fn test_barrier_clipped_below_short_viewport() {
        let mut state = state();
        state.start();
        state.resize(1000.0, 300.0);
        state.pipes.push(Pipe {
            sequence: 1,
            x: 600.0,
            width: 65.0,
            top: 100.0,
            bottom: 400.0,
            passed: false,
        });
        let barriers = build_frame(&state)
            .commands
            .into_iter()
            .filter(|c| matches!(c, DrawCommand::Barrier { .. }))
            .count();
        assert_eq!(barriers, 1);
    }
}

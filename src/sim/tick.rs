//! Simulation tick
//!
//! One call advances the session by one frame: lift, gravity, spawning, pipe
//! movement with scoring and collisions, then the viewport edge check.

use super::collision::{out_of_bounds, pipe_contact};
use super::spawn::spawn_pipe;
use super::state::{GameEvent, GameState, TerminationCause};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start (or restart) a session
    pub start: bool,
    /// Lift presses since the previous tick
    pub lifts: u32,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start && !state.is_running() {
        state.start();
    }

    // Idle and terminated sessions are frozen
    if !state.is_running() {
        return;
    }

    if !state.viewport.is_valid() {
        log::debug!(
            "Holding tick {} on degenerate viewport {:?}",
            state.frame,
            state.viewport
        );
        return;
    }

    // Lift is an override, so several presses in one tick act as one
    if input.lifts > 0 {
        state.bird.apply_lift();
    }
    state.bird.integrate();

    let interval = state.tuning.spawn_interval.max(1);
    if state.frame % interval == 0 {
        spawn_pipe(state);
    }

    update_pipes(state);

    if out_of_bounds(&state.bird, &state.viewport) {
        state.terminate(TerminationCause::OutOfBounds);
    }

    if state.is_running() {
        state.frame += 1;
    }
}

/// Move pipes, award passes, detect hits and prune off-screen pipes
fn update_pipes(state: &mut GameState) {
    let speed = state.tuning.pipe_speed;
    let padding = state.tuning.collision_padding;
    let bird_x = state.bird.pos.x;

    let mut hit = None;
    let mut newly_passed = Vec::new();

    for pipe in &mut state.pipes {
        pipe.x -= speed;
        if pipe.passed {
            continue;
        }
        if let Some(barrier) = pipe_contact(&state.bird, pipe, padding) {
            hit.get_or_insert((pipe.sequence, barrier));
            continue;
        }
        if hit.is_none() && pipe.right() < bird_x {
            pipe.passed = true;
            newly_passed.push(pipe.sequence);
        }
    }

    for sequence in newly_passed {
        state.score += 1;
        state.events.push(GameEvent::PipePassed {
            sequence,
            score: state.score,
        });
        log::debug!("Passed pipe {}, score {}", sequence, state.score);
    }

    if let Some((sequence, barrier)) = hit {
        log::debug!("Bird hit the {:?} barrier of pipe {}", barrier, sequence);
        state.terminate(TerminationCause::PipeCollision);
    }

    // Filter pass keeps survivors in order
    state.pipes.retain(|pipe| pipe.right() >= 0.0);
}

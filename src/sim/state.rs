//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! ambient state elsewhere in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::backdrop::BackdropFade;
use super::collision::Rect;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart
    Terminated,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCause {
    /// The padded bird box touched a pipe barrier
    PipeCollision,
    /// The bird left the top or bottom of the viewport
    OutOfBounds,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    PipeSpawned { sequence: u32, gap: f32 },
    PipePassed { sequence: u32, score: u32 },
    BackdropFadeStarted { sequence: u32 },
    BackdropFadeFinished { index: usize },
    /// Fired exactly once per session
    GameOver { cause: TerminationCause, score: u32 },
}

/// Drawable area in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero, negative or non-finite size holds the simulation
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// The player's bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner; x is fixed for a session
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    pub gravity: f32,
    pub lift: f32,
}

impl Bird {
    /// Bird at its starting spot: a fraction of the way in, vertically centered
    pub fn new(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width * tuning.bird_x_fraction,
                viewport.height / 2.0,
            ),
            size: Vec2::new(tuning.bird_width, tuning.bird_height),
            velocity: 0.0,
            gravity: tuning.gravity,
            lift: tuning.lift,
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
    }

    /// Replace the current velocity with the lift impulse
    pub fn apply_lift(&mut self) {
        self.velocity = self.lift;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A top/bottom barrier pair with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Spawn sequence number (1-indexed)
    pub sequence: u32,
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Where the gap begins (height of the top barrier)
    pub top: f32,
    /// Where the gap ends
    pub bottom: f32,
    /// Already scored
    pub passed: bool,
}

impl Pipe {
    pub fn gap(&self) -> f32 {
        self.bottom - self.top
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: SessionPhase,
    /// Simulation ticks since the session started
    pub frame: u64,
    pub score: u32,
    /// Pipes spawned this session (the latest spawn sequence number)
    pub pipe_count: u32,
    pub bird: Bird,
    /// Live pipes in spawn order (also left-to-right order)
    pub pipes: Vec<Pipe>,
    pub backdrop: BackdropFade,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let bird = Bird::new(&tuning, viewport);
        let backdrop = BackdropFade::new(tuning.backdrop_count, tuning.fade_steps);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            phase: SessionPhase::Idle,
            frame: 0,
            score: 0,
            pipe_count: 0,
            bird,
            pipes: Vec::new(),
            backdrop,
            events: Vec::new(),
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase != SessionPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == SessionPhase::Terminated
    }

    /// Restore every per-session value to its initial state
    ///
    /// The RNG keeps its stream so consecutive games differ.
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.tuning, self.viewport);
        self.pipes.clear();
        self.frame = 0;
        self.score = 0;
        self.pipe_count = 0;
        self.backdrop.reset();
    }

    /// Reset and begin a new run
    pub fn start(&mut self) {
        self.reset();
        self.phase = SessionPhase::Running;
        self.events.push(GameEvent::SessionStarted);
        log::info!(
            "Session started ({}x{} viewport)",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// End the run; returns false if it had already ended
    pub fn terminate(&mut self, cause: TerminationCause) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Terminated;
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
        });
        log::info!(
            "Game over after {} ticks: {:?}, score {}",
            self.frame,
            cause,
            self.score
        );
        true
    }

    /// Placed pipes and the bird's x are left untouched
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(7, Tuning::default(), Viewport::new(1000.0, 800.0));
        state.start();
        state
    }

    #[test]
    fn test_bird_starts_centered() {
        let bird = Bird::new(&Tuning::default(), Viewport::new(1000.0, 800.0));
        assert_eq!(bird.pos, Vec2::new(200.0, 400.0));
        assert_eq!(bird.size, Vec2::new(80.0, 80.0));
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_lift_overrides_velocity() {
        let mut bird = Bird::new(&Tuning::default(), Viewport::new(1000.0, 800.0));
        bird.velocity = 7.5;
        bird.apply_lift();
        assert_eq!(bird.velocity, -10.0);
        bird.velocity = -3.0;
        bird.apply_lift();
        assert_eq!(bird.velocity, -10.0);
    }

    proptest! {
        #[test]
        fn prop_integration_updates_velocity_before_position(
            y in -1000.0f32..1000.0,
            velocity in -20.0f32..20.0,
        ) {
            let mut bird = Bird::new(&Tuning::default(), Viewport::new(1000.0, 800.0));
            bird.pos.y = y;
            bird.velocity = velocity;
            bird.integrate();
            let expected_velocity = velocity + 0.5;
            prop_assert_eq!(bird.velocity, expected_velocity);
            prop_assert_eq!(bird.pos.y, y + expected_velocity);
        }
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = running_state();
        state.score = 12;
        state.pipe_count = 14;
        state.frame = 1300;
        state.bird.pos.y = 10.0;
        state.bird.velocity = 4.0;
        state.pipes.push(Pipe {
            sequence: 14,
            x: 300.0,
            width: 65.0,
            top: 100.0,
            bottom: 300.0,
            passed: false,
        });
        state.backdrop.trigger();
        state.backdrop.advance();
        state.terminate(TerminationCause::OutOfBounds);

        state.start();
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipe_count, 0);
        assert_eq!(state.frame, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.backdrop.index, 0);
        assert!(!state.backdrop.active);
        assert_eq!(state.bird.pos, Vec2::new(200.0, 400.0));
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_terminate_fires_once() {
        let mut state = running_state();
        state.drain_events();
        assert!(state.terminate(TerminationCause::PipeCollision));
        assert!(!state.terminate(TerminationCause::OutOfBounds));
        assert_eq!(state.phase, SessionPhase::Terminated);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                cause: TerminationCause::PipeCollision,
                score: 0
            }]
        );
    }

    #[test]
    fn test_idle_session_cannot_terminate() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::new(640.0, 480.0));
        assert!(!state.terminate(TerminationCause::OutOfBounds));
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.has_started());
    }

    #[test]
    fn test_resize_keeps_bird_x() {
        let mut state = running_state();
        state.resize(400.0, 300.0);
        assert_eq!(state.viewport, Viewport::new(400.0, 300.0));
        assert_eq!(state.bird.pos.x, 200.0);
    }

    #[test]
    fn test_degenerate_viewport() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, -1.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 600.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}

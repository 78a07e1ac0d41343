//! Run loop
//!
//! The host calls [`Driver::advance`] once per displayed frame with the
//! elapsed time. Two clocks run off that delta: the simulation clock (fixed
//! 60 Hz ticks through an accumulator) and the backdrop fade clock (fixed
//! period from the tuning). Input handlers only push commands; they are
//! consumed at the top of the next tick.

use std::collections::VecDeque;

use crate::consts::{INPUT_QUEUE_CAPACITY, MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::scene::{self, Frame};
use crate::sim::{GameEvent, GameState, TickInput, Viewport, tick};
use crate::tuning::Tuning;

/// A player action captured by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Start button (new game from idle or game over)
    Start,
    /// Flap: key, click or touch
    Lift,
}

/// Bounded FIFO of input commands waiting for the next tick
#[derive(Debug, Clone)]
pub struct InputQueue {
    pending: VecDeque<InputCommand>,
    capacity: usize,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a command; returns false (and drops it) when full
    pub fn push(&mut self, command: InputCommand) -> bool {
        if self.pending.len() >= self.capacity {
            log::warn!("Input queue full, dropping {:?}", command);
            return false;
        }
        self.pending.push_back(command);
        true
    }

    /// Collapse everything queued into one tick's input
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = TickInput::default();
        for command in self.pending.drain(..) {
            match command {
                InputCommand::Start => input.start = true,
                InputCommand::Lift => input.lifts += 1,
            }
        }
        input
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Owns the session and both of its clocks
pub struct Driver {
    pub state: GameState,
    inputs: InputQueue,
    /// Unsimulated time in seconds
    sim_accumulator: f32,
    /// Time since the last fade step in milliseconds
    fade_accumulator_ms: f32,
}

impl Driver {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        Self {
            state: GameState::new(seed, tuning, viewport),
            inputs: InputQueue::default(),
            sim_accumulator: 0.0,
            fade_accumulator_ms: 0.0,
        }
    }

    pub fn push_input(&mut self, command: InputCommand) -> bool {
        self.inputs.push(command)
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Advance both clocks by a frame delta (seconds)
    ///
    /// Returns the number of simulation ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let fade_period = self.state.tuning.fade_step_ms;
        self.fade_accumulator_ms += dt * 1000.0;
        while fade_period > 0.0 && self.fade_accumulator_ms >= fade_period {
            self.step_fade();
            self.fade_accumulator_ms -= fade_period;
        }

        self.sim_accumulator += dt;
        let mut substeps = 0;
        while self.sim_accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.sim_accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one simulation tick with whatever input is queued
    pub fn step(&mut self) {
        let input = self.inputs.take_tick_input();
        tick(&mut self.state, &input);
    }

    /// Run exactly one fade clock step
    pub fn step_fade(&mut self) {
        if self.state.backdrop.advance() {
            let index = self.state.backdrop.index;
            self.state
                .events
                .push(GameEvent::BackdropFadeFinished { index });
            log::info!("Backdrop fade finished on backdrop {}", index);
        }
    }

    /// Run `ticks` simulation ticks back to back
    pub fn run_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Draw commands for the current state
    pub fn frame(&self) -> Frame {
        scene::build_frame(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

/// Naive pilot for headless runs: flap whenever the bird is below the next gap's centre
pub fn autopilot_wants_lift(state: &GameState) -> bool {
    let bird = &state.bird;
    let center = bird.pos.y + bird.size.y / 2.0;
    let target = state
        .pipes
        .iter()
        .find(|pipe| pipe.right() >= bird.pos.x)
        .map(|pipe| (pipe.top + pipe.bottom) / 2.0)
        .unwrap_or(state.viewport.height / 2.0);
    center > target
}

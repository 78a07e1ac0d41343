//! Flappy Web - a gravity side-scroller for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, scoring, backdrop fade)
//! - `driver`: Run loop that owns the simulation and its two clocks
//! - `scene`: Render stage turning game state into draw commands
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use driver::{Driver, InputCommand};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta (seconds) the driver will integrate
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Input commands buffered between ticks
    pub const INPUT_QUEUE_CAPACITY: usize = 32;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod backdrop;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use backdrop::BackdropFade;
pub use collision::{Barrier, Rect, out_of_bounds, pipe_contact};
pub use spawn::{PlacementBand, placement_band, spawn_pipe, top_height};
pub use state::{
    Bird, GameEvent, GameState, Pipe, SessionPhase, TerminationCause, Viewport,
};
pub use tick::{TickInput, tick};

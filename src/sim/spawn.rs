//! Pipe generation
//!
//! Gap size follows the score; vertical placement follows the spawn sequence
//! number. The two counters drift apart whenever a spawned pipe has not been
//! scored yet, and they are kept separate on purpose.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Pipe};

/// Sequence numbers whose gap sits near the top of the screen
pub const UPPER_BAND_SEQUENCES: [u32; 6] = [1, 3, 5, 7, 9, 11];
/// Sequence numbers placed across the middle and lower screen
pub const LOWER_BAND_SEQUENCES: [u32; 6] = [2, 4, 6, 8, 12, 14];

/// Screen height kept clear of the top-height roll in the open bands
const PLACEMENT_MARGIN: f32 = 150.0;
/// Width of the upper band's top-height roll
const UPPER_BAND_SPAN: f32 = 100.0;

/// Placement policy for a pipe's top barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementBand {
    /// Short top barrier, top height in [30, 130)
    Upper,
    /// Top height in [100, 100 + height - gap - 150)
    Lower,
    /// Everything else: top height in [75, 75 + height - gap - 150)
    Open,
}

impl PlacementBand {
    /// Smallest top height the band produces
    pub fn base(&self) -> f32 {
        match self {
            PlacementBand::Upper => 30.0,
            PlacementBand::Lower => 100.0,
            PlacementBand::Open => 75.0,
        }
    }

    /// Width of the top-height roll for a screen height and gap
    pub fn span(&self, screen_height: f32, gap: f32) -> f32 {
        match self {
            PlacementBand::Upper => UPPER_BAND_SPAN,
            PlacementBand::Lower | PlacementBand::Open => screen_height - gap - PLACEMENT_MARGIN,
        }
    }
}

/// Band for a 1-indexed spawn sequence number
///
/// Membership is literal: 13 is in neither special set.
pub fn placement_band(sequence: u32) -> PlacementBand {
    if UPPER_BAND_SEQUENCES.contains(&sequence) {
        PlacementBand::Upper
    } else if LOWER_BAND_SEQUENCES.contains(&sequence) {
        PlacementBand::Lower
    } else {
        PlacementBand::Open
    }
}

/// Top height for a band given a uniform roll in [0, 1)
///
/// A non-positive span (short screens, huge gaps) collapses to the band's
/// base instead of producing a negative range.
pub fn top_height(band: PlacementBand, screen_height: f32, gap: f32, roll: f32) -> f32 {
    let span = band.span(screen_height, gap);
    if span.is_finite() && span > 0.0 {
        // Rounding can push roll * span up to span itself
        let offset = (roll * span).floor().min(span.ceil() - 1.0);
        offset + band.base()
    } else {
        band.base()
    }
}

/// Append the next pipe at the right screen edge
pub fn spawn_pipe(state: &mut GameState) {
    state.pipe_count += 1;
    let sequence = state.pipe_count;

    let gap = state.tuning.gap_for_score(state.score);
    let band = placement_band(sequence);
    let roll: f32 = state.rng_mut().random();
    let top = top_height(band, state.viewport.height, gap, roll);

    state.pipes.push(Pipe {
        sequence,
        x: state.viewport.width,
        width: state.tuning.pipe_width,
        top,
        bottom: top + gap,
        passed: false,
    });
    state.events.push(GameEvent::PipeSpawned { sequence, gap });
    log::debug!(
        "Pipe {} spawned: {:?} band, gap {} from {} to {}",
        sequence,
        band,
        gap,
        top,
        top + gap
    );

    if state.tuning.backdrop_milestones.contains(&sequence) && state.backdrop.trigger() {
        state.events.push(GameEvent::BackdropFadeStarted { sequence });
        log::info!(
            "Pipe {}: fading backdrop {} -> {}",
            sequence,
            state.backdrop.index,
            state.backdrop.next_index()
        );
    }
}

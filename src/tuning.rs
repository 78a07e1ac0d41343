//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Missing
//! fields fall back to the defaults, so a tuning file only needs to name the
//! values it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gap size used while the score is below `below_score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapTier {
    pub below_score: u32,
    pub gap: f32,
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to the bird's velocity every tick
    pub gravity: f32,
    /// Velocity set by a lift input (negative = upward)
    pub lift: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Bird x as a fraction of the viewport width, fixed per session
    pub bird_x_fraction: f32,
    /// Inward margin on each side of the bird box for pipe collisions
    pub collision_padding: f32,
    pub pipe_width: f32,
    /// Leftward pipe movement per tick
    pub pipe_speed: f32,
    /// Ticks between pipe spawns
    pub spawn_interval: u64,
    /// Gap tiers in ascending score order
    pub gap_tiers: Vec<GapTier>,
    /// Gap once the score is past every tier
    pub final_gap: f32,
    /// Spawn sequence numbers that start a backdrop fade
    pub backdrop_milestones: Vec<u32>,
    pub backdrop_count: usize,
    /// Period of the fade clock in milliseconds
    pub fade_step_ms: f32,
    /// Fade clock steps from start to full opacity
    pub fade_steps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            lift: -10.0,
            bird_width: 80.0,
            bird_height: 80.0,
            bird_x_fraction: 0.2,
            collision_padding: 8.0,
            pipe_width: 65.0,
            pipe_speed: 3.0,
            spawn_interval: 90,
            gap_tiers: vec![
                GapTier {
                    below_score: 10,
                    gap: 300.0,
                },
                GapTier {
                    below_score: 20,
                    gap: 200.0,
                },
            ],
            final_gap: 150.0,
            backdrop_milestones: vec![11, 21, 31],
            backdrop_count: 3,
            fade_step_ms: 30.0,
            fade_steps: 20,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "tuning is not valid JSON: {}", err),
            TuningError::Invalid(reason) => write!(f, "tuning rejected: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval == 0 {
            return Err(TuningError::Invalid("spawn_interval must be positive"));
        }
        if self.fade_steps == 0 {
            return Err(TuningError::Invalid("fade_steps must be positive"));
        }
        if self.fade_step_ms <= 0.0 {
            return Err(TuningError::Invalid("fade_step_ms must be positive"));
        }
        if self.backdrop_count == 0 {
            return Err(TuningError::Invalid("backdrop_count must be positive"));
        }
        if self.pipe_width <= 0.0 || self.pipe_speed <= 0.0 {
            return Err(TuningError::Invalid("pipe width and speed must be positive"));
        }
        if self.bird_width <= 0.0 || self.bird_height <= 0.0 {
            return Err(TuningError::Invalid("bird size must be positive"));
        }
        if self.collision_padding < 0.0
            || self.collision_padding * 2.0 >= self.bird_width.min(self.bird_height)
        {
            return Err(TuningError::Invalid(
                "collision_padding must be smaller than half the bird",
            ));
        }
        if self
            .gap_tiers
            .windows(2)
            .any(|pair| pair[0].below_score >= pair[1].below_score)
        {
            return Err(TuningError::Invalid("gap_tiers must be in ascending score order"));
        }
        Ok(())
    }

    /// Gap size for a pipe spawned at the given score
    pub fn gap_for_score(&self, score: u32) -> f32 {
        self.gap_tiers
            .iter()
            .find(|tier| score < tier.below_score)
            .map(|tier| tier.gap)
            .unwrap_or(self.final_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "pipe_speed": 4.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.pipe_speed, 4.0);
        assert_eq!(tuning.lift, -10.0);
        assert_eq!(tuning.spawn_interval, 90);
        assert_eq!(tuning.backdrop_milestones, vec![11, 21, 31]);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_spawn_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_oversized_padding() {
        let err = Tuning::from_json(r#"{ "collision_padding": 40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let json = r#"{ "gap_tiers": [
            { "below_score": 20, "gap": 200.0 },
            { "below_score": 10, "gap": 300.0 }
        ] }"#;
        assert!(Tuning::from_json(json).is_err());
    }

    #[test]
    fn test_gap_tier_boundaries() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gap_for_score(0), 300.0);
        assert_eq!(tuning.gap_for_score(9), 300.0);
        assert_eq!(tuning.gap_for_score(10), 200.0);
        assert_eq!(tuning.gap_for_score(19), 200.0);
        assert_eq!(tuning.gap_for_score(20), 150.0);
        assert_eq!(tuning.gap_for_score(500), 150.0);
    }
}

//! Audio system using Web Audio API
//!
//! Sounds are synthesized with oscillators; there are no sound files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird cleared a pipe
    Score,
    /// Session ended
    GameOver,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Creation fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 1.0 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Score => self.play_score(ctx),
            SoundEffect::GameOver => self.play_game_over(ctx),
        }
    }

    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short rising blip
    fn play_score(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(self.volume * 0.05, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.12)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(990.0, t + 0.08)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Falling sawtooth: 400 Hz to 80 Hz over 0.4 s, silent after 0.5 s
    fn play_game_over(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.4)
            .ok();
        gain.gain().set_value_at_time(self.volume * 0.15, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.5).ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.5).ok();
    }
}

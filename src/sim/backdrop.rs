//! Background cross-fade
//!
//! Driven by its own fixed-rate clock, not by simulation ticks. Progress is
//! kept as a whole step count so a fade always takes exactly `steps` advances.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropFade {
    /// Backdrop currently drawn opaque
    pub index: usize,
    /// Number of backdrops to cycle through
    pub count: usize,
    /// A fade toward the next backdrop is in flight
    pub active: bool,
    step: u32,
    /// Steps from start to full opacity
    pub steps: u32,
}

impl BackdropFade {
    pub fn new(count: usize, steps: u32) -> Self {
        Self {
            index: 0,
            count: count.max(1),
            active: false,
            step: 0,
            steps: steps.max(1),
        }
    }

    /// Start fading toward the next backdrop; ignored while a fade is running
    pub fn trigger(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.step = 0;
        true
    }

    /// One fade clock step; returns true when this step finished the fade
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.step += 1;
        if self.step < self.steps {
            return false;
        }
        self.index = self.next_index();
        self.active = false;
        self.step = 0;
        true
    }

    /// Opacity of the incoming backdrop (0 when idle)
    pub fn progress(&self) -> f32 {
        if self.active {
            (self.step as f32 / self.steps as f32).min(1.0)
        } else {
            0.0
        }
    }

    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.count
    }

    /// Back to the first backdrop with no fade in flight
    pub fn reset(&mut self) {
        self.index = 0;
        self.active = false;
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_completes_after_exact_steps() {
        let mut fade = BackdropFade::new(3, 20);
        assert!(fade.trigger());
        for step in 1..20 {
            assert!(!fade.advance(), "finished early at step {}", step);
            assert!(fade.active);
            assert!((fade.progress() - step as f32 * 0.05).abs() < 1e-6);
        }
        assert!(fade.advance());
        assert!(!fade.active);
        assert_eq!(fade.index, 1);
        assert_eq!(fade.progress(), 0.0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut fade = BackdropFade::new(3, 20);
        fade.trigger();
        let mut last = fade.progress();
        while fade.active {
            fade.advance();
            if fade.active {
                assert!(fade.progress() > last);
                last = fade.progress();
            }
        }
    }

    #[test]
    fn test_trigger_while_active_is_ignored() {
        let mut fade = BackdropFade::new(3, 20);
        fade.trigger();
        for _ in 0..5 {
            fade.advance();
        }
        assert!(!fade.trigger());
        assert!((fade.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_index_wraps() {
        let mut fade = BackdropFade::new(3, 2);
        for expected in [1, 2, 0, 1] {
            fade.trigger();
            fade.advance();
            fade.advance();
            assert_eq!(fade.index, expected);
        }
    }

    #[test]
    fn test_advance_when_idle_does_nothing() {
        let mut fade = BackdropFade::new(3, 20);
        assert!(!fade.advance());
        assert_eq!(fade.index, 0);
        assert!(!fade.active);
    }

    #[test]
    fn test_reset_cancels_fade() {
        let mut fade = BackdropFade::new(3, 20);
        fade.index = 2;
        fade.trigger();
        fade.advance();
        fade.reset();
        assert_eq!(fade.index, 0);
        assert!(!fade.active);
        assert_eq!(fade.progress(), 0.0);
    }
}

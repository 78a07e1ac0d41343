//! Collision detection between the bird, pipes and the viewport edges
//!
//! Pipe hits use the bird box shrunk by a padding on every side, so grazing a
//! barrier with a wingtip is forgiven. Viewport edges use the full box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bird, Pipe, Viewport};

/// Axis-aligned rectangle in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Shrink by `padding` on all four sides
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(padding),
            max: self.max - Vec2::splat(padding),
        }
    }

    /// Strict overlap with the horizontal span `[left, right]`
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Which barrier of a pipe was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Barrier {
    Top,
    Bottom,
}

/// Check the padded bird box against one pipe
///
/// Returns the barrier hit, if any. A box too tall for the gap reports the
/// top barrier.
pub fn pipe_contact(bird: &Bird, pipe: &Pipe, padding: f32) -> Option<Barrier> {
    let hitbox = bird.bounds().inset(padding);
    if !hitbox.overlaps_x(pipe.x, pipe.right()) {
        return None;
    }
    if hitbox.top() < pipe.top {
        Some(Barrier::Top)
    } else if hitbox.bottom() > pipe.bottom {
        Some(Barrier::Bottom)
    } else {
        None
    }
}

/// True when the bird box leaves the viewport through the top or bottom edge
pub fn out_of_bounds(bird: &Bird, viewport: &Viewport) -> bool {
    let bounds = bird.bounds();
    bounds.bottom() > viewport.height || bounds.top() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn bird_at(x: f32, y: f32) -> Bird {
        let mut bird = Bird::new(&Tuning::default(), Viewport::new(1000.0, 800.0));
        bird.pos = Vec2::new(x, y);
        bird
    }

    fn pipe_at(x: f32, top: f32, bottom: f32) -> Pipe {
        Pipe {
            sequence: 1,
            x,
            width: 65.0,
            top,
            bottom,
            passed: false,
        }
    }

    #[test]
    fn test_collision_above_gap() {
        let bird = bird_at(200.0, 0.0);
        let pipe = pipe_at(200.0, 50.0, 250.0);
        // Padded top is 8, above the gap at 50
        assert_eq!(pipe_contact(&bird, &pipe, 8.0), Some(Barrier::Top));
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let bird = bird_at(200.0, 100.0);
        let pipe = pipe_at(200.0, 50.0, 250.0);
        // Padded box spans 108..172, inside 50..250
        assert_eq!(pipe_contact(&bird, &pipe, 8.0), None);
    }

    #[test]
    fn test_collision_below_gap() {
        let bird = bird_at(200.0, 190.0);
        let pipe = pipe_at(200.0, 50.0, 250.0);
        // Padded bottom is 262
        assert_eq!(pipe_contact(&bird, &pipe, 8.0), Some(Barrier::Bottom));
    }

    #[test]
    fn test_padding_forgives_grazes() {
        let pipe = pipe_at(200.0, 50.0, 250.0);
        // Unpadded top at 45 would clip the barrier; the padded top is 53
        let bird = bird_at(200.0, 45.0);
        assert_eq!(pipe_contact(&bird, &pipe, 8.0), None);
        assert_eq!(pipe_contact(&bird, &pipe, 0.0), Some(Barrier::Top));
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let bird = bird_at(200.0, 0.0);
        // Padded right edge is 272; pipe starting there does not overlap
        assert_eq!(pipe_contact(&bird, &pipe_at(272.0, 50.0, 250.0), 8.0), None);
        assert!(pipe_contact(&bird, &pipe_at(271.0, 50.0, 250.0), 8.0).is_some());
        // Pipe right edge at 208 touches padded left edge without overlapping
        assert_eq!(pipe_contact(&bird, &pipe_at(143.0, 50.0, 250.0), 8.0), None);
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let viewport = Viewport::new(1000.0, 800.0);
        assert!(!out_of_bounds(&bird_at(200.0, 0.0), &viewport));
        assert!(out_of_bounds(&bird_at(200.0, -0.5), &viewport));
        assert!(!out_of_bounds(&bird_at(200.0, 720.0), &viewport));
        assert!(out_of_bounds(&bird_at(200.0, 720.5), &viewport));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 80.0, 80.0).inset(8.0);
        assert_eq!(rect, Rect::new(8.0, 8.0, 64.0, 64.0));
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).inset(5.0).is_empty());
    }
}

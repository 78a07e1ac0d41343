//! Shape generation for 2D primitives
//!
//! All positions are in screen units (y down); the pipeline maps them to NDC.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::scene::{DrawCommand, Frame};
use crate::sim::Rect;

/// Height of a pipe's lip at the gap edge
const LIP_HEIGHT: f32 = 24.0;
/// How far the lip sticks out on each side
const LIP_OVERHANG: f32 = 4.0;
/// Hill band height as a fraction of the screen
const HILL_FRACTION: f32 = 0.12;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Two triangles covering a rectangle
pub fn quad(rect: Rect, color: [f32; 4]) -> [Vertex; 6] {
    gradient_quad(rect, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_quad(rect: Rect, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, top),
        Vertex::new(l, b, bottom),
        Vertex::new(r, t, top),
        Vertex::new(r, t, top),
        Vertex::new(l, b, bottom),
        Vertex::new(r, b, bottom),
    ]
}

/// Sky gradient plus a hill band, blended at `alpha`
pub fn backdrop(size: Vec2, index: usize, alpha: f32) -> Vec<Vertex> {
    let palette = colors::BACKDROPS[index % colors::BACKDROPS.len()];
    let hills = colors::HILLS[index % colors::HILLS.len()];
    let hill_top = size.y * (1.0 - HILL_FRACTION);

    let mut vertices = Vec::with_capacity(12);
    vertices.extend(gradient_quad(
        Rect::new(0.0, 0.0, size.x, hill_top),
        with_alpha(palette[0], alpha),
        with_alpha(palette[1], alpha),
    ));
    vertices.extend(quad(
        Rect::new(0.0, hill_top, size.x, size.y - hill_top),
        with_alpha(hills, alpha),
    ));
    vertices
}

/// One pipe barrier: shaded body with a lip on the gap side
pub fn barrier(rect: Rect, flipped: bool) -> Vec<Vertex> {
    let w = rect.width();
    let mut vertices = Vec::with_capacity(24);

    vertices.extend(quad(rect, colors::PIPE_BODY));
    vertices.extend(quad(
        Rect::new(rect.left(), rect.top(), w * 0.18, rect.height()),
        colors::PIPE_SHADE,
    ));
    vertices.extend(quad(
        Rect::new(rect.left() + w * 0.3, rect.top(), w * 0.12, rect.height()),
        colors::PIPE_HIGHLIGHT,
    ));

    let lip_h = LIP_HEIGHT.min(rect.height());
    let lip_y = if flipped {
        rect.bottom() - lip_h
    } else {
        rect.top()
    };
    vertices.extend(quad(
        Rect::new(
            rect.left() - LIP_OVERHANG,
            lip_y,
            w + LIP_OVERHANG * 2.0,
            lip_h,
        ),
        colors::PIPE_LIP,
    ));
    vertices
}

/// Blocky bird filling `rect`; the wing drops while falling
pub fn bird(rect: Rect, velocity: f32) -> Vec<Vertex> {
    let size = Vec2::new(rect.width(), rect.height());
    let at = |fx: f32, fy: f32, fw: f32, fh: f32| {
        Rect::new(
            rect.left() + size.x * fx,
            rect.top() + size.y * fy,
            size.x * fw,
            size.y * fh,
        )
    };
    let tilt = (velocity / 10.0).clamp(-1.0, 1.0) * 0.08;

    let mut vertices = Vec::with_capacity(30);
    vertices.extend(quad(at(0.1, 0.2, 0.7, 0.6), colors::BIRD_BODY));
    vertices.extend(quad(at(0.12, 0.42 + tilt, 0.32, 0.2), colors::BIRD_WING));
    vertices.extend(quad(at(0.55, 0.25, 0.2, 0.2), colors::BIRD_EYE));
    vertices.extend(quad(at(0.66, 0.3, 0.07, 0.1), colors::BIRD_PUPIL));
    vertices.extend(quad(at(0.8, 0.45, 0.18, 0.14), colors::BIRD_BEAK));
    vertices
}

/// Triangles for every non-text command in a frame
pub fn frame_vertices(frame: &Frame) -> Vec<Vertex> {
    if !frame.viewport.is_valid() {
        return Vec::new();
    }
    let size = Vec2::new(frame.viewport.width, frame.viewport.height);

    let mut vertices = Vec::new();
    for command in &frame.commands {
        match command {
            DrawCommand::Backdrop { index, alpha } => {
                vertices.extend(backdrop(size, *index, *alpha));
            }
            DrawCommand::Bird { rect, velocity } => vertices.extend(bird(*rect, *velocity)),
            DrawCommand::Barrier { rect, flipped } => vertices.extend(barrier(*rect, *flipped)),
            DrawCommand::Overlay { color } => {
                vertices.extend(quad(Rect::new(0.0, 0.0, size.x, size.y), *color));
            }
            DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build_frame;
    use crate::sim::{GameState, TerminationCause, Viewport};
    use crate::tuning::Tuning;

    #[test]
    fn test_quad_covers_rect() {
        let vertices = quad(Rect::new(10.0, 20.0, 30.0, 40.0), colors::BIRD_BODY);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_backdrop_alpha_is_applied() {
        let vertices = backdrop(Vec2::new(100.0, 100.0), 1, 0.25);
        assert!(vertices.iter().all(|v| (v.color[3] - 0.25).abs() < 1e-6));
        // Indices past the palette wrap around
        assert_eq!(
            backdrop(Vec2::new(100.0, 100.0), 4, 1.0),
            backdrop(Vec2::new(100.0, 100.0), 1, 1.0)
        );
    }

    #[test]
    fn test_lip_sits_on_gap_edge() {
        let top = barrier(Rect::new(0.0, 0.0, 65.0, 200.0), true);
        let lip = &top[18..];
        assert!(lip.iter().all(|v| v.position[1] >= 176.0));

        let bottom = barrier(Rect::new(0.0, 500.0, 65.0, 300.0), false);
        let lip = &bottom[18..];
        assert!(lip.iter().all(|v| v.position[1] <= 524.0));
    }

    #[test]
    fn test_game_over_frame_ends_with_overlay() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::new(800.0, 600.0));
        state.start();
        state.terminate(TerminationCause::OutOfBounds);
        let vertices = frame_vertices(&build_frame(&state));
        let last = vertices.last().unwrap();
        assert_eq!(last.color, crate::scene::GAME_OVER_DIM);
    }

    #[test]
    fn test_degenerate_viewport_draws_nothing() {
        let state = GameState::new(1, Tuning::default(), Viewport::new(0.0, 600.0));
        assert!(frame_vertices(&build_frame(&state)).is_empty());
    }
}

//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Sky gradient (top, horizon) per backdrop: day, dusk, night
    pub const BACKDROPS: [[[f32; 4]; 2]; 3] = [
        [[0.27, 0.71, 0.78, 1.0], [0.75, 0.91, 0.96, 1.0]],
        [[0.42, 0.25, 0.55, 1.0], [0.98, 0.62, 0.40, 1.0]],
        [[0.03, 0.04, 0.14, 1.0], [0.13, 0.18, 0.38, 1.0]],
    ];
    /// Hill band along the bottom of each backdrop
    pub const HILLS: [[f32; 4]; 3] = [
        [0.37, 0.69, 0.22, 1.0],
        [0.33, 0.36, 0.25, 1.0],
        [0.06, 0.12, 0.10, 1.0],
    ];
    pub const PIPE_BODY: [f32; 4] = [0.39, 0.67, 0.16, 1.0];
    pub const PIPE_SHADE: [f32; 4] = [0.29, 0.48, 0.10, 1.0];
    pub const PIPE_HIGHLIGHT: [f32; 4] = [0.57, 0.84, 0.24, 1.0];
    pub const PIPE_LIP: [f32; 4] = [0.24, 0.39, 0.08, 1.0];
    pub const BIRD_BODY: [f32; 4] = [0.96, 0.78, 0.26, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.84, 0.65, 0.14, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.08, 0.08, 0.08, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.88, 0.29, 0.14, 1.0];
    pub const CLEAR: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

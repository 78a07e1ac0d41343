//! WebGPU rendering module
//!
//! Draw commands from the scene are turned into colored triangles and drawn
//! with a single alpha-blended pipeline. Text is left to the DOM HUD.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::frame_vertices;
pub use vertex::Vertex;

//! WebGPU rendering module
//!
//! Draws the world as flat-colored rectangles through a single triangle-list
//! pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use shapes::world_vertices;
pub use vertex::Vertex;

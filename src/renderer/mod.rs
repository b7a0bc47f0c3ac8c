//! WebGPU rendering module
//!
//! The scene builder reads game state and emits flat-coloured triangles in
//! canvas pixels; the pipeline maps them to NDC and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;

//! WebGPU rendering module
//!
//! A single vertex-color pipeline: shapes are tessellated on the CPU in
//! field space and converted to NDC before upload.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

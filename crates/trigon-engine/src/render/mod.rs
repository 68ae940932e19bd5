//! Rendering helpers.
//!
//! Small owning wrappers for vertex data and the per-frame clear/draw/present
//! sequence. Everything is generic over `GlApi` so it runs against the mock GL
//! in tests.

mod error;
mod frame;
mod mesh;
mod vertex;

pub use error::GlError;
pub use frame::{Present, apply_viewport, render_frame};
pub use mesh::VertexArray;
pub use vertex::Vertex2;

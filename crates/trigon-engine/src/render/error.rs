use thiserror::Error;

/// GL object allocation failure outside the shader pipeline.
#[derive(Debug, Error)]
pub enum GlError {
    #[error("failed to create vertex array: {0}")]
    VertexArray(String),

    #[error("failed to create vertex buffer: {0}")]
    Buffer(String),

    #[error("{0} vertices exceed the draw call limit")]
    TooManyVertices(usize),
}

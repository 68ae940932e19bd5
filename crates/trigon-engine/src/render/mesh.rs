use std::fmt;
use std::rc::Rc;

use crate::device::GlApi;

use super::error::GlError;
use super::vertex::Vertex2;

/// One vertex array object plus the vertex buffer feeding attribute 0.
///
/// Geometry is uploaded once (`STATIC_DRAW`) and drawn as a triangle list.
/// Dropping releases the vertex array, then the buffer.
pub struct VertexArray<G: GlApi> {
    gl: Rc<G>,
    vao: G::VertexArray,
    vbo: G::Buffer,
    count: i32,
}

impl<G: GlApi> VertexArray<G> {
    /// Uploads `vertices` and records the attribute layout in a new VAO.
    ///
    /// The VAO stays bound afterwards.
    pub fn upload(gl: Rc<G>, vertices: &[Vertex2]) -> Result<Self, GlError> {
        let count =
            i32::try_from(vertices.len()).map_err(|_| GlError::TooManyVertices(vertices.len()))?;

        let vao = gl.create_vertex_array().map_err(GlError::VertexArray)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(GlError::Buffer(e));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.upload_array_buffer(vbo, bytemuck::cast_slice(vertices));
        gl.float_attribute(0, Vertex2::COMPONENTS, Vertex2::STRIDE, 0);

        log::debug!("uploaded {count} vertices (vao {vao:?}, vbo {vbo:?})");
        Ok(Self { gl, vao, vbo, count })
    }

    /// Number of vertices drawn per call.
    #[inline]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Draws every vertex as `TRIANGLES`.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
        self.gl.draw_triangles(0, self.count);
    }
}

impl<G: GlApi> Drop for VertexArray<G> {
    fn drop(&mut self) {
        log::debug!("releasing vao {:?} and vbo {:?}", self.vao, self.vbo);
        self.gl.delete_vertex_array(self.vao);
        self.gl.delete_buffer(self.vbo);
    }
}

impl<G: GlApi> fmt::Debug for VertexArray<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexArray")
            .field("vao", &self.vao)
            .field("vbo", &self.vbo)
            .field("count", &self.count)
            .finish()
    }
}

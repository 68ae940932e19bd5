use bytemuck::{Pod, Zeroable};

/// 2D position fed straight to clip space by the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex2 {
    pub pos: [f32; 2],
}

impl Vertex2 {
    /// Components per vertex for attribute 0.
    pub const COMPONENTS: i32 = 2;

    /// Byte distance between consecutive vertices.
    pub const STRIDE: i32 = std::mem::size_of::<Self>() as i32;

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: [x, y] }
    }
}

use std::fmt;

/// Programmable pipeline stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    /// The `glCreateShader` type for this stage.
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        }
    }

    /// Label used in diagnostics, spelled like the GL enum.
    pub const fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "GL_VERTEX_SHADER",
            ShaderStage::Fragment => "GL_FRAGMENT_SHADER",
            ShaderStage::Geometry => "GL_GEOMETRY_SHADER",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

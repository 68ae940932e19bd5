use std::fmt;
use std::rc::Rc;

use crate::device::GlApi;

use super::stage::ShaderStage;

/// Owning handle to one compiled shader stage.
///
/// The GL object is deleted when the handle drops.
pub struct ShaderObject<G: GlApi> {
    gl: Rc<G>,
    raw: G::Shader,
    stage: ShaderStage,
}

impl<G: GlApi> ShaderObject<G> {
    /// Takes ownership of `raw`.
    pub(crate) fn from_raw(gl: Rc<G>, raw: G::Shader, stage: ShaderStage) -> Self {
        Self { gl, raw, stage }
    }

    #[inline]
    pub fn raw(&self) -> G::Shader {
        self.raw
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: GlApi> Drop for ShaderObject<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.raw);
    }
}

impl<G: GlApi> fmt::Debug for ShaderObject<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderObject")
            .field("raw", &self.raw)
            .field("stage", &self.stage)
            .finish()
    }
}

/// Owning handle to a linked program.
///
/// Only the linker constructs one, so holding a `ShaderProgram` means linking
/// succeeded. The program is deleted exactly once, when the handle drops.
pub struct ShaderProgram<G: GlApi> {
    gl: Rc<G>,
    raw: G::Program,
}

impl<G: GlApi> ShaderProgram<G> {
    pub(crate) fn from_raw(gl: Rc<G>, raw: G::Program) -> Self {
        Self { gl, raw }
    }

    #[inline]
    pub fn raw(&self) -> G::Program {
        self.raw
    }

    /// Makes this the active program for subsequent draws.
    pub fn bind(&self) {
        self.gl.use_program(Some(self.raw));
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        log::debug!("releasing shader program {:?}", self.raw);
        self.gl.delete_program(self.raw);
    }
}

impl<G: GlApi> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("raw", &self.raw).finish()
    }
}

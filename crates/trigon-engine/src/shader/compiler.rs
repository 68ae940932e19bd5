use std::rc::Rc;

use crate::device::GlApi;

use super::error::ShaderError;
use super::info_log::{InfoLog, LOG_CAPACITY};
use super::object::ShaderObject;
use super::stage::ShaderStage;

/// Compiles `source` as a `stage` shader.
///
/// On failure the shader object is released before the error is returned, and
/// the compiler log is bounded by [`LOG_CAPACITY`].
pub fn compile<G: GlApi>(
    gl: &Rc<G>,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderObject<G>, ShaderError> {
    compile_bounded(gl, stage, source, LOG_CAPACITY)
}

pub(crate) fn compile_bounded<G: GlApi>(
    gl: &Rc<G>,
    stage: ShaderStage,
    source: &str,
    log_capacity: usize,
) -> Result<ShaderObject<G>, ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource { stage });
    }

    let raw = gl
        .create_shader(stage)
        .map_err(|message| ShaderError::Create { stage, message })?;

    // Owned from here on: every early return releases it.
    let shader = ShaderObject::from_raw(Rc::clone(gl), raw, stage);

    gl.shader_source(raw, source);
    gl.compile_shader(raw);

    if !gl.shader_compile_status(raw) {
        let log = InfoLog::from_driver(gl.shader_info_log(raw), log_capacity);
        return Err(ShaderError::Compile {
            stage,
            log,
            source_text: source.to_owned(),
        });
    }

    log::debug!("compiled {stage} ({raw:?})");
    Ok(shader)
}

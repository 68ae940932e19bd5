use std::path::PathBuf;

use thiserror::Error;

use super::info_log::InfoLog;
use super::stage::ShaderStage;

/// Failure while building a shader program.
///
/// None of these are recoverable at this layer; callers propagate them to the
/// bootstrap, which reports and exits.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Could not read shader file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} source is empty")]
    EmptySource { stage: ShaderStage },

    #[error("program needs a {stage} stage")]
    MissingStage { stage: ShaderStage },

    #[error("failed to create {stage} object: {message}")]
    Create { stage: ShaderStage, message: String },

    #[error("failed to create program object: {message}")]
    CreateProgram { message: String },

    #[error("{stage} failed compiled:\n{source_text}:{log}")]
    Compile {
        stage: ShaderStage,
        log: InfoLog,
        source_text: String,
    },

    #[error("Program failed linkage: {log}")]
    Link { log: InfoLog },
}

impl ShaderError {
    /// Stage the error belongs to, when it is stage specific.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::EmptySource { stage }
            | ShaderError::MissingStage { stage }
            | ShaderError::Create { stage, .. }
            | ShaderError::Compile { stage, .. } => Some(*stage),
            ShaderError::Io { .. } | ShaderError::CreateProgram { .. } | ShaderError::Link { .. } => {
                None
            }
        }
    }

    /// Compiler or linker log, if the driver produced one.
    pub fn info_log(&self) -> Option<&InfoLog> {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => Some(log),
            _ => None,
        }
    }
}

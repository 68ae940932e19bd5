//! Shader program building.
//!
//! Turns vertex + fragment sources into a linked [`ShaderProgram`]:
//! - [`ShaderSource`] loads stage text from disk
//! - [`compile`] builds one stage into an owning [`ShaderObject`]
//! - [`ProgramBuilder`] / [`link`] compile both stages, then link them
//!
//! Every failure is reported as a [`ShaderError`]; compiler and linker logs
//! are bounded by [`LOG_CAPACITY`].

mod builder;
mod compiler;
mod error;
mod info_log;
mod object;
mod source;
mod stage;

pub use builder::{BuildState, ProgramBuilder, link};
pub use compiler::compile;
pub use error::ShaderError;
pub use info_log::{InfoLog, LOG_CAPACITY};
pub use object::{ShaderObject, ShaderProgram};
pub use source::ShaderSource;
pub use stage::ShaderStage;

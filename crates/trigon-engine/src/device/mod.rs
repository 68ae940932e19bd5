//! OpenGL device management.
//!
//! This module is responsible for:
//! - creating the window, GL display, context and surface (`GlDevice`)
//! - the `GlApi` seam every GL call in the engine goes through
//! - querying driver strings for startup diagnostics

mod api;
mod error;
mod gl;
mod info;
mod init;

#[cfg(any(test, feature = "mock-gl"))]
pub mod mock;

pub use api::{GlApi, NativeGl};
pub use error::InitError;
pub use gl::GlDevice;
pub use info::{DriverString, GlInfo};
pub use init::GlInit;

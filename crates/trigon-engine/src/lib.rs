//! Trigon engine crate.
//!
//! This crate owns the platform + OpenGL runtime pieces used by the app:
//! the window loop, the GL device, the shader program builder and the small
//! render helpers that sit on top of them.

pub mod device;
pub mod shader;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;

//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and wires window events to the GL device and the
//! application.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

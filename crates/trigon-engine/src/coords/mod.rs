//! Coordinate types shared between the device and renderers.
//!
//! GL window space:
//! - Physical pixels
//! - Origin bottom-left
//! - +X right, +Y up

mod viewport;

pub use viewport::Viewport;

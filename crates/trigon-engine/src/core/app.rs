use winit::event::WindowEvent;

use crate::coords::Viewport;
use crate::device::GlDevice;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
///
/// All callbacks run on the event loop thread with the GL context current.
/// Errors returned from `on_init` or `on_frame` end the loop and are returned
/// from `Runtime::run`.
pub trait App {
    /// Called once the GL device exists, before the first frame.
    ///
    /// GL resources the app creates here must be released in `on_exit`.
    fn on_init(&mut self, device: &GlDevice) -> anyhow::Result<()>;

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the viewport has been set for a new drawable size.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> anyhow::Result<AppControl>;

    /// Called while the GL context is still current, right before the device
    /// is destroyed.
    fn on_exit(&mut self) {}
}

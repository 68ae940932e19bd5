use std::rc::Rc;

use crate::coords::Viewport;
use crate::device::{GlDevice, NativeGl};
use crate::paint::Color;
use crate::render::render_frame;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub(crate) device: &'a mut GlDevice,
    pub(crate) frame_index: u64,
}

impl<'a> FrameCtx<'a> {
    /// Shared GL function table.
    pub fn gl(&self) -> &Rc<NativeGl> {
        self.device.gl()
    }

    pub fn viewport(&self) -> Viewport {
        self.device.viewport()
    }

    /// Monotonic frame counter, starting at 0.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Clears the surface with `clear`, calls `draw`, then presents the frame.
    ///
    /// Call at most once per frame.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> anyhow::Result<()>
    where
        F: FnOnce(&NativeGl),
    {
        let gl = Rc::clone(self.device.gl());
        render_frame(&*gl, &mut *self.device, clear, draw)
    }
}

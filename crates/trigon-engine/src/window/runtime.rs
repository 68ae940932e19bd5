use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{GlDevice, GlInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "winit + OpenGL".to_string(),
            initial_size: LogicalSize::new(1280.0, 960.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes.
    ///
    /// Returns the first fatal error raised by device setup or the app.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => {
                log::info!("window closed after {} frames", state.frame_index);
                Ok(())
            }
        }
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    device: Option<GlDevice>,
    frame_index: u64,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            device: None,
            frame_index: 0,
            exit_requested: false,
            fatal: None,
        }
    }

    fn init_device(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let device = GlDevice::new(event_loop, &self.config, &self.gl_init)
            .context("failed to initialize OpenGL")?;
        device.info().log();

        if let Err(e) = self.app.on_init(&device) {
            // Whatever the app created must go while the context is current.
            self.app.on_exit();
            return Err(e);
        }

        device.window().request_redraw();
        self.device = Some(device);
        Ok(())
    }

    /// Records `err` (first one wins) and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.request_exit(event_loop);
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    /// Releases app GL resources, then the device. Idempotent.
    fn release(&mut self) {
        if let Some(device) = self.device.take() {
            self.app.on_exit();
            drop(device);
            log::debug!("GL device released");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(device) = self.device.as_mut() else {
            return;
        };

        let mut ctx = FrameCtx {
            device,
            frame_index: self.frame_index,
        };
        let result = self.app.on_frame(&mut ctx);
        self.frame_index = self.frame_index.wrapping_add(1);

        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => self.request_exit(event_loop),
            Err(e) => self.fail(event_loop, e),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.device.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.init_device(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by vsync.
        if let Some(device) = &self.device {
            device.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.release();
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                let Some(device) = self.device.as_mut() else {
                    return;
                };
                if let Some(viewport) = device.resize(new_size) {
                    log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
                    self.app.on_resize(viewport);
                }
                device.window().request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release();
    }
}

use std::num::NonZeroU32;
use std::rc::Rc;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::coords::Viewport;
use crate::render::{Present, apply_viewport};
use crate::window::RuntimeConfig;

use super::api::NativeGl;
use super::error::InitError;
use super::info::GlInfo;
use super::init::GlInit;

/// Owns the window and its current OpenGL context.
///
/// This type is the low-level rendering context:
/// - creates the window together with a matching GL config
/// - creates the context + window surface and makes them current
/// - loads GL function pointers into a shared `glow::Context`
/// - resizes the surface and presents frames
///
/// Field order is drop order: the surface goes before its context, the window last.
pub struct GlDevice {
    /// Loaded GL functions, shared with every owning handle.
    gl: Rc<NativeGl>,

    /// Double-buffered window surface.
    surface: Surface<WindowSurface>,

    /// Context current on the event loop thread.
    context: PossiblyCurrentContext,

    /// Driver identification captured at creation.
    info: GlInfo,

    /// Viewport most recently applied.
    viewport: Viewport,

    window: Window,
}

impl GlDevice {
    /// Creates the window, makes a GL context current on it, and sets the
    /// initial viewport to the full drawable size.
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
        init: &GlInit,
    ) -> Result<Self, InitError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_resizable(config.resizable);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, choose_config)
            .map_err(|e| InitError::Display(e.to_string()))?;

        let window = window.ok_or(InitError::MissingWindow)?;

        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(InitError::ZeroSize);
        }

        let raw_window_handle = window.window_handle()?.as_raw();
        let display = gl_config.display();

        let (major, minor) = init.version;
        let profile = if init.core_profile {
            GlProfile::Core
        } else {
            GlProfile::Compatibility
        };
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(profile)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .map_err(|source| InitError::Context { major, minor, source })?;

        let surface_attrs = window.build_surface_attributes(SurfaceAttributesBuilder::new())?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(InitError::Surface)?;

        let context = not_current
            .make_current(&surface)
            .map_err(InitError::MakeCurrent)?;

        if init.vsync {
            if let Err(e) =
                surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("vsync unavailable: {e}");
            }
        }

        let gl = unsafe {
            NativeGl::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        let info = GlInfo::query(&gl);
        let viewport = apply_viewport(&gl, size.width, size.height).unwrap_or_default();

        log::debug!(
            "GL device ready: {}x{} px, requested {major}.{minor} {profile:?}",
            size.width,
            size.height
        );

        Ok(Self {
            gl: Rc::new(gl),
            surface,
            context,
            info,
            viewport,
            window,
        })
    }

    /// Returns the shared GL function table.
    pub fn gl(&self) -> &Rc<NativeGl> {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn info(&self) -> &GlInfo {
        &self.info
    }

    /// Returns the viewport currently applied.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizes the surface and sets the viewport to `(0, 0, width, height)`.
    ///
    /// A zero dimension (minimized window) leaves the surface and viewport
    /// untouched and returns `None`.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> Option<Viewport> {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return None;
        };

        self.surface.resize(&self.context, width, height);
        let viewport = apply_viewport(&*self.gl, width.get(), height.get())?;
        self.viewport = viewport;
        Some(viewport)
    }
}

impl Present for GlDevice {
    fn present(&mut self) -> anyhow::Result<()> {
        self.window.pre_present_notify();
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}

/// Picks the config with the fewest samples; the demo does not multisample.
fn choose_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // `find_configs` reports an empty match as `BadConfig` before the picker
    // runs, so the iterator always yields at least one config.
    configs
        .reduce(|best, c| if c.num_samples() < best.num_samples() { c } else { best })
        .expect("glutin-winit only picks from a non-empty config list")
}

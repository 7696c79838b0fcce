use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use glow::HasContext;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::GlInit;
use crate::core::Presenter;

/// Owns the window, its GL surface and the current context.
///
/// Fields drop in declaration order: surface, context, then the window the
/// surface was created on.
pub struct GlDevice {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    window: Arc<Window>,
}

impl GlDevice {
    /// Creates the window and a current core-profile context for it.
    ///
    /// Must be called from `resumed`, on the thread that will render.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create window and GL display: {e}"))?;
        let window = Arc::new(window.context("GL display was created without a window")?);

        log::debug!(
            "picked GL config: {} samples, alpha {}",
            config.num_samples(),
            config.alpha_size()
        );

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let display = config.display();
        let (major, minor) = init.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw window handle belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;
        // SAFETY: same as above; the surface is dropped before the window.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create the window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval {interval:?}: {e}");
        }

        // SAFETY: the context is current on this thread and stays current for
        // the lifetime of the device.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        let version = gl.version();
        log::info!(
            "OpenGL {}.{} context ready ({})",
            version.major,
            version.minor,
            version.vendor_info
        );

        Ok(Self {
            surface,
            context,
            gl: Arc::new(gl),
            window,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Loaded GL entry points for the current context.
    pub fn glow(&self) -> Arc<glow::Context> {
        Arc::clone(&self.gl)
    }

    /// Resizes the surface. Zero sizes are ignored (e.g. minimized windows).
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, width, height);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

impl Presenter for GlDevice {
    fn present(&mut self) -> Result<()> {
        self.window.pre_present_notify();
        self.swap_buffers()
    }
}

/// Picks the config with the most samples.
///
/// glutin only calls the picker after `find_configs` returned at least one
/// config matching the template (an empty match is reported as a build error
/// instead), so the iterator is never empty here.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    most_samples(configs, |c| c.num_samples())
        .expect("glutin never calls the config picker with an empty iterator")
}

/// First candidate with the highest sample count.
fn most_samples<C>(candidates: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    candidates.reduce(|best, candidate| {
        if samples(&candidate) > samples(&best) {
            candidate
        } else {
            best
        }
    })
}

use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{LoopError, RenderLoop};
use crate::device::{GlDevice, GlInit};
use crate::gl::{GlApi, GlowApi};
use crate::overlay::EguiOverlay;
use crate::scene::SceneConfig;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gl: GlInit,
    pub scene: SceneConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gimbal".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            gl: GlInit::default(),
            scene: SceneConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until the user closes it or presses Escape.
    ///
    /// A failure while bringing up the context or building the scene stops the
    /// event loop and is returned here.
    pub fn run(config: RuntimeConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything that lives as long as the GL context.
///
/// Field order is teardown order: render loop, overlay, then the device that
/// owns the context.
struct Session {
    render_loop: RenderLoop,
    overlay: EguiOverlay,
    device: GlDevice,
}

impl Session {
    fn start(event_loop: &ActiveEventLoop, config: &RuntimeConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let device = GlDevice::new(event_loop, attributes, &config.gl)?;

        // SAFETY: `GlDevice::new` left its context current on this thread, and
        // the render loop is dropped before the device.
        let gl: Rc<dyn GlApi> = Rc::new(unsafe { GlowApi::new(device.glow()) });

        let mut render_loop = RenderLoop::new(gl);
        let size = device.window().inner_size();
        render_loop.resize(size.width, size.height);
        render_loop
            .setup(&config.scene)
            .context("failed to build the scene")?;

        let overlay = EguiOverlay::new(Arc::clone(device.window()), device.glow())?;

        log::info!("session started ({}x{})", size.width, size.height);
        Ok(Self {
            render_loop,
            overlay,
            device,
        })
    }

    fn window_id(&self) -> WindowId {
        self.device.window().id()
    }

    fn shutdown(self) {
        let Session {
            mut render_loop,
            overlay,
            device,
        } = self;

        render_loop.shutdown();
        drop(render_loop);
        drop(overlay);
        drop(device);
        log::info!("session closed");
    }
}

struct AppState {
    config: RuntimeConfig,
    session: Option<Session>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            session: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.exit_requested = true;
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match Session::start(event_loop, &self.config) {
            Ok(session) => {
                session.device.window().request_redraw();
                self.session = Some(session);
            }
            Err(err) => {
                self.fail(err.context("startup failed"));
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Checked once per iteration, after the in-flight frame has completed.
        if self.exit_requested {
            self.close_session();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(session) = &self.session {
            session.device.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window_id() != window_id {
            return;
        }

        // egui sees every event first. Its consumed flag is not consulted for
        // exit: Escape closes even while a slider has keyboard focus.
        session.overlay.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.exit_requested = true;
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } if is_exit_key(physical_key, state) => {
                log::info!("escape pressed");
                self.exit_requested = true;
            }

            WindowEvent::Resized(size) => {
                session.device.resize(size);
                session.render_loop.resize(size.width, size.height);
                session.device.window().request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let result = session
                    .render_loop
                    .frame(&mut session.overlay, &mut session.device);

                match result {
                    Ok(_) => {}
                    Err(LoopError::Present(reason)) => {
                        log::warn!("frame dropped: {reason}");
                    }
                    Err(err) => self.fail(anyhow::Error::new(err).context("render loop stopped")),
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close_session();
    }
}

fn is_exit_key(key: PhysicalKey, state: ElementState) -> bool {
    key == PhysicalKey::Code(KeyCode::Escape) && state == ElementState::Pressed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_requests_exit() {
        assert!(is_exit_key(
            PhysicalKey::Code(KeyCode::Escape),
            ElementState::Pressed
        ));
    }

    #[test]
    fn release_and_other_keys_are_ignored() {
        assert!(!is_exit_key(
            PhysicalKey::Code(KeyCode::Escape),
            ElementState::Released
        ));
        assert!(!is_exit_key(
            PhysicalKey::Code(KeyCode::KeyQ),
            ElementState::Pressed
        ));
    }

    #[test]
    fn default_config_matches_the_stock_window() {
        let config = RuntimeConfig::default();

        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert_eq!(config.gl, GlInit::default());
        assert_eq!(config.scene.transform_uniform, "transform");
    }
}

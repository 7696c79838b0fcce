use std::rc::Rc;

use glam::Mat4;

use crate::gl::{Bindings, GlApi};
use crate::scene::{Scene, SceneConfig, TransformState};

use super::{LoopError, LoopState, Overlay, Presenter};

/// Owns the scene, the binding record and the transform, and runs frames.
///
/// Single-threaded: the GL context must be current on the calling thread for
/// every method except the accessors.
pub struct RenderLoop {
    scene: Option<Scene>,
    bindings: Bindings,
    transform: TransformState,
    state: LoopState,
    frames: u64,
    gl: Rc<dyn GlApi>,
}

impl RenderLoop {
    pub fn new(gl: Rc<dyn GlApi>) -> Self {
        Self {
            scene: None,
            bindings: Bindings::new(),
            transform: TransformState::default(),
            state: LoopState::Uninitialized,
            frames: 0,
            gl,
        }
    }

    /// One-time resource construction.
    ///
    /// On failure the loop stays `Uninitialized` and refuses to run frames.
    pub fn setup(&mut self, config: &SceneConfig) -> Result<(), LoopError> {
        self.expect_state("setup", LoopState::Uninitialized)?;

        let scene = match Scene::new(&self.gl, &mut self.bindings, config) {
            Ok(scene) => scene,
            Err(err) => {
                self.bindings.reset();
                return Err(err.into());
            }
        };
        self.scene = Some(scene);
        self.state = LoopState::ResourcesReady;

        log::info!("render loop resources ready");
        Ok(())
    }

    /// Runs one complete frame and returns the transform that was drawn.
    ///
    /// Phases: overlay widgets, clear, draw, overlay paint, present. The
    /// binding record is reset after the overlay paints because the UI
    /// renderer changes GL bindings behind our back.
    pub fn frame(
        &mut self,
        overlay: &mut dyn Overlay,
        presenter: &mut dyn Presenter,
    ) -> Result<Mat4, LoopError> {
        match self.state {
            LoopState::Running => {}
            LoopState::ResourcesReady => {
                log::info!("entering render loop");
                self.state = LoopState::Running;
            }
            state => {
                return Err(LoopError::InvalidState {
                    operation: "frame",
                    state,
                });
            }
        }

        let Some(scene) = self.scene.as_ref() else {
            return Err(LoopError::InvalidState {
                operation: "frame",
                state: self.state,
            });
        };

        overlay.run(&mut self.transform);

        scene.clear();
        let matrix = scene.draw(&mut self.bindings, &self.transform)?;

        overlay.paint();
        self.bindings.reset();

        presenter
            .present()
            .map_err(|e| LoopError::Present(format!("{e:#}")))?;

        self.frames += 1;
        log::trace!("frame {} done", self.frames);
        Ok(matrix)
    }

    /// Forwards a framebuffer size change to the viewport.
    ///
    /// Zero-sized framebuffers (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.state == LoopState::Shutdown {
            return;
        }
        self.gl.viewport(0, 0, width as i32, height as i32);
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Unbinds everything and releases the scene: layout, buffer, program.
    ///
    /// Safe to call more than once. Must run while the context is still alive.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Shutdown {
            return;
        }
        if let Some(scene) = self.scene.take() {
            scene.unbind(&mut self.bindings);
            drop(scene);
        }
        self.state = LoopState::Shutdown;
        log::info!("render loop shut down after {} frames", self.frames);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn expect_state(&self, operation: &'static str, expected: LoopState) -> Result<(), LoopError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LoopError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

use std::sync::Arc;

use anyhow::{anyhow, Result};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::Overlay;
use crate::scene::TransformState;

use super::panel::rotation_panel;

/// Tessellated UI waiting for the paint phase.
struct PendingPaint {
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui context, winit input glue and the glow painter for one window.
///
/// Must be dropped while its GL context is still current.
pub struct EguiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    painter: egui_glow::Painter,
    window: Arc<Window>,
    pending: Option<PendingPaint>,
}

impl EguiOverlay {
    pub fn new(window: Arc<Window>, gl: Arc<glow::Context>) -> Result<Self> {
        let painter = egui_glow::Painter::new(gl, "", None, false)
            .map_err(|e| anyhow!("failed to create the UI painter: {e}"))?;

        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());

        let state = egui_winit::State::new(
            ctx.clone(),
            ctx.viewport_id(),
            &*window,
            Some(window.scale_factor() as f32),
            None,
            Some(painter.max_texture_side()),
        );

        log::debug!("UI overlay ready (max texture side {})", painter.max_texture_side());
        Ok(Self {
            ctx,
            state,
            painter,
            window,
            pending: None,
        })
    }

    /// Feeds a window event to egui. Returns `true` when egui consumed it and
    /// the application should not react to it.
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(&self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }
        response.consumed
    }
}

impl Overlay for EguiOverlay {
    fn run(&mut self, transform: &mut TransformState) {
        let raw_input = self.state.take_egui_input(&self.window);
        let output = self
            .ctx
            .run(raw_input, |ctx| {
                rotation_panel(ctx, transform);
            });

        self.state
            .handle_platform_output(&self.window, output.platform_output);

        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.pending = Some(PendingPaint {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        });
    }

    fn paint(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let size = self.window.inner_size();
        self.painter.paint_and_update_textures(
            [size.width, size.height],
            pending.pixels_per_point,
            &pending.primitives,
            &pending.textures_delta,
        );
    }
}

impl Drop for EguiOverlay {
    fn drop(&mut self) {
        self.painter.destroy();
        log::debug!("UI overlay released");
    }
}

use std::ops::RangeInclusive;

use crate::scene::TransformState;

pub const PANEL_TITLE: &str = "Triangle Rotation Settings";

/// Slider range for every angle, in degrees.
pub const ANGLE_RANGE: RangeInclusive<f32> = 0.0..=360.0;

/// Declares the rotation window: one slider per axis, bound directly to the
/// fields of `transform`.
///
/// Returns the X, Y and Z slider responses, or `None` while the window is
/// collapsed or hidden.
pub fn rotation_panel(
    ctx: &egui::Context,
    transform: &mut TransformState,
) -> Option<[egui::Response; 3]> {
    egui::Window::new(PANEL_TITLE)
        .resizable(false)
        .show(ctx, |ui| {
            [
                angle_slider(ui, "Rotate X", &mut transform.angle_x),
                angle_slider(ui, "Rotate Y", &mut transform.angle_y),
                angle_slider(ui, "Rotate Z", &mut transform.angle_z),
            ]
        })
        .and_then(|window| window.inner)
}

fn angle_slider(ui: &mut egui::Ui, label: &str, value: &mut f32) -> egui::Response {
    ui.add(
        egui::Slider::new(value, ANGLE_RANGE)
            .text(label)
            .fixed_decimals(1),
    )
}

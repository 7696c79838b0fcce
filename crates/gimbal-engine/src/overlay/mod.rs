//! Control panel drawn over the scene with egui.

mod egui_overlay;
mod panel;

pub use egui_overlay::EguiOverlay;
pub use panel::{rotation_panel, ANGLE_RANGE, PANEL_TITLE};

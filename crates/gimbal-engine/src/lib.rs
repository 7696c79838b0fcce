//! Gimbal engine crate.
//!
//! Renders one rotatable triangle through OpenGL with an egui control panel.
//! The GPU-facing parts (`gl`, `resource`, `scene`, `core`) only talk to the
//! driver through the [`gl::GlApi`] seam; `device`, `overlay` and `window`
//! bind them to glutin, egui and winit.

pub mod gl;
pub mod resource;
pub mod scene;
pub mod core;

pub mod device;
pub mod overlay;
pub mod window;

pub mod logging;

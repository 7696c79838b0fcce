//! The rendered scene: one rotated triangle.
//!
//! - `TransformState` holds the three rotation angles edited by the overlay
//! - `SceneConfig` carries everything the one-time setup needs (shader text,
//!   vertex data, uniform name, clear colour)
//! - `Scene` owns the GPU resources built from a config and issues the draw

mod config;
mod setup;
mod transform;

pub use config::SceneConfig;
pub use setup::Scene;
pub use transform::TransformState;

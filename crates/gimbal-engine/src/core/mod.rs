//! Frame orchestration.
//!
//! `RenderLoop` owns the scene and the binding record, and drives one frame at
//! a time through the collaborators it is handed: an [`Overlay`] that edits
//! the transform and paints the UI, and a [`Presenter`] that shows the result.
//! The runtime wires the production implementations; tests use fakes.

mod collaborators;
mod error;
mod render_loop;

pub use collaborators::{Overlay, Presenter};
pub use error::{LoopError, LoopState};
pub use render_loop::RenderLoop;

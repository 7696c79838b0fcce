//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and wires window events to the device, the
//! overlay and the render loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

use thiserror::Error;

use crate::gl::GpuError;

/// Lifecycle of a [`RenderLoop`](super::RenderLoop).
///
/// `Uninitialized -> ResourcesReady -> Running -> Shutdown`; a failed setup
/// leaves the loop in `Uninitialized`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    ResourcesReady,
    Running,
    Shutdown,
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("{operation} is not allowed while the render loop is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: LoopState,
    },

    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error("failed to present frame: {0}")]
    Present(String),
}

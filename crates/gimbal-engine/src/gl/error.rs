use std::fmt;

use thiserror::Error;

use super::api::{ProgramHandle, ShaderStage};

/// Kind of GL object, used in allocation diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Shader,
    Program,
    Buffer,
    VertexArray,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Shader => "shader",
            ResourceKind::Program => "program",
            ResourceKind::Buffer => "buffer",
            ResourceKind::VertexArray => "vertex array",
        };
        f.write_str(name)
    }
}

/// Failures raised by GPU resource construction and binding checks.
///
/// Allocation, compile and link errors are only produced during one-time setup.
/// The binding variants flag call-order mistakes that GL itself would either
/// reject with a bare error code or silently apply to the wrong object.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to allocate {kind}: {reason}")]
    ResourceAllocation { kind: ResourceKind, reason: String },

    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program failed to link:\n{log}")]
    Link { log: String },

    #[error("expected a {expected} shader, got a {found} shader")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },

    #[error("vertex attribute {index} described while no geometry buffer is bound")]
    NoBufferBound { index: u32 },

    #[error("vertex attribute {index} is invalid: {reason}")]
    InvalidAttribute { index: u32, reason: &'static str },

    #[error("program {0:?} is not the active program")]
    ProgramNotActive(ProgramHandle),

    #[error("draw issued with no {0} bound")]
    MissingBinding(&'static str),

    #[error("GL error 0x{code:04X} during {during}")]
    Driver { code: u32, during: &'static str },
}

pub type GpuResult<T> = Result<T, GpuError>;

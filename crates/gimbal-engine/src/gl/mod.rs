//! OpenGL seam.
//!
//! Everything above this module talks to the driver through [`GlApi`]:
//! - typed, non-zero object handles instead of raw `GLuint`s
//! - an explicit [`Bindings`] record of the process-wide binding state
//! - [`GpuError`] for allocation, compile, link and binding-order failures
//!
//! [`GlowApi`] is the production implementation over `glow`.

mod api;
mod bindings;
mod error;
mod glow_api;

#[cfg(test)]
pub(crate) mod recording;

pub use api::{
    AttributeBinding, BufferHandle, ElementType, GlApi, Primitive, ProgramHandle, ShaderHandle,
    ShaderStage, UniformLocation, VertexArrayHandle,
};
pub use bindings::Bindings;
pub use error::{GpuError, GpuResult, ResourceKind};
pub use glow_api::GlowApi;

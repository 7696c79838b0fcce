//! Owned GPU resources.
//!
//! Each type owns exactly one GL object and deletes it on drop. Ownership moves
//! (e.g. shader units into a program) carry the release duty with them, so an
//! object is deleted exactly once on every exit path, including construction
//! errors.

mod buffer;
mod layout;
mod program;
mod shader;

pub use buffer::GeometryBuffer;
pub use layout::VertexLayout;
pub use program::Program;
pub use shader::ShaderUnit;

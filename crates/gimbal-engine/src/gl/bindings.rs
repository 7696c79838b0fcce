use super::api::{BufferHandle, ProgramHandle, VertexArrayHandle};

/// Mirror of the context's current-object bindings.
///
/// GL binding state is positional: whichever object is bound when a stateful
/// call is issued is the one it acts on. Every resource method that binds or
/// depends on a binding takes this record, so ordering rules can be checked
/// before the call reaches the driver.
///
/// `None` means "nothing bound or not known". Only the resource types update it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bindings {
    program: Option<ProgramHandle>,
    array_buffer: Option<BufferHandle>,
    vertex_array: Option<VertexArrayHandle>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active program.
    pub fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Buffer bound to the array-buffer target.
    pub fn array_buffer(&self) -> Option<BufferHandle> {
        self.array_buffer
    }

    /// Currently bound vertex array.
    pub fn vertex_array(&self) -> Option<VertexArrayHandle> {
        self.vertex_array
    }

    pub(crate) fn set_program(&mut self, program: Option<ProgramHandle>) {
        self.program = program;
    }

    pub(crate) fn set_array_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.array_buffer = buffer;
    }

    pub(crate) fn set_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        self.vertex_array = vertex_array;
    }

    /// Forgets every binding.
    ///
    /// Call after code outside the engine (e.g. the UI painter) has issued GL
    /// calls; the next user of each target has to bind again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

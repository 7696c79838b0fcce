use std::rc::Rc;

use crate::gl::{Bindings, BufferHandle, GlApi, GpuError, GpuResult, ResourceKind};

/// Static vertex buffer, written once at construction.
pub struct GeometryBuffer {
    gl: Rc<dyn GlApi>,
    handle: BufferHandle,
    byte_len: usize,
}

impl GeometryBuffer {
    /// Allocates a buffer, binds it to the array-buffer target and uploads
    /// `vertices` verbatim with static usage.
    ///
    /// The buffer is left bound so attribute descriptions can follow.
    pub fn new(gl: &Rc<dyn GlApi>, bindings: &mut Bindings, vertices: &[f32]) -> GpuResult<Self> {
        let handle = gl
            .create_buffer()
            .map_err(|reason| GpuError::ResourceAllocation {
                kind: ResourceKind::Buffer,
                reason,
            })?;

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let buffer = Self {
            gl: Rc::clone(gl),
            handle,
            byte_len: bytes.len(),
        };

        buffer.bind(bindings);
        gl.array_buffer_data_static(bytes);

        log::debug!("uploaded {} bytes to buffer {}", buffer.byte_len, handle.0);
        Ok(buffer)
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Size of the uploaded data in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn is_bound(&self, bindings: &Bindings) -> bool {
        bindings.array_buffer() == Some(self.handle)
    }

    pub fn bind(&self, bindings: &mut Bindings) {
        if self.is_bound(bindings) {
            return;
        }
        self.gl.bind_array_buffer(Some(self.handle));
        bindings.set_array_buffer(Some(self.handle));
    }

    /// Clears the array-buffer binding.
    pub fn unbind(&self, bindings: &mut Bindings) {
        self.gl.bind_array_buffer(None);
        bindings.set_array_buffer(None);
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.handle);
        log::debug!("released buffer {}", self.handle.0);
    }
}

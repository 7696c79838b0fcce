use std::rc::Rc;

use crate::gl::{GlApi, GpuError, GpuResult, ResourceKind, ShaderHandle, ShaderStage};

/// One compiled shader stage.
pub struct ShaderUnit {
    gl: Rc<dyn GlApi>,
    handle: ShaderHandle,
    stage: ShaderStage,
}

impl ShaderUnit {
    /// Creates a shader object for `stage` and compiles `source` into it.
    ///
    /// On a compile failure the driver's info log is logged and returned in
    /// [`GpuError::Compile`]; the shader object is released before returning.
    pub fn compile(gl: &Rc<dyn GlApi>, source: &str, stage: ShaderStage) -> GpuResult<Self> {
        let handle = gl
            .create_shader(stage)
            .map_err(|reason| GpuError::ResourceAllocation {
                kind: ResourceKind::Shader,
                reason,
            })?;

        // Owned from here on; early returns drop `unit` and delete the object.
        let unit = Self {
            gl: Rc::clone(gl),
            handle,
            stage,
        };

        gl.shader_source(handle, source);
        gl.compile_shader(handle);

        if !gl.shader_compile_status(handle) {
            let log = gl.shader_info_log(handle);
            log::error!("{stage} shader {} failed to compile:\n{log}", handle.0);
            return Err(GpuError::Compile { stage, log });
        }

        log::debug!("compiled {stage} shader {}", handle.0);
        Ok(unit)
    }

    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for ShaderUnit {
    fn drop(&mut self) {
        self.gl.delete_shader(self.handle);
        log::debug!("released {} shader {}", self.stage, self.handle.0);
    }
}

use std::rc::Rc;

use glam::Mat4;

use crate::gl::{
    Bindings, GlApi, GpuError, GpuResult, ProgramHandle, ResourceKind, ShaderStage,
    UniformLocation,
};

use super::shader::ShaderUnit;

/// A linked vertex + fragment program.
///
/// Owns the two shader units it was linked from; they are released right after
/// the program object when the program drops.
pub struct Program {
    gl: Rc<dyn GlApi>,
    handle: ProgramHandle,
    vertex: ShaderUnit,
    fragment: ShaderUnit,
}

impl Program {
    /// Links `vertex` and `fragment` into a new program.
    ///
    /// Order: allocate program, attach vertex, attach fragment, link. The link
    /// status is checked; a failed link yields [`GpuError::Link`] with the
    /// driver's info log, and every object involved is released.
    pub fn link(gl: &Rc<dyn GlApi>, vertex: ShaderUnit, fragment: ShaderUnit) -> GpuResult<Self> {
        expect_stage(&vertex, ShaderStage::Vertex)?;
        expect_stage(&fragment, ShaderStage::Fragment)?;

        let handle = gl
            .create_program()
            .map_err(|reason| GpuError::ResourceAllocation {
                kind: ResourceKind::Program,
                reason,
            })?;

        let program = Self {
            gl: Rc::clone(gl),
            handle,
            vertex,
            fragment,
        };

        gl.attach_shader(handle, program.vertex.handle());
        gl.attach_shader(handle, program.fragment.handle());
        gl.link_program(handle);

        if !gl.program_link_status(handle) {
            let log = gl.program_info_log(handle);
            log::error!("program {} failed to link:\n{log}", handle.0);
            return Err(GpuError::Link { log });
        }

        log::debug!(
            "linked program {} (vs {}, fs {})",
            handle.0,
            program.vertex.handle().0,
            program.fragment.handle().0
        );
        Ok(program)
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn is_active(&self, bindings: &Bindings) -> bool {
        bindings.program() == Some(self.handle)
    }

    /// Makes this the current program for subsequent uniform uploads and draws.
    pub fn activate(&self, bindings: &mut Bindings) {
        if self.is_active(bindings) {
            return;
        }
        self.gl.use_program(Some(self.handle));
        bindings.set_program(Some(self.handle));
    }

    /// Clears the current program.
    pub fn deactivate(&self, bindings: &mut Bindings) {
        self.gl.use_program(None);
        bindings.set_program(None);
    }

    /// Looks up a uniform slot by name.
    ///
    /// `None` is a normal outcome: the uniform may be misspelled or optimized
    /// out by the compiler. Callers skip the upload in that case.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let location = self.gl.uniform_location(self.handle, name);
        if location.is_none() {
            log::trace!("program {} has no active uniform `{name}`", self.handle.0);
        }
        location
    }

    /// Uploads a 4x4 matrix to `location`.
    ///
    /// Uniform uploads act on the current program, so this program must have
    /// been activated first.
    pub fn set_uniform_mat4(
        &self,
        bindings: &Bindings,
        location: UniformLocation,
        matrix: &Mat4,
    ) -> GpuResult<()> {
        if !self.is_active(bindings) {
            return Err(GpuError::ProgramNotActive(self.handle));
        }
        self.gl.uniform_matrix4(location, &matrix.to_cols_array());
        Ok(())
    }
}

fn expect_stage(unit: &ShaderUnit, expected: ShaderStage) -> GpuResult<()> {
    if unit.stage() == expected {
        Ok(())
    } else {
        Err(GpuError::StageMismatch {
            expected,
            found: unit.stage(),
        })
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        self.gl.delete_program(self.handle);
        log::debug!("released program {}", self.handle.0);
    }
}

use std::rc::Rc;

use glam::Mat4;

use crate::gl::{
    AttributeBinding, Bindings, GlApi, GpuError, GpuResult, Primitive, ShaderStage,
    UniformLocation,
};
use crate::resource::{GeometryBuffer, Program, ShaderUnit, VertexLayout};

use super::{SceneConfig, TransformState};

/// Attribute slot the vertex stage reads positions from.
const POSITION_ATTRIBUTE: u32 = 0;
const POSITION_COMPONENTS: u32 = 3;

/// GPU resources for the triangle, built once from a [`SceneConfig`].
///
/// Fields drop in declaration order, which is the reverse of construction:
/// layout, then buffer, then program (and its shader units).
pub struct Scene {
    layout: VertexLayout,
    buffer: GeometryBuffer,
    program: Program,
    transform_loc: Option<UniformLocation>,
    vertex_count: i32,
    clear_color: [f32; 4],
    gl: Rc<dyn GlApi>,
}

impl Scene {
    /// Builds program, buffer and layout, in that order.
    ///
    /// The context must be current. Any failure releases whatever was already
    /// created and is returned to the caller; nothing is drawn with a partly
    /// built scene.
    pub fn new(gl: &Rc<dyn GlApi>, bindings: &mut Bindings, config: &SceneConfig) -> GpuResult<Self> {
        let vertex = ShaderUnit::compile(gl, &config.vertex_source, ShaderStage::Vertex)?;
        let fragment = ShaderUnit::compile(gl, &config.fragment_source, ShaderStage::Fragment)?;
        let program = Program::link(gl, vertex, fragment)?;

        let transform_loc = program.uniform_location(&config.transform_uniform);
        if transform_loc.is_none() {
            log::warn!(
                "uniform `{}` not found in program {}; the triangle will be drawn untransformed",
                config.transform_uniform,
                program.handle().0
            );
        }

        let buffer = GeometryBuffer::new(gl, bindings, &config.vertices)?;

        // From here on the buffer is recorded as bound; an error drops it, so
        // the record must not outlive it.
        let layout = match describe_positions(gl, bindings) {
            Ok(layout) => layout,
            Err(err) => {
                bindings.reset();
                return Err(err);
            }
        };

        layout.unbind(bindings);
        buffer.unbind(bindings);

        if let Some(code) = drain_errors(&**gl) {
            return Err(GpuError::Driver {
                code,
                during: "scene setup",
            });
        }

        log::info!(
            "scene ready: program {}, buffer {} ({} bytes), vertex array {}",
            program.handle().0,
            buffer.handle().0,
            buffer.byte_len(),
            layout.handle().0
        );

        Ok(Self {
            layout,
            buffer,
            program,
            transform_loc,
            vertex_count: (config.vertices.len() as u32 / POSITION_COMPONENTS) as i32,
            clear_color: config.clear_color,
            gl: Rc::clone(gl),
        })
    }

    /// Clears the colour buffer to the configured colour.
    pub fn clear(&self) {
        self.gl.clear_color(self.clear_color);
        self.gl.clear();
    }

    /// Draws the triangle with the transform for `state` and returns that
    /// transform.
    ///
    /// The upload is skipped when the program has no transform uniform.
    pub fn draw(&self, bindings: &mut Bindings, state: &TransformState) -> GpuResult<Mat4> {
        let matrix = state.matrix();

        self.program.activate(bindings);
        if let Some(loc) = self.transform_loc {
            self.program.set_uniform_mat4(bindings, loc, &matrix)?;
        }

        self.layout.bind(bindings);
        self.layout
            .draw(bindings, Primitive::Triangles, 0, self.vertex_count)?;

        log::trace!("drew {} vertices with {state:?}", self.vertex_count);
        Ok(matrix)
    }

    /// Leaves no scene object bound.
    pub fn unbind(&self, bindings: &mut Bindings) {
        self.layout.unbind(bindings);
        self.buffer.unbind(bindings);
        self.program.deactivate(bindings);
    }

    pub fn has_transform_uniform(&self) -> bool {
        self.transform_loc.is_some()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

fn describe_positions(gl: &Rc<dyn GlApi>, bindings: &mut Bindings) -> GpuResult<VertexLayout> {
    let mut layout = VertexLayout::new(gl)?;
    layout.describe_attribute(
        bindings,
        AttributeBinding::packed_f32(POSITION_ATTRIBUTE, POSITION_COMPONENTS),
    )?;
    Ok(layout)
}

/// Upper bound on flags popped per check; a lost context can report an error forever.
const MAX_PENDING_ERRORS: usize = 16;

/// Pops every pending GL error flag, logging each, and returns the first.
fn drain_errors(gl: &dyn GlApi) -> Option<u32> {
    let mut first = None;
    for _ in 0..MAX_PENDING_ERRORS {
        let Some(code) = gl.take_error() else {
            break;
        };
        log::error!("GL error 0x{code:04X} raised during scene setup");
        first.get_or_insert(code);
    }
    first
}

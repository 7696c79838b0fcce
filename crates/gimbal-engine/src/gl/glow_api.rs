use std::sync::Arc;

use glow::HasContext;

use super::api::{
    AttributeBinding, BufferHandle, ElementType, GlApi, Primitive, ProgramHandle, ShaderHandle,
    ShaderStage, UniformLocation, VertexArrayHandle,
};

/// [`GlApi`] over a `glow` context.
///
/// The `glow::Context` is shared with the UI painter, hence the `Arc`.
pub struct GlowApi {
    gl: Arc<glow::Context>,
}

impl GlowApi {
    /// Wraps a loaded `glow` context.
    ///
    /// # Safety
    ///
    /// The GL context `gl` was loaded from must be current on the calling
    /// thread for as long as this value (or any resource created through it)
    /// is alive, and must not be used from any other thread.
    pub unsafe fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }
}

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn element_enum(ty: ElementType) -> u32 {
    match ty {
        ElementType::Byte => glow::BYTE,
        ElementType::UnsignedByte => glow::UNSIGNED_BYTE,
        ElementType::Short => glow::SHORT,
        ElementType::UnsignedShort => glow::UNSIGNED_SHORT,
        ElementType::Int => glow::INT,
        ElementType::UnsignedInt => glow::UNSIGNED_INT,
        ElementType::Float => glow::FLOAT,
    }
}

fn primitive_enum(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Points => glow::POINTS,
        Primitive::Lines => glow::LINES,
        Primitive::LineStrip => glow::LINE_STRIP,
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

// Safety (all blocks below): `GlowApi::new` requires the context to be current
// on this thread, and every handle passed in was produced by this context.
impl GlApi for GlowApi {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String> {
        unsafe { self.gl.create_shader(stage_enum(stage)) }.map(|s| ShaderHandle(s.0))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn create_program(&self) -> Result<ProgramHandle, String> {
        unsafe { self.gl.create_program() }.map(|p| ProgramHandle(p.0))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(glow::NativeProgram(program.0), name)
        }
        .map(|loc| UniformLocation(loc.0))
    }

    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]) {
        let loc = glow::NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(&loc), false, columns) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn create_buffer(&self) -> Result<BufferHandle, String> {
        unsafe { self.gl.create_buffer() }.map(|b| BufferHandle(b.0))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.map(|b| glow::NativeBuffer(b.0)))
        }
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| VertexArrayHandle(v.0))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(|v| glow::NativeVertexArray(v.0)))
        }
    }

    fn vertex_attrib_pointer(&self, attribute: &AttributeBinding) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attribute.index,
                attribute.components as i32,
                element_enum(attribute.element_type),
                attribute.normalized,
                attribute.stride_bytes as i32,
                attribute.offset_bytes as i32,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        unsafe {
            self.gl
                .delete_vertex_array(glow::NativeVertexArray(vertex_array.0))
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(primitive_enum(primitive), first, count) }
    }

    fn take_error(&self) -> Option<u32> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(code),
        }
    }
}

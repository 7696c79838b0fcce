use std::fmt;
use std::num::NonZeroU32;

/// Shader object name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

/// Program object name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

/// Buffer object name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub NonZeroU32);

/// Vertex array object name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub NonZeroU32);

/// Uniform slot inside a linked program.
///
/// Only valid for the program it was queried from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Component type of a vertex attribute as stored in the buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

impl ElementType {
    /// Size of one component in bytes.
    pub const fn size_bytes(self) -> u32 {
        match self {
            ElementType::Byte | ElementType::UnsignedByte => 1,
            ElementType::Short | ElementType::UnsignedShort => 2,
            ElementType::Int | ElementType::UnsignedInt | ElementType::Float => 4,
        }
    }
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

/// How a byte range of the bound array buffer feeds one vertex input slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttributeBinding {
    pub index: u32,
    /// Components per vertex (1..=4).
    pub components: u32,
    pub element_type: ElementType,
    pub normalized: bool,
    pub stride_bytes: u32,
    pub offset_bytes: u32,
}

impl AttributeBinding {
    /// Tightly packed `f32` attribute starting at byte 0.
    pub const fn packed_f32(index: u32, components: u32) -> Self {
        Self {
            index,
            components,
            element_type: ElementType::Float,
            normalized: false,
            stride_bytes: components * ElementType::Float.size_bytes(),
            offset_bytes: 0,
        }
    }
}

/// The GL entry points used by the engine.
///
/// Implementations forward to a context that is current on the calling
/// thread. Methods mirror their GL counterparts one to one; ordering and
/// binding rules are enforced by the resource types, not here.
pub trait GlApi {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    fn create_program(&self) -> Result<ProgramHandle, String>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn use_program(&self, program: Option<ProgramHandle>);
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;
    /// Uploads a column-major 4x4 matrix to the current program.
    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]);
    fn delete_program(&self, program: ProgramHandle);

    fn create_buffer(&self) -> Result<BufferHandle, String>;
    fn bind_array_buffer(&self, buffer: Option<BufferHandle>);
    /// Uploads `data` into the bound array buffer with static usage.
    fn array_buffer_data_static(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferHandle);

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String>;
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);
    fn vertex_attrib_pointer(&self, attribute: &AttributeBinding);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, rgba: [f32; 4]);
    /// Clears the color buffer.
    fn clear(&self);
    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32);

    /// Pops the oldest pending GL error flag, if any.
    fn take_error(&self) -> Option<u32>;
}

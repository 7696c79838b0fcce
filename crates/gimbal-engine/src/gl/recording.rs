//! Recording [`GlApi`] double for unit tests.
//!
//! Hands out fresh names, tracks which objects are alive, and keeps an ordered
//! log of every call. Deleting an unknown or already-deleted object panics, so
//! double releases fail the test that caused them.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;

use super::api::{
    AttributeBinding, BufferHandle, GlApi, Primitive, ProgramHandle, ShaderHandle, ShaderStage,
    UniformLocation, VertexArrayHandle,
};
use super::error::ResourceKind;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4(u32, [f32; 16]),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData(Vec<u8>),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer(AttributeBinding),
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawArrays(Primitive, i32, i32),
    /// Inserted by test collaborators to interleave their own steps.
    Mark(&'static str),
}

#[derive(Default)]
struct State {
    last_name: u32,
    calls: Vec<Call>,
    live: HashMap<ResourceKind, HashSet<u32>>,
    stages: HashMap<u32, ShaderStage>,
    failing_stages: HashSet<ShaderStage>,
    failing_alloc: HashSet<ResourceKind>,
    fail_link: bool,
    uniforms: Vec<String>,
    pending_errors: Vec<u32>,
}

impl State {
    fn alloc(&mut self, kind: ResourceKind) -> Result<NonZeroU32, String> {
        if self.failing_alloc.contains(&kind) {
            return Err(format!("out of {kind} names"));
        }
        self.last_name += 1;
        self.live.entry(kind).or_default().insert(self.last_name);
        Ok(NonZeroU32::new(self.last_name).expect("names start at 1"))
    }

    fn release(&mut self, kind: ResourceKind, name: u32) {
        let removed = self.live.entry(kind).or_default().remove(&name);
        assert!(removed, "{kind} {name} released twice or never allocated");
    }

    fn assert_live(&self, kind: ResourceKind, name: u32) {
        let alive = self.live.get(&kind).is_some_and(|set| set.contains(&name));
        assert!(alive, "{kind} {name} used after release");
    }
}

pub(crate) struct RecordingGl {
    state: RefCell<State>,
}

impl RecordingGl {
    /// A context whose programs expose a single `transform` uniform.
    pub(crate) fn new() -> Self {
        let state = State {
            uniforms: vec!["transform".to_string()],
            ..State::default()
        };
        Self {
            state: RefCell::new(state),
        }
    }

    pub(crate) fn failing_compile(self, stage: ShaderStage) -> Self {
        self.state.borrow_mut().failing_stages.insert(stage);
        self
    }

    pub(crate) fn failing_link(self) -> Self {
        self.state.borrow_mut().fail_link = true;
        self
    }

    pub(crate) fn failing_alloc(self, kind: ResourceKind) -> Self {
        self.state.borrow_mut().failing_alloc.insert(kind);
        self
    }

    pub(crate) fn with_uniforms(self, names: &[&str]) -> Self {
        self.state.borrow_mut().uniforms = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Queues a GL error flag for the next `take_error`.
    pub(crate) fn raise_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push(code);
    }

    pub(crate) fn mark(&self, label: &'static str) {
        self.state.borrow_mut().calls.push(Call::Mark(label));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of objects of `kind` allocated and not yet released.
    pub(crate) fn live(&self, kind: ResourceKind) -> usize {
        self.state.borrow().live.get(&kind).map_or(0, HashSet::len)
    }

    /// Number of recorded calls matching `pred`.
    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Position of the first recorded call equal to `call`.
    pub(crate) fn position(&self, call: &Call) -> Option<usize> {
        self.state.borrow().calls.iter().position(|c| c == call)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String> {
        let mut st = self.state.borrow_mut();
        let name = st.alloc(ResourceKind::Shader)?;
        st.stages.insert(name.get(), stage);
        st.calls.push(Call::CreateShader(stage, name.get()));
        Ok(ShaderHandle(name))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.state.borrow().assert_live(ResourceKind::Shader, shader.0.get());
        self.record(Call::ShaderSource(shader.0.get(), source.to_string()));
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.state.borrow().assert_live(ResourceKind::Shader, shader.0.get());
        self.record(Call::CompileShader(shader.0.get()));
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let st = self.state.borrow();
        let stage = st.stages[&shader.0.get()];
        !st.failing_stages.contains(&stage)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:3(5): error: syntax error, unexpected IDENTIFIER".to_string()
        }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        let mut st = self.state.borrow_mut();
        st.release(ResourceKind::Shader, shader.0.get());
        st.calls.push(Call::DeleteShader(shader.0.get()));
    }

    fn create_program(&self) -> Result<ProgramHandle, String> {
        let mut st = self.state.borrow_mut();
        let name = st.alloc(ResourceKind::Program)?;
        st.calls.push(Call::CreateProgram(name.get()));
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        {
            let st = self.state.borrow();
            st.assert_live(ResourceKind::Program, program.0.get());
            st.assert_live(ResourceKind::Shader, shader.0.get());
        }
        self.record(Call::AttachShader {
            program: program.0.get(),
            shader: shader.0.get(),
        });
    }

    fn link_program(&self, program: ProgramHandle) {
        self.state.borrow().assert_live(ResourceKind::Program, program.0.get());
        self.record(Call::LinkProgram(program.0.get()));
    }

    fn program_link_status(&self, _program: ProgramHandle) -> bool {
        !self.state.borrow().fail_link
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        if self.state.borrow().fail_link {
            "error: vertex shader output `v_color` not consumed".to_string()
        } else {
            String::new()
        }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        if let Some(p) = program {
            self.state.borrow().assert_live(ResourceKind::Program, p.0.get());
        }
        self.record(Call::UseProgram(program.map(|p| p.0.get())));
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let st = self.state.borrow();
        st.assert_live(ResourceKind::Program, program.0.get());
        st.uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn uniform_matrix4(&self, location: UniformLocation, columns: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.0, *columns));
    }

    fn delete_program(&self, program: ProgramHandle) {
        let mut st = self.state.borrow_mut();
        st.release(ResourceKind::Program, program.0.get());
        st.calls.push(Call::DeleteProgram(program.0.get()));
    }

    fn create_buffer(&self) -> Result<BufferHandle, String> {
        let mut st = self.state.borrow_mut();
        let name = st.alloc(ResourceKind::Buffer)?;
        st.calls.push(Call::CreateBuffer(name.get()));
        Ok(BufferHandle(name))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferHandle>) {
        if let Some(b) = buffer {
            self.state.borrow().assert_live(ResourceKind::Buffer, b.0.get());
        }
        self.record(Call::BindArrayBuffer(buffer.map(|b| b.0.get())));
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        self.record(Call::BufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        let mut st = self.state.borrow_mut();
        st.release(ResourceKind::Buffer, buffer.0.get());
        st.calls.push(Call::DeleteBuffer(buffer.0.get()));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayHandle, String> {
        let mut st = self.state.borrow_mut();
        let name = st.alloc(ResourceKind::VertexArray)?;
        st.calls.push(Call::CreateVertexArray(name.get()));
        Ok(VertexArrayHandle(name))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        if let Some(v) = vertex_array {
            self.state.borrow().assert_live(ResourceKind::VertexArray, v.0.get());
        }
        self.record(Call::BindVertexArray(vertex_array.map(|v| v.0.get())));
    }

    fn vertex_attrib_pointer(&self, attribute: &AttributeBinding) {
        self.record(Call::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        let mut st = self.state.borrow_mut();
        st.release(ResourceKind::VertexArray, vertex_array.0.get());
        st.calls.push(Call::DeleteVertexArray(vertex_array.0.get()));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(primitive, first, count));
    }

    fn take_error(&self) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        if st.pending_errors.is_empty() {
            None
        } else {
            Some(st.pending_errors.remove(0))
        }
    }
}

//! Recording [`GlApi`] implementation for headless tests.
//!
//! `MockGl` hands out sequential integer names, records every call in order,
//! and can be told to fail compilation of a stage or linking of a program.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::coords::Viewport;
use crate::paint::Color;
use crate::shader::ShaderStage;

use super::api::GlApi;
use super::info::DriverString;

/// One recorded GL call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    UploadArrayBuffer { buffer: u32, bytes: usize },
    FloatAttribute { index: u32, components: i32, stride: i32, offset: i32 },
    DeleteBuffer(u32),
    Viewport(Viewport),
    ClearColor(Color),
    Clear,
    DrawTriangles { first: i32, count: i32 },
}

#[derive(Debug, Default)]
pub struct MockGl {
    calls: RefCell<Vec<Call>>,
    next_name: Cell<u32>,
    stages: RefCell<HashMap<u32, ShaderStage>>,
    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes compilation of every `stage` shader fail with `log`.
    pub fn fail_compile(mut self, stage: ShaderStage, log: impl Into<String>) -> Self {
        self.compile_failures.insert(stage, log.into());
        self
    }

    /// Makes every link request fail with `log`.
    pub fn fail_link(mut self, log: impl Into<String>) -> Self {
        self.link_failure = Some(log.into());
        self
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Shaders created and not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateShader(..)))
            - self.count(|c| matches!(c, Call::DeleteShader(_)))
    }

    /// Programs created and not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateProgram(_)))
            - self.count(|c| matches!(c, Call::DeleteProgram(_)))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next_name(&self) -> u32 {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.stages.borrow().get(&shader).copied()
    }
}

impl GlApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type VertexArray = u32;
    type Buffer = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let name = self.next_name();
        self.stages.borrow_mut().insert(name, stage);
        self.record(Call::CreateShader(stage, name));
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.stage_of(shader)
            .is_none_or(|stage| !self.compile_failures.contains_key(&stage))
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.stage_of(shader)
            .and_then(|stage| self.compile_failures.get(&stage).cloned())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let name = self.next_name();
        self.record(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.link_failure.is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.link_failure.clone().unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let name = self.next_name();
        self.record(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let name = self.next_name();
        self.record(Call::CreateBuffer(name));
        Ok(name)
    }

    fn upload_array_buffer(&self, buffer: u32, data: &[u8]) {
        self.record(Call::UploadArrayBuffer { buffer, bytes: data.len() });
    }

    fn float_attribute(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::FloatAttribute { index, components, stride, offset });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn viewport(&self, viewport: Viewport) {
        self.record(Call::Viewport(viewport));
    }

    fn clear_color(&self, color: Color) {
        self.record(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangles { first, count });
    }

    fn driver_string(&self, query: DriverString) -> String {
        match query {
            DriverString::Version => "4.6.0 Mock",
            DriverString::ShadingLanguageVersion => "4.60 Mock",
            DriverString::Vendor => "Trigon",
            DriverString::Renderer => "MockGl",
        }
        .to_owned()
    }
}

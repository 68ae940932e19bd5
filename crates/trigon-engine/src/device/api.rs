//! The GL call surface used by the engine.
//!
//! Every GL call the engine issues goes through [`GlApi`]. The production
//! implementation forwards to `glow`; tests use the recording mock in
//! [`super::mock`].
//!
//! All methods require the GL context to be current on the calling thread.

use std::fmt;

use glow::HasContext;

use crate::coords::Viewport;
use crate::paint::Color;
use crate::shader::ShaderStage;

use super::info::DriverString;

/// The function-loaded OpenGL context used at runtime.
pub type NativeGl = glow::Context;

/// Minimal OpenGL interface.
///
/// Handles are plain copyable names; ownership is tracked by the wrapper types
/// in `shader` and `render`, which release them on drop.
pub trait GlApi {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type VertexArray: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;

    // Shaders

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // Programs

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    // Vertex data

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    /// Binds `buffer` as the array buffer and fills it with `data` (`STATIC_DRAW`).
    fn upload_array_buffer(&self, buffer: Self::Buffer, data: &[u8]);

    /// Describes and enables a tightly typed `f32` attribute of the bound array buffer.
    ///
    /// `stride` and `offset` are in bytes.
    fn float_attribute(&self, index: u32, components: i32, stride: i32, offset: i32);

    fn delete_buffer(&self, buffer: Self::Buffer);

    // Frame

    fn viewport(&self, viewport: Viewport);
    fn clear_color(&self, color: Color);
    fn clear_color_buffer(&self);
    fn draw_triangles(&self, first: i32, count: i32);

    // Queries

    fn driver_string(&self, query: DriverString) -> String;
}

// The glow methods share names with `GlApi`, so they are called through the
// trait path to keep resolution unambiguous.
impl GlApi for glow::Context {
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type VertexArray = <glow::Context as HasContext>::VertexArray;
    type Buffer = <glow::Context as HasContext>::Buffer;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { HasContext::get_shader_compile_status(self, shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn upload_array_buffer(&self, buffer: Self::Buffer, data: &[u8]) {
        unsafe {
            HasContext::bind_buffer(self, glow::ARRAY_BUFFER, Some(buffer));
            HasContext::buffer_data_u8_slice(self, glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
    }

    fn float_attribute(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                glow::FLOAT,
                false,
                stride,
                offset,
            );
            HasContext::enable_vertex_attrib_array(self, index);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn viewport(&self, viewport: Viewport) {
        unsafe {
            HasContext::viewport(self, viewport.x, viewport.y, viewport.width, viewport.height)
        }
    }

    fn clear_color(&self, color: Color) {
        unsafe { HasContext::clear_color(self, color.r, color.g, color.b, color.a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { HasContext::clear(self, glow::COLOR_BUFFER_BIT) }
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, first, count) }
    }

    fn driver_string(&self, query: DriverString) -> String {
        unsafe { HasContext::get_parameter_string(self, query.gl_enum()) }
    }
}

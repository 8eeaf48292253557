use std::ffi::CStr;

use gl;
use gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};

/// The GL entry points the shader wrapper, uniform writes and per-frame draws
/// go through.
///
/// [`Gl`] forwards straight to the loaded `gl` function pointers. Resource
/// setup (buffers, textures) talks to `gl` directly.
pub trait GlBackend {
    fn create_shader(&mut self, kind: GLenum) -> GLuint;
    /// Uploads `source` and compiles it. Returns the compile status.
    fn compile_shader(&mut self, shader: GLuint, source: &CStr) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&mut self, shader: GLuint);

    fn create_program(&mut self) -> GLuint;
    fn attach_shader(&mut self, program: GLuint, shader: GLuint);
    fn detach_shader(&mut self, program: GLuint, shader: GLuint);
    /// Links `program`. Returns the link status.
    fn link_program(&mut self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&mut self, program: GLuint);
    fn use_program(&mut self, program: GLuint);

    fn uniform_location(&mut self, program: GLuint, name: &CStr) -> GLint;
    fn uniform_1i(&mut self, location: GLint, value: GLint);
    fn uniform_1f(&mut self, location: GLint, value: GLfloat);
    fn uniform_2f(&mut self, location: GLint, x: GLfloat, y: GLfloat);
    fn uniform_3f(&mut self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat);
    fn uniform_4f(&mut self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);
    /// `value` is a column-major 4x4 matrix.
    fn uniform_matrix_4fv(&mut self, location: GLint, value: &[GLfloat]);

    fn bind_vertex_array(&mut self, vao: GLuint);
    fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei);
}

/// Backend over the process' current GL context. `gl::load_with` must have
/// run before any method is called.
#[derive(Debug, Default)]
pub struct Gl;

impl GlBackend for Gl {
    fn create_shader(&mut self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn compile_shader(&mut self, shader: GLuint, source: &CStr) -> bool {
        let mut success: GLint = 1;
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = vec![0u8; len.max(0) as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                len,
                &mut written,
                buffer.as_mut_ptr() as *mut gl::types::GLchar,
            );
        }
        info_log_to_string(buffer, written)
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&mut self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::DetachShader(program, shader);
        }
    }

    fn link_program(&mut self, program: GLuint) -> bool {
        let mut success: GLint = 1;
        unsafe {
            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = vec![0u8; len.max(0) as usize];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                len,
                &mut written,
                buffer.as_mut_ptr() as *mut gl::types::GLchar,
            );
        }
        info_log_to_string(buffer, written)
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn use_program(&mut self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn uniform_location(&mut self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&mut self, location: GLint, value: GLint) {
        unsafe {
            gl::Uniform1i(location, value);
        }
    }

    fn uniform_1f(&mut self, location: GLint, value: GLfloat) {
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    fn uniform_2f(&mut self, location: GLint, x: GLfloat, y: GLfloat) {
        unsafe {
            gl::Uniform2f(location, x, y);
        }
    }

    fn uniform_3f(&mut self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat) {
        unsafe {
            gl::Uniform3f(location, x, y, z);
        }
    }

    fn uniform_4f(&mut self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        unsafe {
            gl::Uniform4f(location, x, y, z, w);
        }
    }

    fn uniform_matrix_4fv(&mut self, location: GLint, value: &[GLfloat]) {
        debug_assert_eq!(value.len(), 16);
        unsafe {
            gl::UniformMatrix4fv(
                location,
                1 as gl::types::GLsizei,
                gl::FALSE,
                value.as_ptr(),
            );
        }
    }

    fn bind_vertex_array(&mut self, vao: GLuint) {
        unsafe {
            gl::BindVertexArray(vao);
        }
    }

    fn draw_arrays(&mut self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe {
            gl::DrawArrays(mode, first, count);
        }
    }
}

/// GL writes `written` bytes (terminator excluded) into `buffer`.
fn info_log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_owned()
}

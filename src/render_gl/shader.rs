use std::ffi::{CStr, CString};

use gl;
use gl::types::{GLenum, GLuint};
use log::{debug, error, info, warn};
use thiserror::Error;

use super::backend::GlBackend;
use super::context::RenderContext;
use super::uniform::{Uniform, UniformLocation};
use crate::resources::{self, Resources};

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("resource load error: {name}")]
    ResourceLoad {
        name: String,
        source: resources::ResError,
    },
    #[error("shader compile error: {name}\nmessage: {message}")]
    CompileError { name: String, message: String },
    #[error("shader link error: {name}\nmessage: {message}")]
    LinkError { name: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// A vertex + fragment program.
///
/// Construction never fails: problems are logged, collected in
/// [`Program::diagnostics`] and leave the program invalid. An invalid program
/// is never made current and ignores uniform writes.
#[derive(Debug)]
pub struct Program {
    id: GLuint,
    valid: bool,
    vertex_name: String,
    fragment_name: String,
    diagnostics: Vec<ShaderError>,
}

impl Program {
    /// Loads, compiles and links `vertex_name` and `fragment_name` from `res`.
    ///
    /// A source that can't be read stops everything before any GL object is
    /// created. A stage that fails to compile doesn't stop the other stage or
    /// the link, so their diagnostics are reported too; the program stays
    /// invalid either way. Stage objects are deleted once the link has run.
    pub fn from_res<B: GlBackend>(
        ctx: &mut RenderContext<B>,
        res: &Resources,
        vertex_name: &str,
        fragment_name: &str,
    ) -> Program {
        let mut program = Program {
            id: 0,
            valid: true,
            vertex_name: vertex_name.to_owned(),
            fragment_name: fragment_name.to_owned(),
            diagnostics: vec![],
        };

        let stages = [
            (vertex_name, ShaderKind::Vertex),
            (fragment_name, ShaderKind::Fragment),
        ];

        let mut sources: Vec<(&str, ShaderKind, CString)> = Vec::with_capacity(stages.len());
        for &(name, kind) in &stages {
            match res.load_cstring(name) {
                Ok(source) => {
                    if ctx.verbose() {
                        debug!(
                            "source length for {}: {}",
                            res.path_of(name).display(),
                            source.as_bytes().len()
                        );
                    }
                    sources.push((name, kind, source));
                }
                Err(e) => {
                    program.fail(ShaderError::ResourceLoad {
                        name: name.into(),
                        source: e,
                    });
                    return program;
                }
            }
        }

        let mut shaders = Vec::with_capacity(sources.len());
        for (name, kind, source) in &sources {
            let shader = ctx.backend_mut().create_shader(kind.gl_enum());
            if !ctx.backend_mut().compile_shader(shader, source) {
                let message = ctx.backend().shader_info_log(shader);
                program.fail(ShaderError::CompileError {
                    name: (*name).to_owned(),
                    message,
                });
            }
            shaders.push(shader);
        }

        let backend = ctx.backend_mut();
        let program_id = backend.create_program();
        for &shader in &shaders {
            backend.attach_shader(program_id, shader);
        }
        if !backend.link_program(program_id) {
            let message = backend.program_info_log(program_id);
            let name = program.name();
            program.fail(ShaderError::LinkError { name, message });
        }
        for shader in shaders {
            backend.detach_shader(program_id, shader);
            backend.delete_shader(shader);
        }
        program.id = program_id;

        if program.valid {
            info!("loaded shader program {}, id: {}", program.name(), program.id);
        }
        program
    }

    fn fail(&mut self, err: ShaderError) {
        error!("{}", err);
        self.valid = false;
        self.diagnostics.push(err);
    }

    /// `vertex+fragment`, used in diagnostics.
    pub fn name(&self) -> String {
        format!("{}+{}", self.vertex_name, self.fragment_name)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn diagnostics(&self) -> &[ShaderError] {
        &self.diagnostics
    }

    pub fn is_bound<B: GlBackend>(&self, ctx: &RenderContext<B>) -> bool {
        self.valid && ctx.active_program() == Some(self.id)
    }

    /// Makes this program current unless it already is or is invalid.
    /// Returns whether `glUseProgram` was issued.
    pub fn bind<B: GlBackend>(&self, ctx: &mut RenderContext<B>) -> bool {
        if !self.valid {
            if ctx.verbose() {
                warn!("shader program {} (id {}) is not valid", self.name(), self.id);
            }
            return false;
        }
        if ctx.active_program() == Some(self.id) {
            return false;
        }
        ctx.use_program(self.id);
        true
    }

    /// Looks `name` up on every call; nothing is cached.
    pub fn uniform_location<B: GlBackend>(
        &self,
        ctx: &mut RenderContext<B>,
        name: &CStr,
    ) -> UniformLocation {
        if !self.valid {
            return UniformLocation::UNRESOLVED;
        }
        let location = UniformLocation::new(ctx.backend_mut().uniform_location(self.id, name));
        if !location.is_resolved() && ctx.verbose() {
            warn!(
                "no uniform location found for '{}' in {}",
                name.to_string_lossy(),
                self.vertex_name
            );
        }
        location
    }

    /// Resolves `name` and writes `value` to it.
    pub fn set_uniform<B: GlBackend, U: Uniform + ?Sized>(
        &self,
        ctx: &mut RenderContext<B>,
        name: &CStr,
        value: &U,
    ) {
        let location = self.uniform_location(ctx, name);
        self.set_uniform_at(ctx, location, value);
    }

    /// Writes `value` to an already resolved location.
    ///
    /// GL applies the write to whichever program is current, so this program
    /// should be bound first. An unresolved location is written anyway and
    /// GL drops it.
    pub fn set_uniform_at<B: GlBackend, U: Uniform + ?Sized>(
        &self,
        ctx: &mut RenderContext<B>,
        location: UniformLocation,
        value: &U,
    ) {
        if !self.valid {
            if ctx.verbose() {
                debug!("ignoring uniform write on invalid program {}", self.name());
            }
            return;
        }
        if ctx.verbose() && !self.is_bound(ctx) {
            warn!(
                "uniform write for {} while program {:?} is current",
                self.name(),
                ctx.active_program()
            );
        }
        value.write(ctx.backend_mut(), location);
    }

    pub fn destroy<B: GlBackend>(self, ctx: &mut RenderContext<B>) {
        if self.id != 0 {
            ctx.forget_program(self.id);
            ctx.backend_mut().delete_program(self.id);
        }
    }
}

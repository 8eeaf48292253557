use gl::types::GLuint;

use super::backend::{Gl, GlBackend};

/// Per-window rendering state shared by everything that issues shader calls.
///
/// Tracks which program is currently in use so that redundant
/// `glUseProgram` calls are skipped.
pub struct RenderContext<B: GlBackend = Gl> {
    backend: B,
    active_program: Option<GLuint>,
    verbose: bool,
}

impl<B: GlBackend> RenderContext<B> {
    pub fn new(backend: B, verbose: bool) -> Self {
        Self {
            backend,
            active_program: None,
            verbose,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn active_program(&self) -> Option<GLuint> {
        self.active_program
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub(crate) fn use_program(&mut self, id: GLuint) {
        self.active_program = Some(id);
        self.backend.use_program(id);
    }

    pub(crate) fn forget_program(&mut self, id: GLuint) {
        if self.active_program == Some(id) {
            self.active_program = None;
        }
    }
}

use gl;

use crate::render_gl::{buffer, GlBackend};

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Unit quad in the first quadrant, drawn as a triangle strip. The last
/// corner is lifted slightly in z.
pub const VERTICES: [Vertex; 4] = [
    Vertex {
        position: [0.0, 1.0, 0.0],
        tex_coord: [0.0, 0.0],
    },
    Vertex {
        position: [0.0, 0.0, 0.0],
        tex_coord: [0.0, 1.0],
    },
    Vertex {
        position: [1.0, 1.0, 0.0],
        tex_coord: [1.0, 0.0],
    },
    Vertex {
        position: [1.0, 0.0, 0.2],
        tex_coord: [1.0, 1.0],
    },
];

const STRIDE: usize = std::mem::size_of::<Vertex>();
const TEX_COORD_OFFSET: usize = 3 * std::mem::size_of::<f32>();

pub struct Quad {
    _vbo: buffer::ArrayBuffer,
    vao: buffer::VertexArray,
}

impl Quad {
    pub fn new() -> Self {
        let vbo = buffer::ArrayBuffer::new();
        vbo.bind();
        vbo.static_draw_data(&VERTICES);
        vbo.unbind();

        let vao = buffer::VertexArray::new();
        vao.bind();
        vbo.bind();
        unsafe {
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                STRIDE as gl::types::GLint,
                std::ptr::null(),
            );
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                STRIDE as gl::types::GLint,
                TEX_COORD_OFFSET as *const gl::types::GLvoid,
            );
        }
        vbo.unbind();
        vao.unbind();

        Self { _vbo: vbo, vao }
    }

    pub fn vertex_array(&self) -> gl::types::GLuint {
        self.vao.id()
    }
}

/// Draws the quad strip stored in `vao`.
pub fn draw(backend: &mut dyn GlBackend, vao: gl::types::GLuint) {
    backend.bind_vertex_array(vao);
    backend.draw_arrays(gl::TRIANGLE_STRIP, 0, VERTICES.len() as i32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_gl::recording::{Call, RecordingBackend};

    #[test]
    fn draw_binds_then_draws_four_strip_vertices() {
        let mut backend = RecordingBackend::default();
        draw(&mut backend, 9);
        assert_eq!(
            backend.calls,
            vec![
                Call::BindVertexArray(9),
                Call::DrawArrays(gl::TRIANGLE_STRIP, 0, 4),
            ]
        );
    }

    #[test]
    fn vertex_is_five_packed_floats() {
        assert_eq!(STRIDE, 5 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::size_of_val(&VERTICES), 20 * std::mem::size_of::<f32>());
    }

    #[test]
    fn tex_coords_flip_v_against_y() {
        for v in &VERTICES {
            assert_eq!(v.tex_coord[0], v.position[0]);
            assert_eq!(v.tex_coord[1], 1.0 - v.position[1]);
        }
    }
}

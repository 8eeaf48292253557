use gl;
use nalgebra::{Vector3, Vector4};

/// Clear color plus the clear of the color and depth attachments.
pub struct ColorBuffer {
    pub color: Vector4<f32>,
}

impl ColorBuffer {
    /// Opaque `color`.
    pub fn from_color(color: Vector3<f32>) -> Self {
        Self {
            color: color.push(1.0),
        }
    }

    pub fn set_used(&self) {
        unsafe {
            gl::ClearColor(self.color.x, self.color.y, self.color.z, self.color.w);
        }
    }

    pub fn clear(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

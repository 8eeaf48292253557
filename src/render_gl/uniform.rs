use gl::types::GLint;
use na::{Matrix4, Vector2, Vector3, Vector4};
use nalgebra as na;

use super::backend::GlBackend;

/// A uniform location as returned by `glGetUniformLocation`.
///
/// [`UniformLocation::UNRESOLVED`] (-1) is still a legal write target: GL
/// ignores writes to it, so a misspelled or optimized-out uniform never
/// fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub const UNRESOLVED: UniformLocation = UniformLocation(-1);

    pub fn new(location: GLint) -> Self {
        UniformLocation(location)
    }

    pub fn raw(self) -> GLint {
        self.0
    }

    pub fn is_resolved(self) -> bool {
        self.0 >= 0
    }
}

/// Values that can be written to a uniform of the currently used program.
pub trait Uniform {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation);
}

impl Uniform for bool {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_1i(location.raw(), *self as GLint);
    }
}

impl Uniform for i32 {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_1i(location.raw(), *self);
    }
}

impl Uniform for f32 {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_1f(location.raw(), *self);
    }
}

impl Uniform for Vector2<f32> {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_2f(location.raw(), self.x, self.y);
    }
}

impl Uniform for Vector3<f32> {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_3f(location.raw(), self.x, self.y, self.z);
    }
}

impl Uniform for Vector4<f32> {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        backend.uniform_4f(location.raw(), self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Matrix4<f32> {
    fn write(&self, backend: &mut dyn GlBackend, location: UniformLocation) {
        // nalgebra storage is column-major, which is what GL expects untransposed
        backend.uniform_matrix_4fv(location.raw(), self.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_gl::backend::recording::{Call, RecordingBackend};

    #[test]
    fn bool_is_written_as_int() {
        let mut backend = RecordingBackend::default();
        true.write(&mut backend, UniformLocation::new(3));
        false.write(&mut backend, UniformLocation::new(3));
        assert_eq!(
            backend.calls,
            vec![Call::Uniform1i(3, 1), Call::Uniform1i(3, 0)]
        );
    }

    #[test]
    fn vectors_use_matching_component_count() {
        let mut backend = RecordingBackend::default();
        let loc = UniformLocation::new(0);
        Vector2::new(1.0f32, 2.0).write(&mut backend, loc);
        Vector3::new(1.0f32, 2.0, 3.0).write(&mut backend, loc);
        Vector4::new(1.0f32, 2.0, 3.0, 4.0).write(&mut backend, loc);
        assert_eq!(
            backend.calls,
            vec![
                Call::Uniform2f(0, [1.0, 2.0]),
                Call::Uniform3f(0, [1.0, 2.0, 3.0]),
                Call::Uniform4f(0, [1.0, 2.0, 3.0, 4.0]),
            ]
        );
    }

    #[test]
    fn matrix_is_column_major() {
        let mut backend = RecordingBackend::default();
        let m = Matrix4::new_translation(&Vector3::new(5.0f32, 6.0, 7.0));
        m.write(&mut backend, UniformLocation::new(1));
        match &backend.calls[..] {
            [Call::UniformMatrix4fv(1, values)] => {
                // translation sits in the last column
                assert_eq!(&values[12..15], &[5.0, 6.0, 7.0]);
                assert_eq!(values[15], 1.0);
            }
            calls => panic!("unexpected calls: {:?}", calls),
        }
    }

    #[test]
    fn unresolved_location_is_passed_through() {
        let mut backend = RecordingBackend::default();
        2.5f32.write(&mut backend, UniformLocation::UNRESOLVED);
        assert!(!UniformLocation::UNRESOLVED.is_resolved());
        assert_eq!(backend.calls, vec![Call::Uniform1f(-1, 2.5)]);
    }
}

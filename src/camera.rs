use na::{Matrix4, Rotation3, Vector3};
use nalgebra as na;

use crate::controls::Controls;

/// Pan/rotate state folded directly into the projection matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: Matrix4<f32>,
    /// Accumulated rotation in degrees.
    heading: f32,
    /// Degrees per second.
    rot_speed: f32,
    /// Units per second.
    move_speed: f32,
}

impl Camera {
    pub fn new(projection: Matrix4<f32>, rot_speed: f32, move_speed: f32) -> Self {
        Self {
            projection,
            heading: 0.0,
            rot_speed,
            move_speed,
        }
    }

    /// Orthographic view of a `2 * half_extent` cube centered on the origin.
    pub fn orthographic(half_extent: f32, rot_speed: f32, move_speed: f32) -> Self {
        let projection = Matrix4::new_orthographic(
            -half_extent,
            half_extent,
            -half_extent,
            half_extent,
            -half_extent,
            half_extent,
        );
        Self::new(projection, rot_speed, move_speed)
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    #[cfg(test)]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Applies one frame of input held for `dt` seconds.
    pub fn update(&mut self, controls: &Controls, dt: f32) {
        if controls.rotate != 0 {
            let delta = controls.rotate as f32 * self.rot_speed * dt;
            self.projection *= Matrix4::from_axis_angle(&Vector3::z_axis(), delta.to_radians());
            self.heading += delta;
        }

        if controls.is_moving() {
            let vel = Vector3::new(controls.move_x as f32, controls.move_y as f32, 0.0);
            // move against the accumulated heading so screen-space directions hold
            let undo_heading =
                Rotation3::from_axis_angle(&Vector3::z_axis(), -(self.heading + 180.0).to_radians());
            let vel = undo_heading * vel;
            self.projection *= Matrix4::new_translation(&(vel * (self.move_speed * dt)));
        }
    }
}

pub const GRID_SIZE: usize = 2;
pub const QUAD_SCALE: f32 = 100.0;
const BACK_LAYER_DEPTH: f32 = -2.0;

/// Model matrices for the 2x2 grid: for each cell a front quad followed by a
/// back quad offset diagonally by one quad.
pub fn grid_models() -> Vec<Matrix4<f32>> {
    let scale = Matrix4::new_scaling(QUAD_SCALE);
    let mut models = Vec::with_capacity(GRID_SIZE * GRID_SIZE * 2);
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let x = (i as f32 - 1.0) * 2.0;
            let y = (j as f32 - 1.0) * 2.0;
            models.push(scale * Matrix4::new_translation(&Vector3::new(x, y, 0.0)));
            models.push(
                scale
                    * Matrix4::new_translation(&Vector3::new(x + 1.0, y + 1.0, BACK_LAYER_DEPTH)),
            );
        }
    }
    models
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use nalgebra::Point3;

    use super::*;

    const DEFAULT_ROT_SPEED: f32 = 120.0;
    const DEFAULT_MOVE_SPEED: f32 = 250.0;

    fn assert_mat_eq(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(
                approx_eq!(f32, *x, *y, epsilon = 1e-5),
                "\n{}\n!=\n{}",
                a,
                b
            );
        }
    }

    fn camera() -> Camera {
        Camera::orthographic(400.0, DEFAULT_ROT_SPEED, DEFAULT_MOVE_SPEED)
    }

    #[test]
    fn idle_frame_leaves_projection_unchanged() {
        let mut cam = camera();
        let before = cam.clone();
        cam.update(&Controls::default(), 0.016);
        assert_eq!(cam, before);
    }

    #[test]
    fn opposing_keys_leave_projection_unchanged() {
        let mut cam = camera();
        let before = *cam.projection();
        let controls = Controls::from_pressed(|_| true);
        assert!(controls.quit);
        cam.update(&controls, 0.5);
        assert_eq!(cam.projection(), &before);
        assert_eq!(cam.heading(), 0.0);
    }

    #[test]
    fn rotate_right_accumulates_heading() {
        let mut cam = camera();
        let before = *cam.projection();
        let dt = 0.25;
        cam.update(
            &Controls {
                rotate: 1,
                ..Controls::default()
            },
            dt,
        );

        assert!(approx_eq!(f32, cam.heading(), DEFAULT_ROT_SPEED * dt, epsilon = 1e-5));
        let expected = before
            * Matrix4::from_axis_angle(&Vector3::z_axis(), (DEFAULT_ROT_SPEED * dt).to_radians());
        assert_mat_eq(cam.projection(), &expected);
    }

    #[test]
    fn rotate_left_decreases_heading() {
        let mut cam = camera();
        let left = Controls {
            rotate: -1,
            ..Controls::default()
        };
        cam.update(&left, 0.5);
        cam.update(&left, 0.25);
        assert!(approx_eq!(f32, cam.heading(), -90.0, epsilon = 1e-4));
    }

    #[test]
    fn move_without_heading_translates_opposite() {
        let mut cam = camera();
        let before = *cam.projection();
        let dt = 0.1;
        cam.update(
            &Controls {
                move_y: 1,
                ..Controls::default()
            },
            dt,
        );

        let expected =
            before * Matrix4::new_translation(&Vector3::new(0.0, -DEFAULT_MOVE_SPEED * dt, 0.0));
        assert_mat_eq(cam.projection(), &expected);
        assert_eq!(cam.heading(), 0.0);
    }

    #[test]
    fn move_after_quarter_turn_uses_heading() {
        let mut cam = Camera::new(Matrix4::identity(), 90.0, 10.0);
        cam.update(
            &Controls {
                rotate: 1,
                ..Controls::default()
            },
            1.0,
        );
        let rotated = *cam.projection();
        cam.update(
            &Controls {
                move_x: 1,
                ..Controls::default()
            },
            1.0,
        );

        // rotating (1, 0) by -270 degrees gives (0, 1)
        let expected = rotated * Matrix4::new_translation(&Vector3::new(0.0, 10.0, 0.0));
        assert_mat_eq(cam.projection(), &expected);
    }

    #[test]
    fn grid_has_two_layers_of_four() {
        let models = grid_models();
        assert_eq!(models.len(), 8);

        let origins: Vec<Point3<f32>> = models
            .iter()
            .map(|m| m.transform_point(&Point3::origin()))
            .collect();
        let expected = [
            (-200.0, -200.0, 0.0),
            (-100.0, -100.0, -200.0),
            (-200.0, 0.0, 0.0),
            (-100.0, 100.0, -200.0),
            (0.0, -200.0, 0.0),
            (100.0, -100.0, -200.0),
            (0.0, 0.0, 0.0),
            (100.0, 100.0, -200.0),
        ];
        for (p, &(x, y, z)) in origins.iter().zip(expected.iter()) {
            assert!(approx_eq!(f32, p.x, x, epsilon = 1e-4));
            assert!(approx_eq!(f32, p.y, y, epsilon = 1e-4));
            assert!(approx_eq!(f32, p.z, z, epsilon = 1e-4));
        }
    }

    #[test]
    fn grid_quads_are_scaled() {
        for m in grid_models() {
            let a = m.transform_point(&Point3::origin());
            let b = m.transform_point(&Point3::new(1.0, 1.0, 0.0));
            assert!(approx_eq!(f32, b.x - a.x, QUAD_SCALE, epsilon = 1e-4));
            assert!(approx_eq!(f32, b.y - a.y, QUAD_SCALE, epsilon = 1e-4));
        }
    }
}

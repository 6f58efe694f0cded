/// Model orientation and transformation matrices
use nalgebra::{Matrix4, Vector3};

/// Orientation of the model as two angles (in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the horizontal axis
    pub pitch: f32,
    /// Rotation about the vertical axis
    pub yaw: f32,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation matrix for an orientation.
    ///
    /// Yaw is applied first so the model spins about its own vertical axis,
    /// then pitch tilts the result toward or away from the viewer.
    pub fn rotation_matrix(orientation: &Orientation) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(orientation.pitch, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, orientation.yaw, 0.0));
        rx * ry
    }

    /// Rotation followed by uniform scale
    pub fn model_matrix(orientation: &Orientation, scale: f32) -> Matrix4<f32> {
        Self::rotation_matrix(orientation) * Matrix4::new_scaling(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_orientation_rotate() {
        let mut state = Orientation::default();
        assert_eq!(state.pitch, 0.0);
        assert_eq!(state.yaw, 0.0);

        state.rotate(0.1, 0.2);
        assert!((state.pitch - 0.1).abs() < 1e-6);
        assert!((state.yaw - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Orientation::default());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_yaw_keeps_vertical_axis() {
        let matrix = Transform::rotation_matrix(&Orientation::new(0.0, 1.3));
        let top = matrix.transform_point(&Point3::new(0.0, 2.0, 0.0));
        assert!((top - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_model_matrix_scales() {
        let matrix = Transform::model_matrix(&Orientation::default(), 0.5);
        let p = matrix.transform_point(&Point3::new(2.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-6);
    }
}

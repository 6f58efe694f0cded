/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Vertical field of view of the hero camera
pub const HERO_FOV_DEGREES: f32 = 45.0;

/// Where the hero camera sits; it always looks at the origin
pub const HERO_CAMERA_POSITION: [f32; 3] = [0.0, 0.5, 12.0];

/// Perspective camera for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// The fixed hero camera; only the aspect ratio follows the layout
    pub fn hero(aspect: f32) -> Self {
        let [x, y, z] = HERO_CAMERA_POSITION;
        Self {
            position: Point3::new(x, y, z),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: HERO_FOV_DEGREES.to_radians(),
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in normalised device units, smaller
    /// meaning closer, or `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;

        // Clip space with the perspective divide applied
        let ndc = mvp.transform_point(point);
        if !(ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite()) {
            return None;
        }

        let inside = |v: f32| (-1.0..=1.0).contains(&v);
        if !(inside(ndc.x) && inside(ndc.y) && inside(ndc.z)) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::hero(800.0 / 600.0);
        assert_eq!(camera.target, Point3::origin());
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - HERO_FOV_DEGREES.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_aspect_falls_back() {
        assert_eq!(Camera::hero(f32::NAN).aspect, 1.0);
        assert_eq!(Camera::hero(0.0).aspect, 1.0);
    }

    #[test]
    fn test_projection_is_perspective() {
        let camera = Camera::hero(1.5);
        let expected = Matrix4::new_perspective(1.5, HERO_FOV_DEGREES.to_radians(), 0.1, 100.0);
        assert_eq!(camera.projection_matrix(), expected);
        // w picks up -z, so farther points shrink
        assert_eq!(camera.projection_matrix()[(3, 2)], -1.0);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::hero(800.0 / 600.0);
        let view = camera.view_matrix();
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::hero(2.0);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::hero(2.0);
        let model = Matrix4::identity();
        let project = |z: f32| {
            let point = Point3::new(0.0, 0.5, z);
            camera.project_to_screen(&point, &model, 80, 40).map(|(_, _, depth)| depth)
        };
        let (near, far) = (project(2.0).unwrap(), project(-2.0).unwrap());
        assert!(near < far);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::hero(2.0);
        let behind = Point3::new(0.0, 0.5, 20.0);
        assert!(camera.project_to_screen(&behind, &Matrix4::identity(), 80, 40).is_none());
    }
}

/// Drag-to-orbit controller for the hero tower.
///
/// The tower spins on its own until the viewer grabs it. While the pointer is
/// held, pointer movement steers yaw and pitch directly; releasing the pointer
/// hands control straight back to the automatic spin.

use nalgebra::{Matrix4, Point2};

use crate::error::GeometryError;
use crate::geometry::Mesh;
use crate::tower::build_tower;
use crate::transform::{Orientation, Transform};

/// Automatic yaw speed in radians per second
pub const AUTO_ROTATE_SPEED: f32 = 0.5;

/// Radians of rotation per pixel of pointer travel
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Scale applied to the tower so it fits the hero camera
pub const TOWER_SCALE: f32 = 0.55;

/// Who currently drives the orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationMode {
    Auto,
    /// `last` is the pointer position of the previous event
    Dragging { last: Point2<f32> },
}

/// The tower mesh together with its interactive orientation
#[derive(Debug, Clone)]
pub struct RotatingTower {
    mesh: Mesh,
    orientation: Orientation,
    mode: RotationMode,
    sensitivity: f32,
}

impl RotatingTower {
    /// Build the tower mesh once and start spinning
    pub fn mount() -> Result<Self, GeometryError> {
        Ok(Self::with_mesh(build_tower()?))
    }

    /// Wrap an already built mesh
    pub fn with_mesh(mesh: Mesh) -> Self {
        Self {
            mesh,
            orientation: Orientation::default(),
            mode: RotationMode::Auto,
            sensitivity: DRAG_SENSITIVITY,
        }
    }

    /// Pointer pressed on the viewport: take manual control
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.mode = RotationMode::Dragging {
            last: Point2::new(x, y),
        };
    }

    /// Pointer moved; only has an effect while dragging
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let RotationMode::Dragging { last } = self.mode else {
            return;
        };
        let now = Point2::new(x, y);
        let delta = now - last;
        self.orientation
            .rotate(delta.y * self.sensitivity, delta.x * self.sensitivity);
        self.mode = RotationMode::Dragging { last: now };
    }

    /// Pointer released: resume the automatic spin immediately
    pub fn pointer_up(&mut self) {
        self.mode = RotationMode::Auto;
    }

    /// Per-frame update with the elapsed time in seconds
    pub fn advance(&mut self, dt: f32) {
        if self.mode != RotationMode::Auto {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.orientation.yaw += AUTO_ROTATE_SPEED * dt;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, RotationMode::Dragging { .. })
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::model_matrix(&self.orientation, TOWER_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower() -> RotatingTower {
        RotatingTower::with_mesh(Mesh::new())
    }

    #[test]
    fn test_auto_rotation_is_rate_times_dt() {
        let mut t = tower();
        for dt in [0.0, 0.016, 0.1, 1.5] {
            let before = t.orientation();
            t.advance(dt);
            let after = t.orientation();
            assert!((after.yaw - before.yaw - AUTO_ROTATE_SPEED * dt).abs() < 1e-6);
            assert_eq!(after.pitch, before.pitch);
        }
    }

    #[test]
    fn test_negative_or_nan_dt_does_nothing() {
        let mut t = tower();
        t.advance(-1.0);
        t.advance(f32::NAN);
        assert_eq!(t.orientation(), Orientation::default());
    }

    #[test]
    fn test_dragging_ignores_frame_time() {
        let mut t = tower();
        t.pointer_down(10.0, 10.0);
        t.advance(5.0);
        assert_eq!(t.orientation(), Orientation::default());
        assert!(t.is_dragging());
    }

    #[test]
    fn test_drag_uses_delta_since_last_move() {
        let mut t = tower();
        t.pointer_down(100.0, 50.0);
        t.pointer_move(120.0, 40.0);
        let o = t.orientation();
        assert!((o.yaw - 20.0 * DRAG_SENSITIVITY).abs() < 1e-6);
        assert!((o.pitch + 10.0 * DRAG_SENSITIVITY).abs() < 1e-6);

        t.pointer_move(125.0, 40.0);
        let o = t.orientation();
        assert!((o.yaw - 25.0 * DRAG_SENSITIVITY).abs() < 1e-6);
        assert!((o.pitch + 10.0 * DRAG_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut t = tower();
        t.pointer_move(50.0, 50.0);
        assert_eq!(t.orientation(), Orientation::default());
        assert_eq!(t.mode(), RotationMode::Auto);
    }

    #[test]
    fn test_release_resumes_auto_immediately() {
        let mut t = tower();
        t.pointer_down(0.0, 0.0);
        for i in 0..100 {
            t.pointer_move(i as f32, 0.0);
            t.advance(0.5);
        }
        t.pointer_up();
        assert_eq!(t.mode(), RotationMode::Auto);

        let before = t.orientation().yaw;
        t.advance(0.2);
        assert!((t.orientation().yaw - before - AUTO_ROTATE_SPEED * 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_mount_builds_tower_once() {
        let t = RotatingTower::mount().unwrap();
        assert!(t.mesh().triangle_count() > 0);
        let first = t.mesh().positions().as_ptr();
        let mut t = t;
        t.advance(1.0);
        assert_eq!(t.mesh().positions().as_ptr(), first);
    }
}

/// ASCII rasterizer that turns the shaded mesh into a grid of characters
use nalgebra::Matrix4;

use crate::geometry::{Mesh, Triangle};
use crate::lighting::{brightness, Light};
use crate::projection::Camera;

/// Character luminosity ramp for shading (darkest to lightest)
pub const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Depth-buffered character canvas
#[derive(Debug, Clone)]
pub struct AsciiRaster {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRaster {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Change the canvas size, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lights: &[Light],
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for triangle in mesh.triangles() {
            self.render_triangle(&triangle, model_matrix, camera, lights);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lights: &[Light],
    ) {
        let (width, height) = (self.width as u32, self.height as u32);
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(&vertex.position, model_matrix, width, height) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Shade with the normal turned into world space
        let normal = model_matrix
            .transform_vector(&triangle.vertex_normal())
            .try_normalize(f32::EPSILON);
        let Some(normal) = normal else {
            return;
        };
        let level = brightness(lights, &normal);

        let char_index = (level * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to the canvas
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let weights = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py));
                let Some((w0, w1, w2)) = weights else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    /// One row of characters
    pub fn row(&self, y: usize) -> &[char] {
        &self.char_buffer[y * self.width..(y + 1) * self.width]
    }

    /// Every row joined with newlines
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            text.extend(self.row(y));
            text.push('\n');
        }
        text
    }

    /// Number of cells the mesh covers
    pub fn filled_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::HERO_LIGHTS;
    use crate::tower::build_tower;
    use crate::transform::{Orientation, Transform};

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_tower_covers_cells() {
        let mesh = build_tower().unwrap();
        let mut raster = AsciiRaster::new(40, 30);
        let model = Transform::model_matrix(&Orientation::default(), 0.55);
        raster.render_mesh(&mesh, &model, &Camera::hero(40.0 / 60.0), &HERO_LIGHTS);

        assert!(raster.filled_cells() > 40);
        // The tower is taller than wide, so the middle column is filled, the edges are not
        assert!(raster.row(15).iter().any(|&c| c != ' '));
        assert_eq!(raster.row(15)[0], ' ');
    }

    #[test]
    fn test_clear_and_resize() {
        let mesh = build_tower().unwrap();
        let mut raster = AsciiRaster::new(20, 10);
        raster.render_mesh(&mesh, &Matrix4::identity(), &Camera::hero(1.0), &HERO_LIGHTS);
        raster.clear();
        assert_eq!(raster.filled_cells(), 0);

        raster.resize(8, 4);
        assert_eq!(raster.to_text().lines().count(), 4);
        assert!(raster.to_text().lines().all(|line| line.chars().count() == 8));
    }

    #[test]
    fn test_empty_canvas_renders_nothing() {
        let mesh = build_tower().unwrap();
        let mut raster = AsciiRaster::new(0, 0);
        raster.render_mesh(&mesh, &Matrix4::identity(), &Camera::hero(1.0), &HERO_LIGHTS);
        assert_eq!(raster.to_text(), "");
    }
}

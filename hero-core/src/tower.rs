/// The clock tower shown in the hero section.
///
/// The tower is a fixed stack of boxes and cones. [`build_tower`] places each
/// block at its offset, merges them into one mesh, centres it and derives
/// normals. Heights are in model units with the ground at `y = 0`.

use nalgebra::Vector3;

use crate::error::GeometryError;
use crate::geometry::{Mesh, Primitive};

/// Solid used for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// `turn` rotates the cone about its axis, so a four-sided cone can line
    /// up with the boxes below it.
    Cone {
        radius: f32,
        height: f32,
        segments: u32,
        turn: f32,
    },
}

/// One architectural block of the tower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub name: &'static str,
    pub shape: Shape,
    /// Centre of the block
    pub offset: [f32; 3],
}

impl Block {
    const fn cuboid(name: &'static str, size: [f32; 3], offset: [f32; 3]) -> Self {
        Self {
            name,
            shape: Shape::Cuboid {
                width: size[0],
                height: size[1],
                depth: size[2],
            },
            offset,
        }
    }

    const fn cone(
        name: &'static str,
        radius: f32,
        height: f32,
        segments: u32,
        turn: f32,
        offset: [f32; 3],
    ) -> Self {
        Self {
            name,
            shape: Shape::Cone {
                radius,
                height,
                segments,
                turn,
            },
            offset,
        }
    }

    /// Build the block's primitive at its place in the tower
    pub fn primitive(&self) -> Result<Primitive, GeometryError> {
        let primitive = match self.shape {
            Shape::Cuboid { width, height, depth } => Primitive::cuboid(width, height, depth)?,
            Shape::Cone {
                radius,
                height,
                segments,
                turn,
            } => Primitive::cone(radius, height, segments)?.rotated_y(turn),
        };
        let [x, y, z] = self.offset;
        Ok(primitive.translated(Vector3::new(x, y, z)))
    }
}

const CLOCK_Y: f32 = 6.1;
const FACE_OFFSET: f32 = 0.83;
const ARCH_Y: f32 = 7.25;
const ARCH_OFFSET: f32 = 0.66;

/// Every block of the tower, bottom to top
#[rustfmt::skip]
pub const TOWER_BLOCKS: [Block; 17] = [
    Block::cuboid("foundation", [2.4, 0.3, 2.4], [0.0, 0.15, 0.0]),
    Block::cuboid("base", [2.0, 1.2, 2.0], [0.0, 0.9, 0.0]),
    Block::cuboid("shaft", [1.4, 4.0, 1.4], [0.0, 3.5, 0.0]),
    Block::cuboid("mid-band", [1.6, 0.2, 1.6], [0.0, 3.5, 0.0]),
    Block::cuboid("clock housing", [1.6, 1.2, 1.6], [0.0, CLOCK_Y, 0.0]),
    Block::cuboid("clock face north", [0.9, 0.9, 0.06], [0.0, CLOCK_Y, -FACE_OFFSET]),
    Block::cuboid("clock face south", [0.9, 0.9, 0.06], [0.0, CLOCK_Y, FACE_OFFSET]),
    Block::cuboid("clock face east", [0.06, 0.9, 0.9], [FACE_OFFSET, CLOCK_Y, 0.0]),
    Block::cuboid("clock face west", [0.06, 0.9, 0.9], [-FACE_OFFSET, CLOCK_Y, 0.0]),
    Block::cuboid("belfry", [1.3, 1.2, 1.3], [0.0, 7.3, 0.0]),
    Block::cuboid("arch north", [0.6, 0.8, 0.04], [0.0, ARCH_Y, -ARCH_OFFSET]),
    Block::cuboid("arch south", [0.6, 0.8, 0.04], [0.0, ARCH_Y, ARCH_OFFSET]),
    Block::cuboid("arch east", [0.04, 0.8, 0.6], [ARCH_OFFSET, ARCH_Y, 0.0]),
    Block::cuboid("arch west", [0.04, 0.8, 0.6], [-ARCH_OFFSET, ARCH_Y, 0.0]),
    Block::cuboid("crown", [1.5, 0.2, 1.5], [0.0, 8.0, 0.0]),
    Block::cone("roof", 1.0, 1.2, 4, std::f32::consts::FRAC_PI_4, [0.0, 8.7, 0.0]),
    Block::cone("spire", 0.08, 1.0, 8, 0.0, [0.0, 9.8, 0.0]),
];

/// Build the primitives of every tower block, in order
pub fn tower_primitives() -> Result<Vec<Primitive>, GeometryError> {
    TOWER_BLOCKS.iter().map(Block::primitive).collect()
}

/// Build the merged, centred tower mesh with vertex normals
pub fn build_tower() -> Result<Mesh, GeometryError> {
    let primitives = tower_primitives()?;
    let mut mesh = Mesh::merge(&primitives)?;
    mesh.center();
    mesh.compute_vertex_normals();

    log::debug!(
        "built tower mesh: {} blocks, {} vertices, {} triangles",
        primitives.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_is_sum_of_blocks() {
        let primitives = tower_primitives().unwrap();
        let expected: usize = primitives.iter().map(Primitive::vertex_count).sum();
        let mesh = build_tower().unwrap();
        assert_eq!(mesh.vertex_count(), expected);
        assert_eq!(primitives.len(), TOWER_BLOCKS.len());
    }

    #[test]
    fn test_indices_stay_in_range() {
        let mesh = build_tower().unwrap();
        let max = mesh.vertex_count() as u32 - 1;
        assert!(mesh.indices().iter().all(|&i| i <= max));
        assert_eq!(mesh.indices().len() % 3, 0);
    }

    #[test]
    fn test_tower_is_centred() {
        let mesh = build_tower().unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.coords + max.coords).norm() < 1e-4);
        // Ground to spire tip
        assert!((max.y - min.y - 10.3).abs() < 1e-4);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_tower().unwrap();
        let b = build_tower().unwrap();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn test_roof_lines_up_with_crown() {
        let roof = TOWER_BLOCKS[15].primitive().unwrap();
        // A quarter-turned four-sided cone of radius 1 has its base edges on x = ±0.707
        let max_x = roof.positions().iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_x - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }
}

/// Geometry primitives and the merged mesh they are assembled into
use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
    }

    /// Average of the three vertex normals, used for smooth shading
    pub fn vertex_normal(&self) -> Vector3<f32> {
        let sum = self.vertices[0].normal + self.vertices[1].normal + self.vertices[2].normal;
        sum.try_normalize(f32::EPSILON)
            .unwrap_or_else(|| self.calculate_normal())
    }
}

/// One solid before it is merged into a [`Mesh`].
///
/// Primitives either carry an index list (every three indices form a triangle)
/// or are a plain triangle soup where every three positions form a triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    positions: Vec<Point3<f32>>,
    indices: Option<Vec<u32>>,
}

impl Primitive {
    /// Build an indexed primitive, checking that every index addresses a vertex
    pub fn indexed(positions: Vec<Point3<f32>>, indices: Vec<u32>) -> Result<Self, GeometryError> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle { len: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self {
            positions,
            indices: Some(indices),
        })
    }

    /// Build a primitive with no index data
    pub fn non_indexed(positions: Vec<Point3<f32>>) -> Result<Self, GeometryError> {
        if positions.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle { len: positions.len() });
        }
        Ok(Self {
            positions,
            indices: None,
        })
    }

    /// Axis-aligned box centred at the origin with four vertices per face
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Result<Self, GeometryError> {
        let hx = positive("width", width)? / 2.0;
        let hy = positive("height", height)? / 2.0;
        let hz = positive("depth", depth)? / 2.0;

        // Corners listed counter-clockwise as seen from outside each face
        #[rustfmt::skip]
        let faces: [[[f32; 3]; 4]; 6] = [
            [[ hx, -hy,  hz], [ hx, -hy, -hz], [ hx,  hy, -hz], [ hx,  hy,  hz]], // +X
            [[-hx, -hy, -hz], [-hx, -hy,  hz], [-hx,  hy,  hz], [-hx,  hy, -hz]], // -X
            [[-hx,  hy,  hz], [ hx,  hy,  hz], [ hx,  hy, -hz], [-hx,  hy, -hz]], // +Y
            [[-hx, -hy, -hz], [ hx, -hy, -hz], [ hx, -hy,  hz], [-hx, -hy,  hz]], // -Y
            [[-hx, -hy,  hz], [ hx, -hy,  hz], [ hx,  hy,  hz], [-hx,  hy,  hz]], // +Z
            [[ hx, -hy, -hz], [-hx, -hy, -hz], [-hx,  hy, -hz], [ hx,  hy, -hz]], // -Z
        ];

        let mut positions = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for face in &faces {
            let base = positions.len() as u32;
            positions.extend(face.iter().map(|&[x, y, z]| Point3::new(x, y, z)));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Ok(Self {
            positions,
            indices: Some(indices),
        })
    }

    /// Cone standing on the XZ plane, apex up, centred at the origin.
    ///
    /// The side uses one apex vertex per segment so each face keeps its own
    /// normal; the bottom cap is a separate fan.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Result<Self, GeometryError> {
        let radius = positive("radius", radius)?;
        let half = positive("height", height)? / 2.0;
        if segments < 3 {
            return Err(GeometryError::TooFewSegments { segments });
        }

        let ring = |i: u32| {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            Point3::new(radius * theta.sin(), -half, radius * theta.cos())
        };

        let mut positions = Vec::with_capacity(3 * segments as usize + 4);
        let mut indices = Vec::with_capacity(6 * segments as usize);

        // Side: apex row then ring row
        for _ in 0..=segments {
            positions.push(Point3::new(0.0, half, 0.0));
        }
        for i in 0..=segments {
            positions.push(ring(i));
        }
        let ring_start = segments + 1;
        for i in 0..segments {
            indices.extend_from_slice(&[i, ring_start + i, ring_start + i + 1]);
        }

        // Bottom cap
        let center = positions.len() as u32;
        positions.push(Point3::new(0.0, -half, 0.0));
        let cap_start = center + 1;
        for i in 0..=segments {
            positions.push(ring(i));
        }
        for i in 0..segments {
            indices.extend_from_slice(&[center, cap_start + i + 1, cap_start + i]);
        }

        Ok(Self {
            positions,
            indices: Some(indices),
        })
    }

    /// Move every vertex by `offset`
    pub fn translated(mut self, offset: Vector3<f32>) -> Self {
        for p in &mut self.positions {
            *p += offset;
        }
        self
    }

    /// Rotate every vertex about the vertical axis through the origin
    pub fn rotated_y(mut self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        for p in &mut self.positions {
            let (x, z) = (p.x, p.z);
            p.x = x * cos + z * sin;
            p.z = -x * sin + z * cos;
        }
        self
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices this primitive contributes when merged
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }
}

fn positive(what: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDimension { what, value })
    }
}

/// An indexed triangle mesh with per-vertex normals
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate primitives into one buffer pair.
    ///
    /// Each primitive's indices are shifted by the number of vertices already
    /// appended. Primitives without index data add vertices but no indices.
    pub fn merge(primitives: &[Primitive]) -> Result<Self, GeometryError> {
        let vertex_total: usize = primitives.iter().map(Primitive::vertex_count).sum();
        if u32::try_from(vertex_total).is_err() {
            return Err(GeometryError::TooManyVertices { count: vertex_total });
        }
        let index_total: usize = primitives.iter().map(Primitive::index_count).sum();

        let mut mesh = Self {
            positions: Vec::with_capacity(vertex_total),
            normals: Vec::with_capacity(vertex_total),
            indices: Vec::with_capacity(index_total),
        };

        for primitive in primitives {
            let offset = mesh.positions.len() as u32;
            mesh.positions.extend_from_slice(&primitive.positions);
            if let Some(indices) = &primitive.indices {
                mesh.indices.extend(indices.iter().map(|i| i + offset));
            }
        }
        mesh.normals.resize(mesh.positions.len(), Vector3::zeros());

        Ok(mesh)
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }

    /// Translate the mesh so its bounding box is centred on the origin
    pub fn center(&mut self) {
        if let Some((min, max)) = self.bounds() {
            let shift = -nalgebra::center(&min, &max).coords;
            for p in &mut self.positions {
                *p += shift;
            }
        }
    }

    /// Recompute per-vertex normals from the faces that share each vertex.
    ///
    /// Face normals are accumulated unnormalised so larger faces weigh more.
    /// Vertices no triangle references end up with a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(&(self.positions[c] - self.positions[a]));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            *n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        self.normals = normals;
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the indexed faces as standalone triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let vertex = |i: u32| Vertex::new(self.positions[i as usize], self.normals[i as usize]);
            Triangle::new(vertex(tri[0]), vertex(tri[1]), vertex(tri[2]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts() {
        let cuboid = Primitive::cuboid(1.0, 2.0, 3.0).unwrap();
        assert_eq!(cuboid.vertex_count(), 24);
        assert_eq!(cuboid.index_count(), 36);
    }

    #[test]
    fn test_cone_counts() {
        let cone = Primitive::cone(1.0, 2.0, 8).unwrap();
        assert_eq!(cone.vertex_count(), 3 * 8 + 4);
        assert_eq!(cone.index_count(), 6 * 8);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            Primitive::cuboid(0.0, 1.0, 1.0),
            Err(GeometryError::InvalidDimension { what: "width", .. })
        ));
        assert!(Primitive::cuboid(1.0, f32::NAN, 1.0).is_err());
        assert_eq!(
            Primitive::cone(1.0, 1.0, 2),
            Err(GeometryError::TooFewSegments { segments: 2 })
        );
        let points = vec![Point3::origin(); 3];
        assert_eq!(
            Primitive::indexed(points.clone(), vec![0, 1, 3]),
            Err(GeometryError::IndexOutOfRange { index: 3, vertex_count: 3 })
        );
        assert!(Primitive::indexed(points, vec![0, 1]).is_err());
    }

    #[test]
    fn test_merge_offsets_indices() {
        let a = Primitive::cuboid(1.0, 1.0, 1.0).unwrap();
        let b = Primitive::cone(0.5, 1.0, 4).unwrap();
        let mesh = Mesh::merge(&[a.clone(), b.clone()]).unwrap();

        assert_eq!(mesh.vertex_count(), a.vertex_count() + b.vertex_count());
        assert_eq!(mesh.indices().len(), a.index_count() + b.index_count());
        assert_eq!(&mesh.indices()[..36], a.indices().unwrap());
        assert_eq!(mesh.indices()[36], b.indices().unwrap()[0] + 24);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_merge_non_indexed_advances_offset() {
        let soup = Primitive::non_indexed(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        let cuboid = Primitive::cuboid(1.0, 1.0, 1.0).unwrap();

        let mesh = Mesh::merge(&[soup, cuboid]).unwrap();
        assert_eq!(mesh.vertex_count(), 27);
        assert_eq!(mesh.indices().len(), 36);
        assert_eq!(*mesh.indices().iter().min().unwrap(), 3);
    }

    #[test]
    fn test_center_moves_bounds_to_origin() {
        let cuboid = Primitive::cuboid(2.0, 4.0, 2.0)
            .unwrap()
            .translated(Vector3::new(3.0, 5.0, -1.0));
        let mut mesh = Mesh::merge(&[cuboid]).unwrap();
        mesh.center();

        let (min, max) = mesh.bounds().unwrap();
        assert!((min.coords + max.coords).norm() < 1e-5);
        assert!((max.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mut mesh = Mesh::merge(&[Primitive::cuboid(1.0, 1.0, 1.0).unwrap()]).unwrap();
        mesh.compute_vertex_normals();

        for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
            assert!((n.norm() - 1.0).abs() < 1e-5);
            assert!(p.coords.dot(n) > 0.0);
        }
    }

    #[test]
    fn test_cone_faces_point_outward() {
        let mut mesh = Mesh::merge(&[Primitive::cone(1.0, 2.0, 6).unwrap()]).unwrap();
        mesh.compute_vertex_normals();

        for tri in mesh.triangles() {
            let centroid = (tri.vertices[0].position.coords
                + tri.vertices[1].position.coords
                + tri.vertices[2].position.coords)
                / 3.0;
            assert!(centroid.dot(&tri.calculate_normal()) > 0.0);
        }
    }

    #[test]
    fn test_rotated_y_quarter_turn() {
        let p = Primitive::non_indexed(vec![Point3::new(1.0, 0.0, 0.0); 3])
            .unwrap()
            .rotated_y(std::f32::consts::FRAC_PI_2);
        let moved = p.positions()[0];
        assert!(moved.x.abs() < 1e-6);
        assert!((moved.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unreferenced_vertices_keep_zero_normal() {
        let soup = Primitive::non_indexed(vec![Point3::new(1.0, 2.0, 3.0); 3]).unwrap();
        let mut mesh = Mesh::merge(&[soup]).unwrap();
        mesh.compute_vertex_normals();
        assert!(mesh.normals().iter().all(|n| n.norm() == 0.0));
        assert_eq!(mesh.triangles().count(), 0);
    }
}

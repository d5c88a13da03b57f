//! CPU-side geometry, generated before GPU upload.
//!
//! Keeping the vertex/index generation free of any GPU handle lets the scene be
//! built (and tested) without a device; [`Mesh::from_geometry`](crate::Mesh::from_geometry)
//! uploads it later.

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::Vertex3d;

/// Raw geometry data before GPU upload.
#[derive(Clone, Debug)]
pub struct RawGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices, counter-clockwise front faces.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// UV sphere centered at the origin.
    ///
    /// `width_segments` divides the equator, `height_segments` divides pole to
    /// pole. The grid has `(width_segments + 1) * (height_segments + 1)`
    /// vertices so the seam carries its own UVs. Quads touching a pole collapse
    /// to a single triangle, so degenerate triangles are never emitted.
    ///
    /// Callers pass `width_segments >= 3` and `height_segments >= 2`;
    /// [`AppConfig::validate`](crate::AppConfig::validate) enforces it.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let columns = width_segments + 1;
        let mut vertices = Vec::with_capacity((columns * (height_segments + 1)) as usize);
        let mut indices = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;

                let normal = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                let position = normal * radius;

                vertices.push(Vertex3d::new(
                    position.to_array(),
                    normal.to_array(),
                    [u, v],
                ));
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let geom = RawGeometry::sphere(3.0, 64, 64);
        assert_eq!(geom.vertices.len(), 65 * 65);
        // Two triangles per quad, one per quad on each pole row.
        assert_eq!(geom.triangle_count(), 2 * 64 * 64 - 2 * 64);
        assert!(geom.indices.iter().all(|&i| (i as usize) < geom.vertices.len()));
    }

    #[test]
    fn sphere_vertices_sit_on_radius() {
        let geom = RawGeometry::sphere(3.0, 16, 8);
        for v in &geom.vertices {
            let p = Vec3::from(v.position);
            assert!((p.length() - 3.0).abs() < 1e-4);
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }

        let (min, max) = geom.bounds();
        assert!((max.y - 3.0).abs() < 1e-4);
        assert!((min.y + 3.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_triangles_face_outward() {
        let geom = RawGeometry::sphere(1.0, 12, 6);
        for tri in geom.indices.chunks_exact(3) {
            let p = |i: u32| Vec3::from(geom.vertices[i as usize].position);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                face_normal.dot(centroid) > 0.0,
                "triangle {tri:?} winds inward"
            );
        }
    }
}

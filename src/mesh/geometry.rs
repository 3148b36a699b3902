//! Geometric queries on a half-edge mesh.
//!
//! Polygons are measured through the fan triangulation anchored at their
//! first vertex (in [`HalfEdgeMesh::face_vertices`] order). This is exact for
//! planar convex faces and an estimate otherwise.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::halfedge::HalfEdgeMesh;
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};
use crate::geometry::{fan_triangles, triangle_area, triangle_normal};

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Area of a face, summed over its fan triangles.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        let p = self.face_positions(f);
        fan_triangles(p.len())
            .map(|[a, b, c]| triangle_area(&p[a], &p[b], &p[c]))
            .sum()
    }

    /// Unit normal of a face, from its first three vertices.
    ///
    /// # Errors
    /// [`MeshError::DegenerateFaceGeometry`] if those vertices are coincident
    /// or collinear.
    pub fn face_normal(&self, f: FaceId<I>) -> Result<Vector3<f64>> {
        let mut corners = self.face_vertices(f).map(|v| self.position(v));
        let normal = match (corners.next(), corners.next(), corners.next()) {
            (Some(p0), Some(p1), Some(p2)) => triangle_normal(p0, p1, p2),
            _ => None,
        };
        normal.ok_or(MeshError::DegenerateFaceGeometry { face: f.index() })
    }

    /// Area-weighted average of the normals of the faces around a vertex.
    ///
    /// Computed as `Σ nᶠ·Aᶠ / Σ Aᶠ`. The result is not renormalized, so it is
    /// shorter than unit length wherever the incident faces disagree. Faces
    /// without a defined normal carry no weight and are skipped.
    ///
    /// # Errors
    /// [`MeshError::DegenerateVertexGeometry`] if every incident face is
    /// degenerate (including a vertex with no faces at all).
    pub fn vertex_normal(&self, v: VertexId<I>) -> Result<Vector3<f64>> {
        let mut weighted = Vector3::zeros();
        let mut total_area = 0.0;

        for f in self.vertex_faces(v) {
            let Ok(normal) = self.face_normal(f) else {
                continue;
            };
            let area = self.face_area(f);
            weighted += normal * area;
            total_area += area;
        }

        // A face with a defined normal has positive area
        if total_area <= 0.0 {
            return Err(MeshError::DegenerateVertexGeometry { vertex: v.index() });
        }
        Ok(weighted / total_area)
    }

    /// Normals of every vertex, indexed by vertex id.
    ///
    /// Fails on the first vertex whose normal is undefined.
    pub fn vertex_normals(&self) -> Result<Vec<Vector3<f64>>> {
        (0..self.num_vertices())
            .into_par_iter()
            .map(|i| self.vertex_normal(VertexId::new(i)))
            .collect()
    }

    /// Average of a face's vertex positions.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let p = self.face_positions(f);
        let sum: Vector3<f64> = p.iter().map(|p| p.coords).sum();
        Point3::from(sum / p.len().max(1) as f64)
    }

    /// Length of an edge.
    pub fn edge_length(&self, he: HalfEdgeId<I>) -> f64 {
        (self.position(self.head(he)) - self.position(self.tail(he))).norm()
    }

    /// Total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// Axis-aligned bounding box, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.inf(&v.position), max.sup(&v.position))
        }))
    }
}

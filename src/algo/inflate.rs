//! Inflation and deflation along vertex normals.
//!
//! Every vertex moves by `factor * n(v)`, where `n(v)` is its area-weighted
//! normal ([`HalfEdgeMesh::vertex_normal`]). All normals are evaluated on the
//! unmodified mesh before any vertex moves.

use log::debug;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Moves every vertex along its normal by `factor`.
///
/// Positive factors expand the surface outward, negative ones contract it.
///
/// # Errors
/// - [`MeshError::InvalidParameter`] if `factor` is not finite
/// - [`MeshError::DegenerateVertexGeometry`] if some vertex normal is undefined
///
/// On error no vertex has moved.
///
/// # Example
///
/// ```
/// use hemesh::prelude::*;
/// use hemesh::algo::inflate::{deflate, inflate};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
///     Point3::new(0.5, 0.5, 1.0),
/// ];
/// let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// let before = mesh.surface_area();
/// inflate(&mut mesh, 0.1).unwrap();
/// assert!(mesh.surface_area() > before);
/// deflate(&mut mesh, 0.1).unwrap();
/// ```
pub fn inflate<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, factor: f64) -> Result<()> {
    if !factor.is_finite() {
        return Err(MeshError::invalid_param("factor", factor, "must be finite"));
    }

    let normals = mesh.vertex_normals()?;
    for (vertex, normal) in mesh.vertices.iter_mut().zip(&normals) {
        vertex.position += normal * factor;
    }

    debug!("moved {} vertices by {} along their normals", normals.len(), factor);
    Ok(())
}

/// Moves every vertex against its normal by `factor`. Same as `inflate(mesh, -factor)`.
pub fn deflate<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, factor: f64) -> Result<()> {
    inflate(mesh, -factor)
}

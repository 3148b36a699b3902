//! Topology-changing operators: hole filling, truncation and subdivision.
//!
//! These are part of the editing interface but have no defined behavior yet.
//! Each reports [`MeshError::Unsupported`] and leaves the mesh untouched.

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Subdivision schemes accepted by [`subdivide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionScheme {
    /// Split faces without moving existing vertices.
    Linear,
    /// Loop subdivision for triangle meshes.
    Loop,
}

/// Close every boundary loop with new faces.
pub fn fill_holes<I: MeshIndex>(_mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    Err(MeshError::Unsupported { operation: "hole filling" })
}

/// Cut every vertex corner off the mesh.
pub fn truncate<I: MeshIndex>(_mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    Err(MeshError::Unsupported { operation: "truncation" })
}

/// Refine the mesh with the given scheme.
pub fn subdivide<I: MeshIndex>(_mesh: &mut HalfEdgeMesh<I>, scheme: SubdivisionScheme) -> Result<()> {
    let operation = match scheme {
        SubdivisionScheme::Linear => "linear subdivision",
        SubdivisionScheme::Loop => "loop subdivision",
    };
    Err(MeshError::Unsupported { operation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::Point3;

    #[test]
    fn test_operators_report_unsupported() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();

        assert!(matches!(fill_holes(&mut mesh), Err(MeshError::Unsupported { .. })));
        assert!(matches!(truncate(&mut mesh), Err(MeshError::Unsupported { .. })));
        assert_eq!(
            subdivide(&mut mesh, SubdivisionScheme::Loop).unwrap_err().to_string(),
            "loop subdivision is not supported"
        );
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.is_valid());
    }
}

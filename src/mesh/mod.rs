//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation and the queries
//! built on it.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which represents a polygon mesh using
//! a half-edge (doubly-connected edge list) data structure. Vertex, half-edge
//! and face records live in arenas owned by the mesh and refer to each other
//! through typed indices ([`VertexId`], [`HalfEdgeId`], [`FaceId`]).
//!
//! # Construction
//!
//! Meshes are built from the consistently oriented face lists produced by a
//! mesh loader:
//!
//! ```
//! use hemesh::mesh::{HalfEdgeMesh, build_from_polygons_uncolored};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_polygons_uncolored(&vertices, &faces).unwrap();
//! assert_eq!(mesh.boundary_loops().len(), 1);
//! ```

mod builder;
mod geometry;
mod halfedge;
mod index;
mod topology;

pub use builder::{
    build_from_polygons, build_from_polygons_uncolored, build_from_triangles, edge_indices,
    to_polygons, triangle_indices,
};
pub use halfedge::{
    Color, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter,
    DEFAULT_COLOR,
};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

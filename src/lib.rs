//! # hemesh
//!
//! An in-memory polygon mesh built on the half-edge data structure, for
//! interactive mesh editing tools that need fast local adjacency queries.
//!
//! ## Features
//!
//! - **Half-edge data structure**: arbitrary polygons, O(1) adjacency, typed indices
//! - **Open meshes**: boundary half-edges are synthesized and linked into loops
//! - **Geometry**: face areas and normals, area-weighted vertex normals
//! - **Topology**: boundary loops, Euler characteristic, genus
//! - **Operators**: inflate/deflate, Laplacian smoothing and sharpening
//!
//! Parsing mesh files and orienting faces is left to the caller's loader,
//! which hands over positions, colours and counter-clockwise face lists.
//!
//! ## Quick Start
//!
//! ```
//! use hemesh::prelude::*;
//! use nalgebra::Point3;
//!
//! // A square pyramid without its base
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert_eq!(mesh.boundary_loops().len(), 1);
//! assert_eq!(mesh.genus(), None);
//!
//! let apex = VertexId::new(4);
//! assert_eq!(mesh.vertex_neighbors(apex).count(), 4);
//! assert_eq!(mesh.vertex_faces(apex).count(), 4);
//! let normal = mesh.vertex_normal(apex).unwrap();
//! assert!(normal.z > 0.0);
//! ```
//!
//! ## Editing
//!
//! ```
//! use hemesh::prelude::*;
//! use hemesh::algo::{inflate, laplacian_smooth, LaplacianOptions};
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! #     Point3::new(0.5, 0.5, 1.0),
//! # ];
//! # let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! inflate(&mut mesh, 0.05).unwrap();
//! laplacian_smooth(&mut mesh, &LaplacianOptions::default().with_factor(0.5)).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use hemesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_polygons_uncolored, build_from_triangles, edge_indices,
        to_polygons, triangle_indices, Color, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh,
        MeshIndex, Vertex, VertexId, DEFAULT_COLOR,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

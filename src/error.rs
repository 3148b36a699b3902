//! Error types for hemesh.
//!
//! Construction errors reject the whole input. Query and operator errors are
//! reported to the caller and leave the mesh untouched.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh construction, queries and operators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The input has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// The colour array is not parallel to the position array.
    #[error("{colors} colors supplied for {positions} vertex positions")]
    AttributeMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of colours.
        colors: usize,
    },

    /// A face lists fewer than three vertices.
    #[error("face {face} has {len} vertices, at least 3 are required")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// Number of indices in the face.
        len: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face visits the same vertex twice.
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The same directed edge appears in two faces and has no reverse copy.
    #[error("edge {tail} -> {head} is used by more than one face in the same direction")]
    DuplicateEdge {
        /// Tail vertex of the edge.
        tail: usize,
        /// Head vertex of the edge.
        head: usize,
    },

    /// A vertex lies on more than one boundary loop.
    #[error("vertex {vertex} is shared by more than one boundary loop")]
    NonManifoldVertex {
        /// The offending vertex.
        vertex: usize,
    },

    /// The mesh has non-manifold topology.
    #[error("mesh has non-manifold topology: {details}")]
    NonManifold {
        /// Description of the non-manifold condition.
        details: String,
    },

    /// The input has more elements than the index type can address.
    #[error("{count} {elements} exceed the index type limit of {max}")]
    CapacityExceeded {
        /// Kind of element that overflowed.
        elements: &'static str,
        /// Number of elements required.
        count: usize,
        /// Largest count the index type can hold.
        max: usize,
    },

    /// The face normal is undefined (coincident or collinear vertices).
    #[error("face {face} has degenerate geometry, its normal is undefined")]
    DegenerateFaceGeometry {
        /// The face index.
        face: usize,
    },

    /// The vertex has no incident face area to weight a normal with.
    #[error("vertex {vertex} has degenerate geometry, no incident face area")]
    DegenerateVertexGeometry {
        /// The vertex index.
        vertex: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The operator exists on the interface but has no implementation.
    #[error("{operation} is not supported")]
    Unsupported {
        /// Name of the operator.
        operation: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

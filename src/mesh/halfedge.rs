//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! for polygon meshes. Faces may have any number of corners.
//!
//! # Structure
//!
//! - Each undirected edge is split into two **half-edges** pointing in opposite
//!   directions
//! - Each half-edge knows its **head** (the vertex it points to), its **pair**
//!   (opposite half-edge), **next** and **prev** around its face, and the
//!   **face** on its left
//! - Each vertex stores one outgoing half-edge
//! - Each face stores one anchor half-edge on its boundary
//!
//! All cross-references are indices into the arenas owned by [`HalfEdgeMesh`].
//!
//! # Boundary Handling
//!
//! Boundary half-edges have a null face. They are paired with the interior
//! half-edge of an open edge and linked into loops through `next`/`prev`, so
//! vertex walks pass over the boundary without special cases.

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// Per-vertex RGB colour attribute.
pub type Color = Vector3<f32>;

/// Colour assigned to vertices when the loader supplies none.
pub const DEFAULT_COLOR: Color = Vector3::new(1.0, 1.0, 1.0);

/// A vertex in the half-edge mesh.
///
/// The vertex id is its position in the mesh's vertex arena.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Colour attribute carried through from the loader.
    pub color: Color,

    /// One outgoing half-edge from this vertex, used as a traversal seed.
    /// Null for a vertex no face refers to.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex with no outgoing half-edge.
    pub fn new(position: Point3<f64>, color: Color) -> Self {
        Self {
            position,
            color,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A directed half-edge.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to.
    pub head: VertexId<I>,

    /// The face to the left of this half-edge. Null on the boundary.
    pub face: FaceId<I>,

    /// The opposite half-edge of the same undirected edge.
    pub pair: HalfEdgeId<I>,

    /// The next half-edge around the face or boundary loop (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face or boundary loop.
    pub prev: HalfEdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create an unlinked half-edge pointing at `head`.
    pub fn new(head: VertexId<I>, face: FaceId<I>) -> Self {
        Self {
            head,
            face,
            pair: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

/// A polygonal face, identified by one anchor half-edge on its boundary.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// Anchor half-edge. The face's vertex sequence starts at its head.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face anchored at the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh of arbitrary polygons.
///
/// The mesh exclusively owns its vertex, half-edge and face arenas. Elements
/// are never removed, so indices stay valid for the lifetime of the mesh.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_halfedges: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges, boundary half-edges included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    /// Get the colour of a vertex.
    #[inline]
    pub fn color(&self, v: VertexId<I>) -> &Color {
        &self.vertex(v).color
    }

    /// Set the colour of a vertex.
    #[inline]
    pub fn set_color(&mut self, v: VertexId<I>, color: Color) {
        self.vertex_mut(v).color = color;
    }

    // ==================== Topology Queries ====================

    /// The vertex a half-edge points to.
    #[inline]
    pub fn head(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).head
    }

    /// The vertex a half-edge leaves from.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.head(self.pair(he))
    }

    /// Get the pair (opposite) half-edge.
    #[inline]
    pub fn pair(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).pair
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the face of a half-edge (null on the boundary).
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if an edge (represented by one of its half-edges) is on the boundary.
    #[inline]
    pub fn is_boundary_edge(&self, he: HalfEdgeId<I>) -> bool {
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(self.pair(he))
    }

    /// Check if a vertex is on the boundary. Isolated vertices count as boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        if !self.vertex(v).halfedge.is_valid() {
            return true;
        }
        self.vertex_halfedges(v)
            .any(|he| self.is_boundary_halfedge(he))
    }

    /// Number of edges incident to a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    /// Number of corners of a face.
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// Iterate over the outgoing half-edges of a vertex.
    ///
    /// Starting from the vertex's seed half-edge `h`, the walk repeatedly steps
    /// to `h.pair.next`, yielding each half-edge it lands on. The seed itself
    /// is yielded last, when the walk closes.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over vertices joined to a vertex by an edge.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.head(he))
    }

    /// Iterate over faces incident to a vertex. Boundary half-edges contribute nothing.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v)
            .filter_map(|he| self.face_of(he).valid())
    }

    /// Iterate over the half-edges of a face, starting at its anchor.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face in counter-clockwise order.
    ///
    /// The sequence is the heads of `[anchor, anchor.next, ...]`, so it starts
    /// at the anchor's head rather than its tail.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.head(he))
    }

    /// Positions of a face's vertices, in [`face_vertices`](Self::face_vertices) order.
    pub fn face_positions(&self, f: FaceId<I>) -> Vec<Point3<f64>> {
        self.face_vertices(f).map(|v| *self.position(v)).collect()
    }

    // ==================== Construction ====================

    /// Add a new unconnected vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>, color: Color) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position, color));
        id
    }

    pub(crate) fn add_halfedge(&mut self, halfedge: HalfEdge<I>) -> HalfEdgeId<I> {
        let id = HalfEdgeId::new(self.halfedges.len());
        self.halfedges.push(halfedge);
        id
    }

    pub(crate) fn add_face(&mut self) -> FaceId<I> {
        let id = FaceId::new(self.faces.len());
        self.faces.push(Face::new(HalfEdgeId::invalid()));
        id
    }

    // ==================== Validation ====================

    /// Check that every connectivity invariant holds.
    ///
    /// For every half-edge `h`: `h.pair.pair == h`, `h.pair.head != h.head`,
    /// `h.next.prev == h` and `h.prev.next == h`. Every face cycle closes, has
    /// at least three half-edges, and all of them reference the face. Every
    /// vertex seed leaves from its vertex.
    pub fn is_valid(&self) -> bool {
        let valid_he = |he: HalfEdgeId<I>| he.is_valid() && he.index() < self.halfedges.len();

        for (heid, he) in self.halfedges() {
            if !valid_he(he.pair) || !valid_he(he.next) || !valid_he(he.prev) {
                return false;
            }
            let pair = self.halfedge(he.pair);
            if pair.pair != heid || pair.head == he.head {
                return false;
            }
            if self.halfedge(he.next).prev != heid || self.halfedge(he.prev).next != heid {
                return false;
            }
            if self.halfedge(he.next).face != he.face {
                return false;
            }
        }

        for (fid, f) in self.faces() {
            if !valid_he(f.halfedge) {
                return false;
            }
            let mut degree = 0;
            let mut he = f.halfedge;
            loop {
                if self.face_of(he) != fid {
                    return false;
                }
                degree += 1;
                he = self.next(he);
                if he == f.halfedge {
                    break;
                }
                if degree > self.halfedges.len() {
                    return false;
                }
            }
            if degree < 3 {
                return false;
            }
        }

        for (vid, v) in self.vertices() {
            if v.halfedge.is_valid() && (!valid_he(v.halfedge) || self.tail(v.halfedge) != vid) {
                return false;
            }
        }

        true
    }
}

/// Iterator over the outgoing half-edges of a vertex.
///
/// Bounded by the half-edge count, so a corrupted umbrella cannot loop forever.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            remaining: if start.is_valid() { mesh.num_halfedges() } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // If h leaves v, h.pair arrives at v and h.pair.next leaves v again.
        let pair = self.mesh.pair(self.current);
        let next = if pair.is_valid() {
            self.mesh.next(pair)
        } else {
            HalfEdgeId::invalid()
        };
        if !next.is_valid() {
            self.remaining = 0;
            return None;
        }

        self.current = next;
        self.remaining = if next == self.start { 0 } else { self.remaining - 1 };
        Some(next)
    }
}

/// Iterator over the half-edges bounding a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    remaining: usize,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            remaining: if start.is_valid() { mesh.num_halfedges() } else { 0 },
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.current.is_valid() {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);
        self.remaining = if self.current == self.start { 0 } else { self.remaining - 1 };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::new(Point3::new(1.0, 2.0, 3.0), DEFAULT_COLOR);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(!v.halfedge.is_valid());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_isolated_vertex_walks_are_empty() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let v = mesh.add_vertex(Point3::origin(), DEFAULT_COLOR);

        assert_eq!(mesh.vertex_neighbors(v).count(), 0);
        assert_eq!(mesh.vertex_faces(v).count(), 0);
        assert!(mesh.is_boundary_vertex(v));
    }

    #[test]
    fn test_unpaired_halfedge_is_invalid() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let a = mesh.add_vertex(Point3::origin(), DEFAULT_COLOR);
        mesh.add_halfedge(HalfEdge::new(a, FaceId::invalid()));
        assert!(!mesh.is_valid());
    }
}

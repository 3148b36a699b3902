//! Mesh construction utilities.
//!
//! This module turns the face-vertex lists handed over by a mesh loader into
//! a linked half-edge mesh, and exports the mesh back into flat index lists.
//!
//! Faces must already be consistently oriented (counter-clockwise seen from
//! outside). Orientation is not re-checked here.

use std::collections::HashMap;

use log::{debug, warn};
use nalgebra::Point3;

use super::halfedge::{Color, HalfEdge, HalfEdgeMesh, DEFAULT_COLOR};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};
use crate::geometry::fan_triangles;

/// Build a half-edge mesh from vertex attributes and polygonal faces.
///
/// # Arguments
/// * `positions` - Vertex positions
/// * `colors` - Vertex colours, parallel to `positions`
/// * `faces` - Faces as counter-clockwise lists of at least 3 vertex indices
///
/// # Construction
///
/// 1. One vertex per position/colour pair, ids in input order.
/// 2. One half-edge per consecutive `(tail, head)` pair of every face. The tail
///    vertex's seed becomes the last half-edge created leaving it, and the face
///    anchor the last half-edge created for the face.
/// 3. Half-edges of each face are linked into a `next`/`prev` ring.
/// 4. `(tail, head)` is paired with `(head, tail)`. Edges without a reverse get a
///    synthesized boundary half-edge with a null face.
/// 5. Boundary half-edges are linked into loops.
///
/// Duplicate directed edges are not corrected: the later one wins the
/// directed-edge lookup and a warning is logged.
///
/// # Errors
/// Malformed input ([`MeshError::EmptyMesh`], [`MeshError::AttributeMismatch`],
/// [`MeshError::FaceTooSmall`], [`MeshError::InvalidVertexIndex`],
/// [`MeshError::DegenerateFace`]), more elements than `I` can index
/// ([`MeshError::CapacityExceeded`]), an unpaired directed edge used by two
/// faces ([`MeshError::DuplicateEdge`]) and a vertex shared by two boundary
/// loops ([`MeshError::NonManifoldVertex`]) reject the whole input.
///
/// # Example
/// ```
/// use hemesh::mesh::{build_from_polygons, HalfEdgeMesh, DEFAULT_COLOR};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let colors = vec![DEFAULT_COLOR; 4];
/// let faces = vec![vec![0, 1, 2, 3]];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&positions, &colors, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_halfedges(), 8);
/// ```
pub fn build_from_polygons<I, F>(
    positions: &[Point3<f64>],
    colors: &[Color],
    faces: &[F],
) -> Result<HalfEdgeMesh<I>>
where
    I: MeshIndex,
    F: AsRef<[usize]>,
{
    validate_input::<I, F>(positions, colors, faces)?;

    let num_corners: usize = faces.iter().map(|f| f.as_ref().len()).sum();
    check_capacity::<I>("half-edges", num_corners)?;
    let mut mesh = HalfEdgeMesh::with_capacity(positions.len(), num_corners * 2, faces.len());

    let vertex_ids: Vec<VertexId<I>> = positions
        .iter()
        .zip(colors)
        .map(|(&pos, &color)| mesh.add_vertex(pos, color))
        .collect();

    // Directed (tail, head) of every face half-edge, indexed like the half-edges
    let mut directed: Vec<(usize, usize)> = Vec::with_capacity(num_corners);
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(num_corners);

    for face in faces {
        let face = face.as_ref();
        let face_id = mesh.add_face();

        let ring: Vec<HalfEdgeId<I>> = (0..face.len())
            .map(|k| {
                let tail = face[k];
                let head = face[(k + 1) % face.len()];
                let he = mesh.add_halfedge(HalfEdge::new(vertex_ids[head], face_id));

                if edge_map.insert((tail, head), he).is_some() {
                    warn!(
                        "directed edge ({}, {}) appears more than once; input is non-manifold or inconsistently wound",
                        tail, head
                    );
                }
                directed.push((tail, head));
                mesh.vertex_mut(vertex_ids[tail]).halfedge = he;
                he
            })
            .collect();

        link_ring(&mut mesh, &ring);
        mesh.faces[face_id.index()].halfedge = ring[ring.len() - 1];
    }

    let boundary = pair_halfedges(&mut mesh, &vertex_ids, &directed, &edge_map)?;
    link_boundary_loops(&mut mesh, &boundary)?;

    debug!(
        "built half-edge mesh: {} vertices, {} faces, {} half-edges ({} boundary)",
        mesh.num_vertices(),
        mesh.num_faces(),
        mesh.num_halfedges(),
        boundary.len()
    );

    Ok(mesh)
}

/// Build a mesh whose vertices all carry [`DEFAULT_COLOR`].
pub fn build_from_polygons_uncolored<I, F>(
    positions: &[Point3<f64>],
    faces: &[F],
) -> Result<HalfEdgeMesh<I>>
where
    I: MeshIndex,
    F: AsRef<[usize]>,
{
    let colors = vec![DEFAULT_COLOR; positions.len()];
    build_from_polygons(positions, &colors, faces)
}

/// Build an uncoloured mesh from triangle faces.
///
/// ```
/// use hemesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.num_halfedges(), 6);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    positions: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons_uncolored(positions, faces)
}

fn validate_input<I: MeshIndex, F: AsRef<[usize]>>(
    positions: &[Point3<f64>],
    colors: &[Color],
    faces: &[F],
) -> Result<()> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    if positions.len() != colors.len() {
        return Err(MeshError::AttributeMismatch {
            positions: positions.len(),
            colors: colors.len(),
        });
    }
    check_capacity::<I>("vertices", positions.len())?;
    check_capacity::<I>("faces", faces.len())?;

    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(MeshError::FaceTooSmall { face: fi, len: face.len() });
        }
        if let Some(&vi) = face.iter().find(|&&vi| vi >= positions.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if face
            .iter()
            .enumerate()
            .any(|(k, vi)| face[k + 1..].contains(vi))
        {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    Ok(())
}

/// Every id below `I::INVALID` is usable, so `count` may not exceed it.
fn check_capacity<I: MeshIndex>(elements: &'static str, count: usize) -> Result<()> {
    let max = I::INVALID.to_usize();
    if count > max {
        return Err(MeshError::CapacityExceeded { elements, count, max });
    }
    Ok(())
}

/// Close a list of half-edges into a `next`/`prev` ring, in list order.
fn link_ring<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, ring: &[HalfEdgeId<I>]) {
    for (k, &he) in ring.iter().enumerate() {
        let next = ring[(k + 1) % ring.len()];
        mesh.halfedge_mut(he).next = next;
        mesh.halfedge_mut(next).prev = he;
    }
}

/// Pair every face half-edge with its reverse, synthesizing boundary
/// half-edges where none exists. Returns the boundary half-edges keyed by
/// tail vertex.
fn pair_halfedges<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    vertex_ids: &[VertexId<I>],
    directed: &[(usize, usize)],
    edge_map: &HashMap<(usize, usize), HalfEdgeId<I>>,
) -> Result<HashMap<usize, HalfEdgeId<I>>> {
    let unpaired = directed
        .iter()
        .filter(|&&(tail, head)| !edge_map.contains_key(&(head, tail)))
        .count();
    check_capacity::<I>("half-edges", directed.len() + unpaired)?;

    let mut boundary: HashMap<usize, HalfEdgeId<I>> = HashMap::with_capacity(unpaired);

    for (i, &(tail, head)) in directed.iter().enumerate() {
        let he = HalfEdgeId::<I>::new(i);
        if let Some(&pair) = edge_map.get(&(head, tail)) {
            mesh.halfedge_mut(he).pair = pair;
            continue;
        }

        let bhe = mesh.add_halfedge(HalfEdge::new(vertex_ids[tail], FaceId::invalid()));
        mesh.halfedge_mut(bhe).pair = he;
        mesh.halfedge_mut(he).pair = bhe;

        // The boundary half-edge leaves `head`; a second one leaving the same
        // vertex means either the same directed edge was used twice or two
        // boundary loops meet there.
        if let Some(earlier) = boundary.insert(head, bhe) {
            let (earlier_tail, _) = directed[mesh.pair(earlier).index()];
            if earlier_tail == tail {
                return Err(MeshError::DuplicateEdge { tail, head });
            }
            return Err(MeshError::NonManifoldVertex { vertex: head });
        }
    }

    Ok(boundary)
}

/// Link boundary half-edges into loops: each one continues with the boundary
/// half-edge leaving its head.
fn link_boundary_loops<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    boundary: &HashMap<usize, HalfEdgeId<I>>,
) -> Result<()> {
    let mut worklist: Vec<HalfEdgeId<I>> = boundary.values().copied().collect();
    worklist.sort();

    for he in worklist {
        if mesh.next(he).is_valid() {
            continue;
        }
        let head = mesh.head(he);
        let next = *boundary.get(&head.index()).ok_or_else(|| MeshError::NonManifold {
            details: format!("boundary half-edge {:?} has no continuation at {:?}", he, head),
        })?;
        mesh.halfedge_mut(he).next = next;
        mesh.halfedge_mut(next).prev = he;
    }

    Ok(())
}

/// Convert a half-edge mesh back to loader form.
///
/// Returns `(positions, colors, faces)`. Each face lists its vertices in
/// [`HalfEdgeMesh::face_vertices`] order, which for a freshly built mesh is the
/// input order.
pub fn to_polygons<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
) -> (Vec<Point3<f64>>, Vec<Color>, Vec<Vec<usize>>) {
    let positions = mesh.vertices().map(|(_, v)| v.position).collect();
    let colors = mesh.vertices().map(|(_, v)| v.color).collect();
    let faces = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();

    (positions, colors, faces)
}

/// Fan-triangulate every face into vertex-index triples.
///
/// Each face contributes `(v0, v(i+1), v(i+2))` in face order, the same
/// triangles [`HalfEdgeMesh::face_area`] sums over.
pub fn triangle_indices<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(mesh.num_faces() * 2);
    for f in mesh.face_ids() {
        let corners: Vec<usize> = mesh.face_vertices(f).map(|v| v.index()).collect();
        triangles.extend(
            fan_triangles(corners.len()).map(|[a, b, c]| [corners[a], corners[b], corners[c]]),
        );
    }
    triangles
}

/// `(tail, head)` vertex indices of every half-edge, boundary half-edges included.
pub fn edge_indices<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<[usize; 2]> {
    mesh.halfedge_ids()
        .map(|he| [mesh.tail(he).index(), mesh.head(he).index()])
        .collect()
}

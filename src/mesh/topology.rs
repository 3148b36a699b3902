//! Topological analysis: boundary loops, Euler characteristic and genus.

use log::trace;

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex};

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Extract the boundary loops of the mesh.
    ///
    /// Half-edges are scanned in index order. Each unvisited boundary half-edge
    /// starts a new loop, which follows `next` until it closes. The visited set
    /// is local to the call, so the mesh is only borrowed immutably and
    /// repeated calls return the same loops. A watertight mesh has none.
    pub fn boundary_loops(&self) -> Vec<Vec<HalfEdgeId<I>>> {
        let mut visited = vec![false; self.num_halfedges()];
        let mut loops = Vec::new();

        for start in self.halfedge_ids() {
            if visited[start.index()] || !self.is_boundary_halfedge(start) {
                continue;
            }

            let mut cycle = Vec::new();
            let mut he = start;
            while he.is_valid() && !visited[he.index()] {
                visited[he.index()] = true;
                cycle.push(he);
                he = self.next(he);
            }

            trace!("boundary loop of {} half-edges starting at {:?}", cycle.len(), start);
            loops.push(cycle);
        }

        loops
    }

    /// Check if the mesh has no boundary half-edges.
    pub fn is_watertight(&self) -> bool {
        !self.halfedges().any(|(_, he)| he.is_boundary())
    }

    /// Euler characteristic `V - E + F`, with `E` the number of undirected edges.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    /// Genus of a closed mesh, `(2 - χ) / 2`.
    ///
    /// Returns `None` when the mesh has boundary loops, since genus is only
    /// defined here for watertight surfaces. A closed mesh made of several
    /// connected components yields a meaningless value; this is not detected.
    pub fn genus(&self) -> Option<i64> {
        if !self.boundary_loops().is_empty() {
            return None;
        }
        Some((2 - self.euler_characteristic()) / 2)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::mesh::{build_from_polygons_uncolored, build_from_triangles};

    /// A 3x3 grid of unit quads with the center quad removed.
    fn square_annulus() -> HalfEdgeMesh {
        let mut vertices = Vec::new();
        for j in 0..4 {
            for i in 0..4 {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let mut faces = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                if (i, j) == (1, 1) {
                    continue;
                }
                let v = j * 4 + i;
                faces.push([v, v + 1, v + 5, v + 4]);
            }
        }
        build_from_polygons_uncolored(&vertices, &faces).unwrap()
    }

    /// A torus made of a 4x4 grid of quads with wrapped indices.
    fn quad_torus() -> HalfEdgeMesh {
        let (n, m) = (4, 4);
        let mut vertices = Vec::new();
        for i in 0..n {
            let u = i as f64 / n as f64 * std::f64::consts::TAU;
            for j in 0..m {
                let w = j as f64 / m as f64 * std::f64::consts::TAU;
                let r = 2.0 + w.cos();
                vertices.push(Point3::new(r * u.cos(), r * u.sin(), w.sin()));
            }
        }
        let idx = |i: usize, j: usize| (i % n) * m + (j % m);
        let mut faces = Vec::new();
        for i in 0..n {
            for j in 0..m {
                faces.push([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]);
            }
        }
        build_from_polygons_uncolored(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_single_triangle_boundary() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();

        let loops = mesh.boundary_loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert!(loops[0].iter().all(|&he| mesh.is_boundary_halfedge(he)));
        assert!(!mesh.is_watertight());
        assert_eq!(mesh.genus(), None);
    }

    #[test]
    fn test_boundary_loop_is_connected() {
        let mesh = square_annulus();
        for cycle in mesh.boundary_loops() {
            for (k, &he) in cycle.iter().enumerate() {
                let next = cycle[(k + 1) % cycle.len()];
                assert_eq!(mesh.next(he), next);
                assert_eq!(mesh.head(he), mesh.tail(next));
            }
        }
    }

    #[test]
    fn test_annulus_has_two_loops() {
        let mesh = square_annulus();
        assert!(mesh.is_valid());

        let mut lengths: Vec<usize> = mesh.boundary_loops().iter().map(Vec::len).collect();
        lengths.sort();
        assert_eq!(lengths, vec![4, 12]);
        assert_eq!(mesh.genus(), None);
        // 16 - 24 + 8
        assert_eq!(mesh.euler_characteristic(), 0);
    }

    #[test]
    fn test_boundary_loops_repeatable() {
        let mesh = square_annulus();
        assert_eq!(mesh.boundary_loops(), mesh.boundary_loops());
    }

    #[test]
    fn test_torus_genus() {
        let mesh = quad_torus();
        assert!(mesh.is_valid());
        assert!(mesh.is_watertight());
        assert!(mesh.boundary_loops().is_empty());
        assert_eq!(mesh.euler_characteristic(), 0);
        assert_eq!(mesh.genus(), Some(1));
    }
}

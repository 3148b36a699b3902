//! Uniform Laplacian smoothing and sharpening.
//!
//! Each vertex is moved along the mean displacement to its neighbors:
//!
//! ```text
//! p' = p + sign * factor * (1/|N(p)|) * Σ (q - p),  q ∈ N(p)
//! ```
//!
//! with `sign = +1` to smooth and `-1` to sharpen. All new positions of an
//! iteration are computed from the positions at the start of that iteration
//! and committed together, so the result does not depend on vertex order.
//!
//! # Example
//!
//! ```
//! use hemesh::prelude::*;
//! use hemesh::algo::smooth::{laplacian_smooth, LaplacianOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 0.5),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! laplacian_smooth(&mut mesh, &LaplacianOptions::default()).unwrap();
//! ```

use log::debug;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

/// Direction of a Laplacian update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaplacianMode {
    /// Move vertices toward the centroid of their neighbors.
    Smooth,
    /// Move vertices away from the centroid of their neighbors.
    Sharpen,
}

impl LaplacianMode {
    /// `+1` for smoothing, `-1` for sharpening.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            LaplacianMode::Smooth => 1.0,
            LaplacianMode::Sharpen => -1.0,
        }
    }
}

/// Options for Laplacian smoothing and sharpening.
#[derive(Debug, Clone)]
pub struct LaplacianOptions {
    /// Number of iterations.
    pub iterations: usize,

    /// Non-negative step size. `1.0` moves a smoothed vertex all the way to
    /// the centroid of its neighbors; `0.0` leaves the mesh unchanged.
    pub factor: f64,

    /// Whether to keep boundary vertices fixed.
    pub preserve_boundary: bool,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for LaplacianOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            factor: 1.0,
            preserve_boundary: false,
            parallel: true,
        }
    }
}

impl LaplacianOptions {
    /// Set the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the step size.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Keep boundary vertices fixed.
    pub fn preserving_boundary(mut self) -> Self {
        self.preserve_boundary = true;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Laplacian smoothing. See [`laplacian`].
pub fn laplacian_smooth<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    options: &LaplacianOptions,
) -> Result<()> {
    laplacian(mesh, LaplacianMode::Smooth, options)
}

/// Laplacian sharpening. See [`laplacian`].
pub fn laplacian_sharpen<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    options: &LaplacianOptions,
) -> Result<()> {
    laplacian(mesh, LaplacianMode::Sharpen, options)
}

/// Applies a uniform Laplacian update to every vertex.
///
/// Vertices without neighbors stay where they are.
///
/// # Errors
/// [`MeshError::InvalidParameter`] if `factor` is negative or not finite. The
/// mesh is not modified in that case.
pub fn laplacian<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    mode: LaplacianMode,
    options: &LaplacianOptions,
) -> Result<()> {
    if !options.factor.is_finite() || options.factor < 0.0 {
        return Err(MeshError::invalid_param(
            "factor",
            options.factor,
            "must be finite and non-negative",
        ));
    }
    if options.iterations == 0 || options.factor == 0.0 {
        return Ok(());
    }

    let fixed: Vec<bool> = if options.preserve_boundary {
        mesh.vertex_ids().map(|v| mesh.is_boundary_vertex(v)).collect()
    } else {
        vec![false; mesh.num_vertices()]
    };
    let weight = mode.sign() * options.factor;

    for _ in 0..options.iterations {
        let new_positions = laplacian_positions(mesh, &fixed, weight, options.parallel);
        for (vertex, pos) in mesh.vertices.iter_mut().zip(new_positions) {
            vertex.position = pos;
        }
    }

    debug!(
        "laplacian {:?}: {} iteration(s), factor {}, {} vertices",
        mode,
        options.iterations,
        options.factor,
        mesh.num_vertices()
    );

    Ok(())
}

/// New positions of every vertex, all computed from the current positions.
fn laplacian_positions<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    fixed: &[bool],
    weight: f64,
    parallel: bool,
) -> Vec<Point3<f64>> {
    let step = |i: usize| {
        let vid = VertexId::new(i);
        if fixed[i] {
            *mesh.position(vid)
        } else {
            laplacian_position(mesh, vid, weight)
        }
    };

    if parallel {
        (0..mesh.num_vertices()).into_par_iter().map(step).collect()
    } else {
        (0..mesh.num_vertices()).map(step).collect()
    }
}

/// `p + weight * mean(q - p)` over the neighbors `q` of `v`.
fn laplacian_position<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>, weight: f64) -> Point3<f64> {
    let p = mesh.position(v);
    let (sum, count) = mesh
        .vertex_neighbors(v)
        .fold((Vector3::zeros(), 0usize), |(sum, count), n| {
            (sum + (mesh.position(n) - p), count + 1)
        });

    if count == 0 {
        return *p;
    }
    p + sum * (weight / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use approx::assert_relative_eq;

    /// Flat triangulated grid of `n x n` cells with spacing 1, all diagonals
    /// running the same way so interior vertices have valence 6.
    fn grid(n: usize) -> HalfEdgeMesh {
        let mut vertices = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let mut faces = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;
                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }
        build_from_triangles(&vertices, &faces).unwrap()
    }

    fn positions(mesh: &HalfEdgeMesh) -> Vec<Point3<f64>> {
        mesh.vertex_ids().map(|v| *mesh.position(v)).collect()
    }

    #[test]
    fn test_zero_factor_is_noop() {
        let mut mesh = grid(3);
        let before = positions(&mesh);

        let options = LaplacianOptions::default().with_factor(0.0);
        laplacian_smooth(&mut mesh, &options).unwrap();
        laplacian_sharpen(&mut mesh, &options).unwrap();

        assert_eq!(positions(&mesh), before);
    }

    #[test]
    fn test_negative_factor_rejected() {
        let mut mesh = grid(2);
        let before = positions(&mesh);

        let options = LaplacianOptions::default().with_factor(-0.5);
        assert!(matches!(
            laplacian_smooth(&mut mesh, &options),
            Err(MeshError::InvalidParameter { name: "factor", .. })
        ));
        assert_eq!(positions(&mesh), before);
    }

    #[test]
    fn test_smooth_moves_to_neighbor_centroid() {
        // Single triangle: each vertex goes to the midpoint of the other two
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();

        laplacian_smooth(&mut mesh, &LaplacianOptions::default()).unwrap();

        assert_relative_eq!(*mesh.position(VertexId::new(0)), Point3::new(1.5, 1.5, 0.0));
        assert_relative_eq!(*mesh.position(VertexId::new(1)), Point3::new(0.0, 1.5, 0.0));
        assert_relative_eq!(*mesh.position(VertexId::new(2)), Point3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_update_is_simultaneous() {
        // A sequential in-place update would see vertex 0 already moved when
        // computing vertex 1; a simultaneous update is symmetric instead.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ];
        let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();

        let options = LaplacianOptions::default().with_factor(0.5).sequential();
        laplacian_smooth(&mut mesh, &options).unwrap();

        let p0 = mesh.position(VertexId::new(0));
        let p1 = mesh.position(VertexId::new(1));
        assert_relative_eq!(p0.x + p1.x, 2.0);
        assert_relative_eq!(p0.y, p1.y);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut a = grid(4);
        a.set_position(VertexId::new(12), Point3::new(2.3, 1.9, 0.7));
        let mut b = a.clone();

        let options = LaplacianOptions::default().with_factor(0.3).with_iterations(3);
        laplacian_smooth(&mut a, &options.clone().with_parallel(true)).unwrap();
        laplacian_smooth(&mut b, &options.sequential()).unwrap();

        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_smooth_then_sharpen_roundtrip() {
        let mut mesh = grid(6);
        let center = VertexId::new(3 * 7 + 3);
        let bump = 0.1;
        let mut p = *mesh.position(center);
        p.z = bump;
        mesh.set_position(center, p);
        let before = positions(&mesh);

        let options = LaplacianOptions::default().with_factor(0.1);
        laplacian_smooth(&mut mesh, &options).unwrap();
        assert!(mesh.position(center).z < bump - 0.005);

        laplacian_sharpen(&mut mesh, &options).unwrap();

        // (I - λL)(I + λL) = I - λ²L², so heights come back to within λ²
        for (v, orig) in mesh.vertex_ids().zip(&before) {
            assert!((mesh.position(v).z - orig.z).abs() < 0.002);
        }
    }

    #[test]
    fn test_preserve_boundary() {
        let mut mesh = grid(3);
        let interior = VertexId::new(5);
        mesh.set_position(interior, Point3::new(1.0, 1.0, 1.0));
        let before = positions(&mesh);

        let options = LaplacianOptions::default().preserving_boundary();
        laplacian_smooth(&mut mesh, &options).unwrap();

        for v in mesh.vertex_ids() {
            if mesh.is_boundary_vertex(v) {
                assert_eq!(*mesh.position(v), before[v.index()]);
            }
        }
        assert!(mesh.position(interior).z < 1.0);
    }
}

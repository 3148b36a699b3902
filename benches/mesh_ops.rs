//! Benchmarks for mesh operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hemesh::algo::{inflate, laplacian_smooth, LaplacianOptions};
use hemesh::prelude::*;
use nalgebra::Point3;

/// Quad grid of `n x n` cells, bent into a shallow dome so normals are defined.
fn grid_input(n: usize) -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (i as f64, j as f64);
            let c = n as f64 / 2.0;
            let z = -0.01 * ((x - c).powi(2) + (y - c).powi(2));
            vertices.push(Point3::new(x, y, z));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            faces.push([v00, v00 + 1, v00 + n + 2, v00 + n + 1]);
        }
    }

    (vertices, faces)
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (vertices, faces) = grid_input(50);

    c.bench_function("build_grid_50x50", |b| {
        b.iter(|| {
            let mesh: HalfEdgeMesh =
                build_from_polygons_uncolored(black_box(&vertices), black_box(&faces)).unwrap();
            mesh
        });
    });
}

fn bench_mesh_queries(c: &mut Criterion) {
    let (vertices, faces) = grid_input(50);
    let mesh: HalfEdgeMesh = build_from_polygons_uncolored(&vertices, &faces).unwrap();

    c.bench_function("vertex_neighbors_all", |b| {
        b.iter(|| {
            mesh.vertex_ids()
                .map(|v| mesh.vertex_neighbors(v).count())
                .sum::<usize>()
        });
    });

    c.bench_function("vertex_normals_all", |b| {
        b.iter(|| mesh.vertex_normals().unwrap());
    });

    c.bench_function("boundary_loops", |b| {
        b.iter(|| mesh.boundary_loops());
    });
}

fn bench_operators(c: &mut Criterion) {
    let (vertices, faces) = grid_input(50);
    let mesh: HalfEdgeMesh = build_from_polygons_uncolored(&vertices, &faces).unwrap();

    c.bench_function("laplacian_smooth", |b| {
        let options = LaplacianOptions::default().with_factor(0.5);
        b.iter(|| {
            let mut m = mesh.clone();
            laplacian_smooth(&mut m, &options).unwrap();
            m
        });
    });

    c.bench_function("inflate", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            inflate(&mut m, 0.1).unwrap();
            m
        });
    });
}

criterion_group!(benches, bench_mesh_construction, bench_mesh_queries, bench_operators);
criterion_main!(benches);

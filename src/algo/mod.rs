//! Mesh editing operators.
//!
//! - **Inflate/deflate**: move vertices along their area-weighted normals
//! - **Smoothing**: uniform Laplacian smoothing and sharpening
//! - **Refinement**: hole filling, truncation and subdivision entry points
//!
//! Operators mutate vertex positions in place. They must not run
//! concurrently with queries or other operators on the same mesh, which the
//! `&mut` receiver already enforces.

pub mod inflate;
pub mod refine;
pub mod smooth;

pub use inflate::{deflate, inflate};
pub use refine::{fill_holes, subdivide, truncate, SubdivisionScheme};
pub use smooth::{laplacian, laplacian_sharpen, laplacian_smooth, LaplacianMode, LaplacianOptions};

//! Geometry primitives.
//!
//! Vector arithmetic comes from nalgebra; this module adds the triangle
//! measures the mesh queries are built on.

use nalgebra::{Point3, Vector3};

/// Triangles whose corner angle has a sine below this are collinear.
///
/// The test is relative to the edge lengths, so it does not depend on the
/// units of the mesh.
pub const COLLINEAR_EPSILON: f64 = 1e-12;

/// Unnormalized normal of the triangle `(a, b, c)`, `(b - a) × (c - a)`.
///
/// Its length is twice the triangle's area.
#[inline]
pub fn triangle_cross(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    (b - a).cross(&(c - a))
}

/// Area of the triangle `(a, b, c)`.
///
/// ```
/// use hemesh::geometry::triangle_area;
/// use nalgebra::Point3;
///
/// let area = triangle_area(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// );
/// assert!((area - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    0.5 * triangle_cross(a, b, c).norm()
}

/// Unit normal of the triangle `(a, b, c)` following the right-hand rule.
///
/// Returns `None` when the vertices are coincident or collinear, that is when
/// `‖(b - a) × (c - a)‖ <= ε·‖b - a‖·‖c - a‖`.
pub fn triangle_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Vector3<f64>> {
    let cross = triangle_cross(a, b, c);
    let norm = cross.norm();
    let scale = (b - a).norm() * (c - a).norm();
    if norm == 0.0 || norm <= COLLINEAR_EPSILON * scale {
        return None;
    }
    Some(cross / norm)
}

/// Fan triangulation of a polygon with `degree` corners, anchored at corner 0.
///
/// Yields `(0, i + 1, i + 2)` for `i` in `0..=degree - 3`, so a triangle gives
/// one entry and a quad two. Polygons with fewer than three corners yield
/// nothing.
pub fn fan_triangles(degree: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..degree.saturating_sub(2)).map(|i| [0, i + 1, i + 2])
}

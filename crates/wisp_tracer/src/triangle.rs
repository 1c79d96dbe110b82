//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::fmt;
use std::ops::{Add, Mul};

use crate::Ray;
use wisp_math::{Mat4, Vec3};

/// Determinants smaller than this are treated as a ray parallel to the
/// triangle's plane.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle given by three world-space vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

/// Parameters of an accepted ray-triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// Barycentric weight of `v1`
    pub u: f32,
    /// Barycentric weight of `v2`
    pub v: f32,
}

impl TriangleHit {
    /// Barycentric weights (alpha, beta, gamma) for (v0, v1, v2).
    #[inline]
    pub fn barycentric(&self) -> (f32, f32, f32) {
        (1.0 - self.u - self.v, self.u, self.v)
    }

    /// Blend three per-vertex attributes with the barycentric weights.
    #[inline]
    pub fn interpolate<T>(&self, a0: T, a1: T, a2: T) -> T
    where
        T: Mul<f32, Output = T> + Add<Output = T>,
    {
        let (alpha, beta, gamma) = self.barycentric();
        a0 * alpha + a1 * beta + a2 * gamma
    }
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// This triangle with every vertex moved by `matrix`.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            v0: matrix.project_point3(self.v0),
            v1: matrix.project_point3(self.v1),
            v2: matrix.project_point3(self.v2),
        }
    }

    /// Geometric normal following the winding v0 -> v1 -> v2.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize_or_zero()
    }

    /// Möller-Trumbore ray-triangle intersection algorithm.
    ///
    /// Returns `None` when the ray is parallel to the triangle, passes
    /// outside it, or meets it behind the origin. Barycentric coordinates
    /// outside the triangle are rejected, never clamped.
    pub fn intersect(&self, ray: &Ray) -> Option<TriangleHit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);

        // Ray is parallel to triangle
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.v0;
        let u = tvec.dot(pvec) * inv_det;

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction().dot(qvec) * inv_det;

        if !(0.0..=1.0).contains(&v) || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;

        // Behind the ray origin
        if t < 0.0 {
            return None;
        }

        Some(TriangleHit { t, u, v })
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v0: {}, v1: {}, v2: {}", self.v0, self.v1, self.v2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_math::Vec2;

    fn facing_triangle() -> Triangle {
        // Triangle in XY plane at z=-5, wound counter-clockwise towards +Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
        )
    }

    #[test]
    fn test_triangle_hit_centroid() {
        let tri = facing_triangle();
        let centroid = (tri.v0 + tri.v1 + tri.v2) / 3.0;

        let ray = Ray::new(Vec3::ZERO, centroid.normalize());
        let hit = tri.intersect(&ray).expect("ray aimed at the centroid must hit");

        let (alpha, beta, gamma) = hit.barycentric();
        assert!((alpha - 1.0 / 3.0).abs() < 1e-4);
        assert!((beta - 1.0 / 3.0).abs() < 1e-4);
        assert!((gamma - 1.0 / 3.0).abs() < 1e-4);
        assert!((hit.t - centroid.length()).abs() < 1e-4);
    }

    #[test]
    fn test_triangle_miss_parallel() {
        let tri = facing_triangle();

        // Runs along the plane's tangent, one unit in front of it
        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::X);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_miss_behind_origin() {
        let tri = facing_triangle();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = facing_triangle();

        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(tri.intersect(&ray).is_none());

        // Inside the bounding square but past the slanted edge
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_hit_at_vertex() {
        let tri = facing_triangle();

        let ray = Ray::new(Vec3::new(1.0, -1.0, 0.0), Vec3::NEG_Z);
        let hit = tri.intersect(&ray).expect("vertex hits are inside");
        assert!((hit.u - 1.0).abs() < 1e-6);
        assert!(hit.v.abs() < 1e-6);
        assert!((hit.t - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_hit_from_behind() {
        // No backface culling: the determinant sign does not matter
        let tri = facing_triangle();

        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let hit = tri.intersect(&ray).expect("back faces are hit too");
        assert!((hit.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_interpolate_attributes() {
        let hit = TriangleHit {
            t: 1.0,
            u: 0.25,
            v: 0.5,
        };

        let uv = hit.interpolate(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert!((uv - Vec2::new(0.25, 0.5)).length() < 1e-6);

        let n = hit.interpolate(Vec3::Z, Vec3::Z, Vec3::Z);
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_transformed_and_normal() {
        let tri = facing_triangle();
        assert!((tri.normal() - Vec3::Z).length() < 1e-6);

        let moved = tri.transformed(&Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        assert_eq!(moved.v0, Vec3::new(-1.0, -1.0, -3.0));
        assert_eq!(moved.normal(), tri.normal());
    }

    #[test]
    fn test_triangle_display() {
        let text = facing_triangle().to_string();
        assert!(text.starts_with("v0: "));
        assert!(text.contains("v2: "));
    }
}

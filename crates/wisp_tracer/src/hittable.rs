//! Hittable trait and Surfel for ray-object intersection.

use crate::Ray;
use wisp_math::Vec3;

/// Surface element: the record of the nearest ray-surface intersection.
///
/// Built fresh for every query and owned by the caller, so concurrent rays
/// never share one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surfel {
    /// Point of intersection
    pub position: Vec3,
    /// Interpolated surface normal (unit length, or zero if degenerate)
    pub normal: Vec3,
    /// Barycentric weights of the hit
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
    /// Interpolated texture coordinates
    pub u: f32,
    pub v: f32,
}

impl Surfel {
    /// Create a surfel from a position, normal and texture coordinates.
    pub fn new(position: Vec3, normal: Vec3, u: f32, v: f32) -> Self {
        Self {
            position,
            normal,
            u,
            v,
            ..Default::default()
        }
    }

    /// The position pushed `epsilon` along the normal.
    ///
    /// Secondary rays start here so they do not re-hit their own surface.
    #[inline]
    pub fn offset_position(&self, epsilon: f32) -> Vec3 {
        self.position + self.normal * epsilon
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the closest intersection in front of the ray origin.
    ///
    /// Returns the ray parameter of the hit together with its surfel.
    fn intersect_nearest(&self, ray: &Ray) -> Option<(f32, Surfel)>;

    /// Whether anything is hit with a ray parameter in `[0, max_t)`.
    ///
    /// Stops at the first hit found, not the closest one.
    fn intersect_any_within(&self, ray: &Ray, max_t: f32) -> bool;

    /// Whether the ray hits anything at all in front of its origin.
    fn intersect_any(&self, ray: &Ray) -> bool {
        self.intersect_any_within(ray, f32::INFINITY)
    }
}

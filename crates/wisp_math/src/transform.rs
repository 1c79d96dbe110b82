// Transform utilities for Mat4
//
// Extends glam::Mat4 with the helpers the raytracer needs for normals and
// light directions. glam::Mat4 already provides transform_point3(),
// project_point3() and transform_vector3().

use glam::{Mat4, Vec3, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a direction (w=0) and renormalize the result.
    ///
    /// Translation never affects the result. A direction that collapses to
    /// zero length comes back as the zero vector.
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// The pure rotation held by this matrix, with translation and scale
    /// stripped off.
    fn rotation_part(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let v4 = Vec4::new(normal.x, normal.y, normal.z, 0.0);
        let transformed = *self * v4;
        Vec3::new(transformed.x, transformed.y, transformed.z).normalize_or_zero()
    }

    fn rotation_part(&self) -> Mat4 {
        let (_scale, rotation, _translation) = self.to_scale_rotation_translation();
        Mat4::from_quat(rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_transform_normal_ignores_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let normal = mat.transform_normal(Vec3::X);

        assert_eq!(normal, Vec3::X);
    }

    #[test]
    fn test_transform_normal_renormalizes() {
        let mat = Mat4::from_scale(Vec3::splat(4.0));
        let normal = mat.transform_normal(Vec3::new(0.0, 2.0, 0.0));

        assert!((normal - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_transform_normal_rotation() {
        // 90 degree rotation around Z axis
        let mat = Mat4::from_rotation_z(PI / 2.0);
        let normal = mat.transform_normal(Vec3::X);

        assert!((normal.x - 0.0).abs() < 0.001);
        assert!((normal.y - 1.0).abs() < 0.001);
        assert!((normal.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_rotation_part_strips_translation_and_scale() {
        let rotation = Mat4::from_rotation_y(PI / 4.0);
        let mat = Mat4::from_translation(Vec3::new(5.0, -2.0, 1.0))
            * rotation
            * Mat4::from_scale(Vec3::splat(3.0));

        let stripped = mat.rotation_part();
        let point = Vec3::new(1.0, 2.0, 3.0);

        let expected = rotation.transform_point3(point);
        assert!((stripped.transform_point3(point) - expected).length() < 0.001);
    }

    #[test]
    fn test_transform_point3_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let point = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(mat.transform_point3(point), Vec3::new(11.0, 22.0, 33.0));
    }
}

//! Camera for primary ray generation.
//!
//! The camera sits at the origin looking down -Z with +Y up. The image plane
//! spans [-1, 1] on its shorter axis; the longer axis is stretched by the
//! aspect ratio so pixels stay square.

use crate::Ray;
use wisp_core::Projection;
use wisp_math::{Vec2, Vec3};

/// Field of view across the shorter image axis.
pub const FIELD_OF_VIEW_DEGREES: f32 = 90.0;

/// Maps pixel positions to primary rays.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    pub projection: Projection,
}

impl Camera {
    pub fn new(image_width: u32, image_height: u32, projection: Projection) -> Self {
        Self {
            image_width,
            image_height,
            projection,
        }
    }

    /// Camera-space (x, y) of the centre of pixel (row, col).
    ///
    /// Row 0 is the top of the image.
    pub fn camera_point(&self, row: u32, col: u32) -> Vec2 {
        let half_extent = (FIELD_OF_VIEW_DEGREES.to_radians() / 2.0).tan();

        let col_ndc = (col as f32 + 0.5) / self.image_width as f32;
        let row_ndc = (row as f32 + 0.5) / self.image_height as f32;

        let mut x = (2.0 * col_ndc - 1.0) * half_extent;
        let mut y = (1.0 - 2.0 * row_ndc) * half_extent;

        let aspect = self.image_width as f32 / self.image_height as f32;
        if aspect > 1.0 {
            x *= aspect;
        } else {
            y /= aspect;
        }

        Vec2::new(x, y)
    }

    /// Primary ray through the centre of pixel (row, col).
    pub fn get_ray(&self, row: u32, col: u32) -> Ray {
        let point = self.camera_point(row, col);

        match self.projection {
            Projection::Orthographic => Ray::new(Vec3::new(point.x, point.y, 0.0), Vec3::NEG_Z),
            Projection::Perspective => {
                Ray::new(Vec3::ZERO, Vec3::new(point.x, point.y, -1.0).normalize())
            }
        }
    }
}

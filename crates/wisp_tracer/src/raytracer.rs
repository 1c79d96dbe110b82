//! Frame rendering.
//!
//! A frame has two phases. The scene's world state is rebuilt first through
//! a mutable borrow; only then is it shared immutably with the worker
//! threads, which trace buckets of pixels in parallel and hand back their
//! results for a serial copy into the framebuffer.

use std::time::Instant;

use rayon::prelude::*;

use crate::{
    bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE},
    camera::Camera,
    framebuffer::{Framebuffer, Rgba8},
    hittable::Hittable,
    light::Light,
    scene::Scene,
    scene_object::SceneObject,
    shading::{background, encode_color, shade},
    Ray,
};
use wisp_core::RenderParameters;

/// Read-only view of everything one frame's pixels depend on.
pub struct Frame<'a> {
    pub camera: Camera,
    pub object: &'a SceneObject,
    pub lights: &'a [Box<dyn Light>],
    pub params: &'a RenderParameters,
}

impl<'a> Frame<'a> {
    pub fn new(
        camera: Camera,
        object: &'a SceneObject,
        lights: &'a [Box<dyn Light>],
        params: &'a RenderParameters,
    ) -> Self {
        Self {
            camera,
            object,
            lights,
            params,
        }
    }

    /// Trace one ray and encode what it sees.
    pub fn cast_ray(&self, ray: &Ray) -> Rgba8 {
        match self.object.intersect_nearest(ray) {
            Some((_, surfel)) => {
                let color = shade(self.object, self.lights, self.params, ray, &surfel);
                encode_color(color, self.params.gamma_correction)
            }
            // Miss colour is a direction visualisation, never gamma encoded
            None => encode_color(background(ray), false),
        }
    }

    pub fn render_pixel(&self, row: u32, col: u32) -> Rgba8 {
        self.cast_ray(&self.camera.get_ray(row, col))
    }
}

/// Renders scenes into framebuffers.
#[derive(Debug, Clone)]
pub struct Raytracer {
    bucket_size: u32,
}

impl Default for Raytracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Raytracer {
    pub fn new() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }

    /// Set the edge length of the square tiles handed to worker threads.
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size.max(1);
        self
    }

    pub fn bucket_size(&self) -> u32 {
        self.bucket_size
    }

    /// Render one frame of `scene` into `framebuffer`.
    ///
    /// Every pixel is overwritten. The image size is taken from the
    /// framebuffer; an empty framebuffer is left untouched.
    pub fn raytrace(
        &self,
        scene: &mut Scene,
        params: &RenderParameters,
        framebuffer: &mut Framebuffer,
    ) {
        let (width, height) = (framebuffer.width, framebuffer.height);
        if width == 0 || height == 0 {
            log::warn!("Skipping render into empty {}x{} framebuffer", width, height);
            return;
        }

        let start = Instant::now();

        scene.recompute_world_state(params);

        let frame = Frame::new(
            Camera::new(width, height, params.projection),
            &scene.object,
            &scene.lights,
            params,
        );

        let buckets = generate_buckets(width, height, self.bucket_size);
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, &frame))
            .collect();

        for result in &results {
            framebuffer.write_bucket(result);
        }

        log::info!(
            "Rendered {}x{} ({} triangles, {} lights, {} buckets) in {:.2?}",
            width,
            height,
            scene.object.mesh().triangle_count(),
            scene.lights.len(),
            results.len(),
            start.elapsed()
        );
    }
}

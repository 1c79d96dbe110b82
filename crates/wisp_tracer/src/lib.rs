//! Wisp Tracer - CPU raytracing of textured triangle meshes.
//!
//! Casts one primary ray per pixel, finds the nearest triangle by brute
//! force, and shades it with Blinn-Phong lighting, hard shadows and
//! optional nearest-neighbour texturing. Buckets of pixels are traced in
//! parallel with rayon.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wisp_tracer::{DirectionalLight, Framebuffer, Raytracer, Scene, SceneObject};
//!
//! let object = SceneObject::new(Arc::new(mesh));
//! let mut scene = Scene::new(object).with_light(DirectionalLight::default());
//! let mut framebuffer = Framebuffer::new(640, 480);
//! Raytracer::new().raytrace(&mut scene, &params, &mut framebuffer);
//! framebuffer.save_png("out.png")?;
//! ```

mod bucket;
mod camera;
mod framebuffer;
mod hittable;
mod light;
mod raytracer;
mod scene;
mod scene_object;
mod shading;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, FIELD_OF_VIEW_DEGREES};
pub use framebuffer::{Framebuffer, FramebufferError, FramebufferResult, Rgba8};
pub use hittable::{Hittable, Surfel};
pub use light::{DirectionalLight, Light, LightProperties, PointLight};
pub use raytracer::{Frame, Raytracer};
pub use scene::Scene;
pub use scene_object::SceneObject;
pub use shading::{
    background, encode_channel, encode_color, is_visible, shade, Color, FLAT_GRAY, SHADOW_EPSILON,
};
pub use triangle::{Triangle, TriangleHit, PARALLEL_EPSILON};

/// Re-export math and scene types so callers need only this crate
pub use wisp_core::{Mesh, PolygonFace, Projection, RenderParameters, Texture};
pub use wisp_math::{Mat4, Ray, Vec2, Vec3};

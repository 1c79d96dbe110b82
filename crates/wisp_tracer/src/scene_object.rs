//! A textured triangle mesh placed in the world.
//!
//! The object keeps the loaded mesh untouched and derives world-space
//! positions and normals from it once per frame. All intersection queries
//! of that frame read the derived buffers; there is no acceleration
//! structure, every query scans every triangle.

use std::sync::Arc;

use crate::{
    hittable::{Hittable, Surfel},
    triangle::{Triangle, TriangleHit},
    Ray,
};
use wisp_core::{IndexedTriangularFace, Mesh, RenderParameters, Texture};
use wisp_math::{Mat4, Mat4Ext, Vec3};

/// A mesh with a world transform, an optional texture and world-space
/// vertex buffers.
pub struct SceneObject {
    mesh: Arc<Mesh>,
    texture: Option<Arc<Texture>>,

    /// Local transform applied before the view placement
    object_to_world: Mat4,

    /// Derived per frame, parallel to the mesh's position/normal arrays
    world_positions: Vec<Vec3>,
    world_normals: Vec<Vec3>,

    /// Set when the transform changed after the last recompute
    stale: bool,
}

impl SceneObject {
    /// Create an object with an identity transform.
    ///
    /// Until the first recompute the world buffers equal the raw mesh
    /// attributes.
    pub fn new(mesh: Arc<Mesh>) -> Self {
        let world_positions = mesh.positions().to_vec();
        let world_normals = mesh.normals().to_vec();

        Self {
            mesh,
            texture: None,
            object_to_world: Mat4::IDENTITY,
            world_positions,
            world_normals,
            stale: false,
        }
    }

    /// Attach a texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Set the local transform.
    pub fn with_transform(mut self, object_to_world: Mat4) -> Self {
        self.set_object_to_world(object_to_world);
        self
    }

    /// Replace the local transform.
    ///
    /// Takes effect at the next [`SceneObject::recompute_world_state`].
    pub fn set_object_to_world(&mut self, object_to_world: Mat4) {
        self.object_to_world = object_to_world;
        self.stale = true;
    }

    pub fn object_to_world(&self) -> Mat4 {
        self.object_to_world
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }

    /// World-space vertex positions from the last recompute.
    pub fn world_positions(&self) -> &[Vec3] {
        &self.world_positions
    }

    /// World-space vertex normals from the last recompute.
    pub fn world_normals(&self) -> &[Vec3] {
        &self.world_normals
    }

    /// The combined transform for this frame.
    ///
    /// Order: local transform, view translation (with z = -1), rotation,
    /// optional centring, uniform scale.
    pub fn world_transform(&self, params: &RenderParameters) -> Mat4 {
        let scale = params.object_scale(self.mesh.object_size());

        let mut transform = self.object_to_world * params.view_transform();
        if params.centre_object {
            transform *= Mat4::from_translation(-self.mesh.center_of_gravity() * scale);
        }
        transform * Mat4::from_scale(Vec3::splat(scale))
    }

    /// Rebuild the world-space vertex and normal buffers for a new frame.
    ///
    /// Positions go through the full transform as homogeneous points.
    /// Normals only follow its rotation.
    pub fn recompute_world_state(&mut self, params: &RenderParameters) {
        let transform = self.world_transform(params);
        let rotation = transform.rotation_part();

        let positions: Vec<Vec3> = self
            .mesh
            .positions()
            .iter()
            .map(|&p| transform.project_point3(p))
            .collect();
        let normals: Vec<Vec3> = self
            .mesh
            .normals()
            .iter()
            .map(|&n| rotation.transform_normal(n))
            .collect();

        // Swap both buffers together so they never disagree
        self.world_positions = positions;
        self.world_normals = normals;
        self.stale = false;

        log::debug!(
            "Recomputed world state: {} vertices, {} normals",
            self.world_positions.len(),
            self.world_normals.len()
        );
    }

    fn world_triangle(&self, face: &IndexedTriangularFace) -> Triangle {
        Triangle::new(
            self.world_positions[face.v0 as usize],
            self.world_positions[face.v1 as usize],
            self.world_positions[face.v2 as usize],
        )
    }

    fn build_surfel(&self, ray: &Ray, face: &IndexedTriangularFace, hit: &TriangleHit) -> Surfel {
        let normals = &self.world_normals;
        let uvs = self.mesh.uvs();

        let normal = hit.interpolate(
            normals[face.vn0 as usize],
            normals[face.vn1 as usize],
            normals[face.vn2 as usize],
        );
        let uv = hit.interpolate(
            uvs[face.vt0 as usize],
            uvs[face.vt1 as usize],
            uvs[face.vt2 as usize],
        );
        let (alpha, beta, gamma) = hit.barycentric();

        Surfel {
            position: ray.at(hit.t),
            normal: normal.normalize_or_zero(),
            alpha,
            beta,
            gamma,
            u: uv.x,
            v: uv.y,
        }
    }
}

impl Hittable for SceneObject {
    /// Linear scan keeping the smallest `t`.
    ///
    /// A later triangle only wins with a strictly smaller `t`, so ties go to
    /// the first triangle in mesh order.
    fn intersect_nearest(&self, ray: &Ray) -> Option<(f32, Surfel)> {
        debug_assert!(!self.stale, "world state must be recomputed after a transform change");

        let mut t_near = f32::INFINITY;
        let mut nearest: Option<(&IndexedTriangularFace, TriangleHit)> = None;

        for face in self.mesh.faces() {
            if let Some(hit) = self.world_triangle(face).intersect(ray) {
                if hit.t < t_near {
                    t_near = hit.t;
                    nearest = Some((face, hit));
                }
            }
        }

        nearest.map(|(face, hit)| (hit.t, self.build_surfel(ray, face, &hit)))
    }

    fn intersect_any_within(&self, ray: &Ray, max_t: f32) -> bool {
        debug_assert!(!self.stale, "world state must be recomputed after a transform change");

        self.mesh.faces().iter().any(|face| {
            self.world_triangle(face)
                .intersect(ray)
                .is_some_and(|hit| hit.t < max_t)
        })
    }
}

//! Mesh geometry handed to the raytracer.
//!
//! A mesh keeps its raw vertex attributes (positions, normals, texture
//! coordinates) in separate arrays and describes triangles as triplets of
//! indices into each of them. Polygonal faces coming from a loader are
//! reduced to triangles by [`triangulate`].

use thiserror::Error;
use wisp_math::{Vec2, Vec3};

/// Errors raised when a mesh references attributes it does not have.
///
/// An out-of-range index means the upstream scene is corrupt, so meshes are
/// validated once at construction instead of on every ray.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("Face {face} references {attribute} index {index}, but only {len} are available")]
    IndexOutOfRange {
        face: usize,
        attribute: &'static str,
        index: u32,
        len: usize,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A triangle described by indices into the owning mesh's attribute arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexedTriangularFace {
    /// Position indices
    pub v0: u32,
    pub v1: u32,
    pub v2: u32,
    /// Normal indices
    pub vn0: u32,
    pub vn1: u32,
    pub vn2: u32,
    /// Texture coordinate indices
    pub vt0: u32,
    pub vt1: u32,
    pub vt2: u32,
}

impl IndexedTriangularFace {
    /// Position indices as an array.
    pub fn positions(&self) -> [u32; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Normal indices as an array.
    pub fn normals(&self) -> [u32; 3] {
        [self.vn0, self.vn1, self.vn2]
    }

    /// Texture coordinate indices as an array.
    pub fn uvs(&self) -> [u32; 3] {
        [self.vt0, self.vt1, self.vt2]
    }
}

/// A polygonal face as produced by a mesh loader.
///
/// The three lists run in parallel: corner `i` of the polygon uses
/// `vertices[i]`, `normals[i]` and `uvs[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonFace {
    pub vertices: Vec<u32>,
    pub normals: Vec<u32>,
    pub uvs: Vec<u32>,
}

impl PolygonFace {
    /// Create a face from parallel corner lists.
    pub fn new(vertices: Vec<u32>, normals: Vec<u32>, uvs: Vec<u32>) -> Self {
        Self {
            vertices,
            normals,
            uvs,
        }
    }

    /// Number of corners usable for triangulation.
    pub fn corner_count(&self) -> usize {
        self.vertices
            .len()
            .min(self.normals.len())
            .min(self.uvs.len())
    }
}

/// Reduce polygonal faces to triangles.
///
/// A face with exactly three corners becomes one triangle. A face with more
/// corners keeps only its first three: this is lossy for quads and wrong for
/// non-convex polygons, and is a known limitation rather than a fan or
/// ear-clipping triangulation. Faces with fewer than three corners are
/// skipped.
pub fn triangulate(polygons: &[PolygonFace]) -> Vec<IndexedTriangularFace> {
    let mut triangles = Vec::with_capacity(polygons.len());
    let mut truncated = 0usize;

    for (i, face) in polygons.iter().enumerate() {
        let corners = face.corner_count();
        if corners < 3 {
            log::warn!("Skipping face {} with only {} usable corners", i, corners);
            continue;
        }
        if corners > 3 {
            truncated += 1;
        }

        triangles.push(IndexedTriangularFace {
            v0: face.vertices[0],
            v1: face.vertices[1],
            v2: face.vertices[2],
            vn0: face.normals[0],
            vn1: face.normals[1],
            vn2: face.normals[2],
            vt0: face.uvs[0],
            vt1: face.uvs[1],
            vt2: face.uvs[2],
        });
    }

    if truncated > 0 {
        log::warn!(
            "{} faces had more than 3 corners; only their first triangle is kept",
            truncated
        );
    }

    triangles
}

/// A triangle mesh with per-vertex positions, normals and texture coordinates.
///
/// Attributes are immutable once the mesh is built. The centre of gravity
/// and object size used for centring/scaling are derived at construction.
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: Vec<IndexedTriangularFace>,
    center_of_gravity: Vec3,
    object_size: f32,
}

impl Mesh {
    /// Create a mesh from attribute arrays and indexed triangles.
    ///
    /// Fails if any face indexes past the end of an attribute array.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        faces: Vec<IndexedTriangularFace>,
    ) -> MeshResult<Self> {
        for (i, face) in faces.iter().enumerate() {
            check_indices(i, "position", face.positions(), positions.len())?;
            check_indices(i, "normal", face.normals(), normals.len())?;
            check_indices(i, "uv", face.uvs(), uvs.len())?;
        }

        let center_of_gravity = Self::compute_center_of_gravity(&positions);
        let object_size = Self::compute_object_size(&positions, center_of_gravity);

        Ok(Self {
            positions,
            normals,
            uvs,
            faces,
            center_of_gravity,
            object_size,
        })
    }

    /// Create a mesh from polygonal faces, triangulating them first.
    pub fn from_polygons(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        polygons: &[PolygonFace],
    ) -> MeshResult<Self> {
        Self::new(positions, normals, uvs, triangulate(polygons))
    }

    /// Mean of all vertex positions.
    fn compute_center_of_gravity(positions: &[Vec3]) -> Vec3 {
        if positions.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = positions.iter().copied().sum();
        sum / positions.len() as f32
    }

    /// Largest distance of any vertex from the centre of gravity.
    ///
    /// Falls back to 1.0 for empty or single-point meshes so that scaling by
    /// `1 / size` stays finite.
    fn compute_object_size(positions: &[Vec3], center: Vec3) -> f32 {
        let size = positions
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);

        if size > 0.0 {
            size
        } else {
            1.0
        }
    }

    /// Raw vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Raw vertex normals.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Raw texture coordinates.
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Indexed triangles.
    pub fn faces(&self) -> &[IndexedTriangularFace] {
        &self.faces
    }

    pub fn center_of_gravity(&self) -> Vec3 {
        self.center_of_gravity
    }

    pub fn object_size(&self) -> f32 {
        self.object_size
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

fn check_indices(
    face: usize,
    attribute: &'static str,
    indices: [u32; 3],
    len: usize,
) -> MeshResult<()> {
    for index in indices {
        if index as usize >= len {
            return Err(MeshError::IndexOutOfRange {
                face,
                attribute,
                index,
                len,
            });
        }
    }
    Ok(())
}

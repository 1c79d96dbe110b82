//! Wisp Core - scene data consumed by the raytracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh` with per-vertex positions, normals and texture
//!   coordinates, `IndexedTriangularFace`, and polygon triangulation
//! - **Textures**: RGBA8 `Texture` with nearest-neighbour sampling
//! - **Parameters**: the per-frame `RenderParameters` snapshot
//!
//! # Example
//!
//! ```ignore
//! use wisp_core::{Mesh, PolygonFace, RenderParameters};
//!
//! let mesh = Mesh::from_polygons(positions, normals, uvs, &polygons)?;
//! let params = RenderParameters::load("render.json")?;
//! println!("{} triangles, {:?} projection", mesh.triangle_count(), params.projection);
//! ```

pub mod mesh;
pub mod params;
pub mod texture;

// Re-export commonly used types
pub use mesh::{triangulate, IndexedTriangularFace, Mesh, MeshError, MeshResult, PolygonFace};
pub use params::{ParamsError, ParamsResult, Projection, RenderParameters};
pub use texture::{decode_channel, Texture, TextureError, TextureResult, GAMMA};

//! Textured quad example.
//!
//! Renders a checkered quad lit by a single directional light and saves it
//! as PNG. Pass a JSON file of render parameters to override the defaults:
//!
//! ```text
//! cargo run --example render_quad -- params.json
//! ```

use std::sync::Arc;

use anyhow::Result;
use wisp_tracer::{
    DirectionalLight, Framebuffer, Mat4, Mesh, PolygonFace, Raytracer, RenderParameters, Scene,
    SceneObject, Texture, Vec2, Vec3,
};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn main() -> Result<()> {
    env_logger::init();

    println!("Wisp Tracer - Textured Quad");
    println!("===========================");

    let params = match std::env::args().nth(1) {
        Some(path) => RenderParameters::load(&path)?,
        None => RenderParameters {
            textured_rendering: true,
            texture_modulation: true,
            gamma_correction: true,
            centre_object: true,
            scale_object: true,
            zoom_scale: 0.8,
            rotation: Mat4::from_rotation_x(-0.6) * Mat4::from_rotation_y(0.5),
            ..Default::default()
        },
    };

    let object = SceneObject::new(Arc::new(build_quad()?)).with_texture(Arc::new(checker(8, 8)?));
    let light = DirectionalLight::new(Mat4::from_rotation_x(-0.4) * Mat4::from_rotation_y(0.3))
        .with_color(Vec3::new(1.0, 0.95, 0.9), 1.0);
    let mut scene = Scene::new(object).with_light(light);

    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);

    let start = std::time::Instant::now();
    Raytracer::new().raytrace(&mut scene, &params, &mut framebuffer);
    println!("Rendered {}x{} in {:?}", WIDTH, HEIGHT, start.elapsed());

    let filename = "render_quad.png";
    framebuffer.save_png(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

/// A 2x2 quad in the XY plane.
///
/// Triangulation keeps only the first three corners of a polygon, so the
/// quad is given as two triangles rather than one four-sided face.
fn build_quad() -> Result<Mesh> {
    let positions = vec![
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];
    let normals = vec![Vec3::Z];
    let uvs = vec![
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    let polygons = [
        PolygonFace::new(vec![0, 1, 2], vec![0, 0, 0], vec![0, 1, 2]),
        PolygonFace::new(vec![0, 2, 3], vec![0, 0, 0], vec![0, 2, 3]),
    ];

    let mesh = Mesh::from_polygons(positions, normals, uvs, &polygons)?;
    println!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// A black and white checkerboard with `cells` squares per side.
fn checker(cells: u32, cell_size: u32) -> Result<Texture> {
    let size = cells * cell_size;
    let pixels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size / cell_size, i / size / cell_size);
            if (x + y) % 2 == 0 {
                [230, 230, 230, 255]
            } else {
                [40, 40, 40, 255]
            }
        })
        .collect();

    Ok(Texture::new(size, size, pixels, "<checker>")?)
}

//! Local shading: Blinn-Phong lighting, shadow tests, texture application
//! and conversion to 8-bit output.

use crate::{
    framebuffer::Rgba8,
    hittable::{Hittable, Surfel},
    light::Light,
    scene_object::SceneObject,
    Ray,
};
use wisp_core::{RenderParameters, GAMMA};
use wisp_math::Vec3;

/// Linear RGB color.
pub type Color = Vec3;

/// Offset along the normal for shadow ray origins.
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Gray used for unlit, untextured surfaces.
pub const FLAT_GRAY: f32 = 0.7;

/// Pseudo-color for rays that miss everything: the direction mapped from
/// [-1, 1] to [0, 1].
#[inline]
pub fn background(ray: &Ray) -> Color {
    0.5 * (ray.direction() + Color::ONE)
}

/// Whether `light` reaches `surfel` unobstructed.
///
/// The shadow ray starts `epsilon` above the surface along its normal and
/// points toward the light. Only hits closer than the light count.
pub fn is_visible(world: &dyn Hittable, surfel: &Surfel, light: &dyn Light, epsilon: f32) -> bool {
    let to_light = light.direction(surfel);
    if to_light == Vec3::ZERO {
        return true;
    }

    let shadow_ray = Ray::new(surfel.offset_position(epsilon), to_light);
    !world.intersect_any_within(&shadow_ray, light.distance(surfel))
}

/// Color of the surface at `surfel`, seen along `ray`.
pub fn shade(
    object: &SceneObject,
    lights: &[Box<dyn Light>],
    params: &RenderParameters,
    ray: &Ray,
    surfel: &Surfel,
) -> Color {
    let texture_color = if params.textured_rendering {
        object
            .texture()
            .map(|tex| tex.color_at(surfel.u, surfel.v, params.gamma_correction))
    } else {
        None
    };

    if !params.use_lighting {
        return texture_color.unwrap_or(Color::splat(FLAT_GRAY));
    }

    let lit = blinn_phong(object, lights, params, ray, surfel);

    match texture_color {
        Some(tex) if params.texture_modulation => lit * tex,
        Some(tex) => tex,
        None => lit,
    }
}

fn blinn_phong(
    world: &dyn Hittable,
    lights: &[Box<dyn Light>],
    params: &RenderParameters,
    ray: &Ray,
    surfel: &Surfel,
) -> Color {
    let normal = surfel.normal;
    let to_eye = (ray.origin() - surfel.position).normalize_or_zero();

    let mut color = Color::ZERO;
    for light in lights {
        let radiance = light.radiance();

        color += params.ambient * radiance;

        if params.use_shadows && !is_visible(world, surfel, light.as_ref(), SHADOW_EPSILON) {
            continue;
        }

        let to_light = light.direction(surfel);

        let n_dot_l = normal.dot(to_light).max(0.0);
        if n_dot_l > 0.0 {
            color += params.diffuse * n_dot_l * radiance;
        }

        let bisector = ((to_eye + to_light) / 2.0).normalize_or_zero();
        let n_dot_h = normal.dot(bisector).max(0.0);
        if n_dot_h > 0.0 {
            color += params.specular * n_dot_h.powf(params.specular_exponent) * radiance;
        }
    }

    color
}

/// Encode one linear channel as 8 bits.
///
/// Negative values clamp to zero before the optional `1/2.2` power so the
/// power never sees a negative base. The result is truncated, not rounded.
#[inline]
pub fn encode_channel(linear: f32, gamma_correct: bool) -> u8 {
    let linear = linear.max(0.0);
    let encoded = if gamma_correct {
        linear.powf(1.0 / GAMMA)
    } else {
        linear
    };
    (encoded * 255.0).clamp(0.0, 255.0) as u8
}

/// Encode a linear color as an opaque 8-bit pixel.
pub fn encode_color(color: Color, gamma_correct: bool) -> Rgba8 {
    Rgba8::new(
        encode_channel(color.x, gamma_correct),
        encode_channel(color.y, gamma_correct),
        encode_channel(color.z, gamma_correct),
        255,
    )
}

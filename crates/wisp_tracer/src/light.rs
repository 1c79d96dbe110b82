//! Light sources.
//!
//! Every light carries a light-to-world transform, a colour and an
//! intensity. Concrete lights only decide which way the light arrives at a
//! surface point and how far away it is.

use crate::hittable::Surfel;
use wisp_math::{Mat4, Mat4Ext, Vec3};

/// State shared by every light type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProperties {
    pub light_to_world: Mat4,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for LightProperties {
    fn default() -> Self {
        Self {
            light_to_world: Mat4::IDENTITY,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// A light that can illuminate surfels.
pub trait Light: Send + Sync {
    fn properties(&self) -> &LightProperties;

    fn properties_mut(&mut self) -> &mut LightProperties;

    /// Unit vector from the surfel toward the light.
    fn direction(&self, surfel: &Surfel) -> Vec3;

    /// Distance from the surfel to the light along [`Light::direction`].
    ///
    /// Lights at infinity report `f32::INFINITY`.
    fn distance(&self, _surfel: &Surfel) -> f32 {
        f32::INFINITY
    }

    fn color(&self) -> Vec3 {
        self.properties().color
    }

    fn intensity(&self) -> f32 {
        self.properties().intensity
    }

    /// Colour scaled by intensity.
    fn radiance(&self) -> Vec3 {
        self.color() * self.intensity()
    }

    fn light_to_world(&self) -> Mat4 {
        self.properties().light_to_world
    }

    /// Overwrite the light-to-world transform.
    fn replace_transform(&mut self, transform: Mat4) {
        self.properties_mut().light_to_world = transform;
    }

    /// Post-multiply the current transform by `transform`.
    fn compose_transform(&mut self, transform: Mat4) {
        let props = self.properties_mut();
        props.light_to_world *= transform;
    }
}

/// Light arriving from a single direction everywhere in the scene.
///
/// With an identity transform the light shines down -Z.
#[derive(Debug, Clone, Default)]
pub struct DirectionalLight {
    properties: LightProperties,
}

impl DirectionalLight {
    /// White light with unit intensity and the given transform.
    pub fn new(light_to_world: Mat4) -> Self {
        Self {
            properties: LightProperties {
                light_to_world,
                ..Default::default()
            },
        }
    }

    pub fn with_color(mut self, color: Vec3, intensity: f32) -> Self {
        self.properties.color = color;
        self.properties.intensity = intensity;
        self
    }

    /// World-space direction the light travels in.
    pub fn emission_direction(&self) -> Vec3 {
        self.properties.light_to_world.transform_normal(Vec3::NEG_Z)
    }
}

impl Light for DirectionalLight {
    fn properties(&self) -> &LightProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut LightProperties {
        &mut self.properties
    }

    fn direction(&self, _surfel: &Surfel) -> Vec3 {
        -self.emission_direction()
    }
}

/// Light emitted from one point, positioned by the translation of its
/// transform.
#[derive(Debug, Clone, Default)]
pub struct PointLight {
    properties: LightProperties,
}

impl PointLight {
    pub fn new(light_to_world: Mat4) -> Self {
        Self {
            properties: LightProperties {
                light_to_world,
                ..Default::default()
            },
        }
    }

    /// Light placed at `position` with an otherwise identity transform.
    pub fn at(position: Vec3) -> Self {
        Self::new(Mat4::from_translation(position))
    }

    pub fn with_color(mut self, color: Vec3, intensity: f32) -> Self {
        self.properties.color = color;
        self.properties.intensity = intensity;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.properties.light_to_world.transform_point3(Vec3::ZERO)
    }
}

impl Light for PointLight {
    fn properties(&self) -> &LightProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut LightProperties {
        &mut self.properties
    }

    fn direction(&self, surfel: &Surfel) -> Vec3 {
        (self.position() - surfel.position).normalize_or_zero()
    }

    fn distance(&self, surfel: &Surfel) -> f32 {
        self.position().distance(surfel.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfel_at(position: Vec3) -> Surfel {
        Surfel::new(position, Vec3::Z, 0.0, 0.0)
    }

    #[test]
    fn test_identity_directional_points_up_z() {
        let light = DirectionalLight::default();
        let dir = light.direction(&surfel_at(Vec3::ZERO));
        assert!((dir - Vec3::Z).length() < 1e-6);
        assert!((light.emission_direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_directional_independent_of_position() {
        let light = DirectionalLight::new(Mat4::from_rotation_y(0.7));

        let a = light.direction(&surfel_at(Vec3::new(-3.0, 1.0, 2.0)));
        let b = light.direction(&surfel_at(Vec3::new(10.0, -4.0, -8.0)));
        assert!((a - b).length() < 1e-6);
        assert!((a.length() - 1.0).abs() < 1e-5);
        assert_eq!(light.distance(&surfel_at(Vec3::ZERO)), f32::INFINITY);
    }

    #[test]
    fn test_directional_ignores_translation() {
        let light = DirectionalLight::new(Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)));
        let dir = light.direction(&surfel_at(Vec3::ZERO));
        assert!((dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_replace_and_compose_transform() {
        let mut light = DirectionalLight::default();

        light.replace_transform(Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));
        // -Z rotated +90 degrees about X becomes +Y, so the light sits toward -Y
        let dir = light.direction(&surfel_at(Vec3::ZERO));
        assert!((dir - Vec3::NEG_Y).length() < 1e-5);

        light.compose_transform(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        let dir = light.direction(&surfel_at(Vec3::ZERO));
        assert!((dir - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_radiance_scales_color() {
        let light = DirectionalLight::default().with_color(Vec3::new(1.0, 0.5, 0.0), 2.0);
        assert_eq!(light.radiance(), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(light.intensity(), 2.0);
    }

    #[test]
    fn test_point_light_direction_and_distance() {
        let light = PointLight::at(Vec3::new(0.0, 0.0, 4.0));
        let surfel = surfel_at(Vec3::new(0.0, 0.0, 1.0));

        assert!((light.direction(&surfel) - Vec3::Z).length() < 1e-6);
        assert!((light.distance(&surfel) - 3.0).abs() < 1e-6);
        assert_eq!(light.position(), Vec3::new(0.0, 0.0, 4.0));
    }
}

//! Render parameters: the per-frame snapshot of user-facing settings.
//!
//! The scene controller owns these and hands the raytracer a read-only
//! reference for each frame. They can be written out and read back as JSON,
//! and every field has a default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wisp_math::{Mat4, Vec3};

/// Errors that can occur while reading render parameters.
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render parameters: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ParamsResult<T> = Result<T, ParamsError>;

/// How primary rays leave the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Parallel rays along -Z, one origin per pixel on the z=0 plane.
    #[default]
    Orthographic,
    /// All rays start at the camera origin and fan out through the image plane.
    Perspective,
}

/// Settings read by the raytracer for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    // Shading switches
    pub use_lighting: bool,
    pub use_shadows: bool,
    pub textured_rendering: bool,
    pub texture_modulation: bool,
    pub gamma_correction: bool,

    // Blinn-Phong coefficients
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_exponent: f32,

    pub projection: Projection,

    // Object placement
    pub zoom_scale: f32,
    pub x_translate: f32,
    pub y_translate: f32,
    pub rotation: Mat4,
    pub centre_object: bool,
    pub scale_object: bool,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            use_lighting: true,
            use_shadows: true,
            textured_rendering: false,
            texture_modulation: false,
            gamma_correction: false,
            ambient: 0.1,
            diffuse: 0.8,
            specular: 0.5,
            specular_exponent: 32.0,
            projection: Projection::Orthographic,
            zoom_scale: 1.0,
            x_translate: 0.0,
            y_translate: 0.0,
            rotation: Mat4::IDENTITY,
            centre_object: false,
            scale_object: false,
        }
    }
}

impl RenderParameters {
    /// Parse parameters from a JSON string.
    pub fn from_json_str(json: &str) -> ParamsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read parameters from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ParamsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let params = Self::from_json_str(&text)?;
        log::debug!("Loaded render parameters from {}", path.as_ref().display());
        Ok(params)
    }

    /// Serialize parameters as pretty-printed JSON.
    pub fn to_json_string(&self) -> ParamsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Uniform scale applied to the object this frame.
    ///
    /// `zoom_scale`, divided by the object's size when `scale_object` is set.
    pub fn object_scale(&self, object_size: f32) -> f32 {
        if self.scale_object {
            self.zoom_scale / object_size
        } else {
            self.zoom_scale
        }
    }

    /// The world transform built from placement settings, before any
    /// centring.
    ///
    /// The object is pushed one unit down -Z so that the image plane can sit
    /// at z=0.
    pub fn view_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x_translate, self.y_translate, -1.0)) * self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RenderParameters::default();
        assert!(params.use_lighting);
        assert!(!params.textured_rendering);
        assert_eq!(params.projection, Projection::Orthographic);
        assert_eq!(params.rotation, Mat4::IDENTITY);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params = RenderParameters::from_json_str(
            r#"{ "projection": "perspective", "ambient": 0.25, "gamma_correction": true }"#,
        )
        .unwrap();

        assert_eq!(params.projection, Projection::Perspective);
        assert_eq!(params.ambient, 0.25);
        assert!(params.gamma_correction);
        assert_eq!(params.diffuse, RenderParameters::default().diffuse);
    }

    #[test]
    fn test_json_roundtrip_keeps_rotation() {
        let params = RenderParameters {
            rotation: Mat4::from_rotation_y(0.5),
            scale_object: true,
            ..Default::default()
        };

        let json = params.to_json_string().unwrap();
        let back = RenderParameters::from_json_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = RenderParameters::from_json_str(r#"{ "projection": "fisheye" }"#);
        assert!(matches!(result, Err(ParamsError::Json(_))));
    }

    #[test]
    fn test_object_scale() {
        let mut params = RenderParameters {
            zoom_scale: 2.0,
            ..Default::default()
        };
        assert_eq!(params.object_scale(4.0), 2.0);

        params.scale_object = true;
        assert_eq!(params.object_scale(4.0), 0.5);
    }

    #[test]
    fn test_view_transform_pushes_object_back() {
        let params = RenderParameters {
            x_translate: 0.5,
            ..Default::default()
        };
        let p = params.view_transform().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(0.5, 0.0, -1.0));
    }
}

//! The renderable scene: one object and its lights.

use crate::{light::Light, scene_object::SceneObject};
use wisp_core::RenderParameters;

pub struct Scene {
    pub object: SceneObject,
    pub lights: Vec<Box<dyn Light>>,
}

impl Scene {
    /// A scene with no lights.
    pub fn new(object: SceneObject) -> Self {
        Self {
            object,
            lights: Vec::new(),
        }
    }

    pub fn with_light(mut self, light: impl Light + 'static) -> Self {
        self.add_light(light);
        self
    }

    pub fn add_light(&mut self, light: impl Light + 'static) {
        self.lights.push(Box::new(light));
    }

    /// Bring world-space buffers up to date for a new frame.
    pub fn recompute_world_state(&mut self, params: &RenderParameters) {
        self.object.recompute_world_state(params);
    }
}

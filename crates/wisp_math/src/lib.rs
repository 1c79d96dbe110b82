// Re-export glam for convenience
pub use glam::*;

// Wisp math types
mod ray;
mod transform;
pub use ray::Ray;
pub use transform::Mat4Ext;

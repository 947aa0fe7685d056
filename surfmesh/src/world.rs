//! World state shared by every draw call of a frame

use serde::{Deserialize, Serialize};

/// Shader uniform name for the lighting toggle
pub const UNIFORM_USE_LIGHTING: &str = "uUseLighting";
/// Shader uniform name for the texturing toggle
pub const UNIFORM_USE_TEXTURE: &str = "uUseTexture";

/// Receiver for named scalar shader uniforms.
pub trait UniformSink {
    fn set_uniform_i32(&mut self, name: &str, value: i32);
    fn set_uniform_f32(&mut self, name: &str, value: f32);
}

/// Two world-level flags, pushed to the shader before a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    #[serde(default = "default_true")]
    pub lighting: bool,
    #[serde(default)]
    pub texturing: bool,
}

fn default_true() -> bool {
    true
}

impl Default for World {
    fn default() -> Self {
        Self {
            lighting: true,
            texturing: false,
        }
    }
}

impl World {
    /// Set both flags as 0/1 integer uniforms
    pub fn apply<U: UniformSink + ?Sized>(&self, sink: &mut U) {
        sink.set_uniform_i32(UNIFORM_USE_LIGHTING, self.lighting as i32);
        sink.set_uniform_i32(UNIFORM_USE_TEXTURE, self.texturing as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Uniforms(HashMap<String, i32>);

    impl UniformSink for Uniforms {
        fn set_uniform_i32(&mut self, name: &str, value: i32) {
            self.0.insert(name.to_string(), value);
        }

        fn set_uniform_f32(&mut self, _name: &str, _value: f32) {
            panic!("world flags are integer uniforms");
        }
    }

    #[test]
    fn test_world_default() {
        let world = World::default();
        assert!(world.lighting);
        assert!(!world.texturing);
    }

    #[test]
    fn test_apply_sets_both_flags() {
        let mut uniforms = Uniforms::default();
        World {
            lighting: false,
            texturing: true,
        }
        .apply(&mut uniforms);

        assert_eq!(uniforms.0.get(UNIFORM_USE_LIGHTING), Some(&0));
        assert_eq!(uniforms.0.get(UNIFORM_USE_TEXTURE), Some(&1));
    }

    #[test]
    fn test_world_deserialize_defaults() {
        let world: World = serde_json::from_str("{}").unwrap();
        assert_eq!(world, World::default());

        let world: World = serde_json::from_str(r#"{"texturing": true}"#).unwrap();
        assert!(world.lighting);
        assert!(world.texturing);
    }
}

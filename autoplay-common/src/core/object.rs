//! Judge line transform animation.
//!
//! Trimmed to the two animations a judgment line's kinematics actually
//! need — translation and rotation. Alpha and scale are rendering-only
//! concerns with no counterpart in the touch-planning domain.

use super::anim::{AnimFloat, AnimVector};
use super::Vector;
use serde::{Deserialize, Serialize};

/// Animated position and rotation of a judge line.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct Object {
    pub translation: AnimVector,
    /// Rotation in degrees.
    pub rotation: AnimFloat,
}

impl Object {
    pub fn set_time(&mut self, time: f32) {
        self.translation.set_time(time);
        self.rotation.set_time(time);
    }

    pub fn now_translation(&self) -> Vector {
        self.translation.now()
    }

    /// Current rotation, in degrees.
    pub fn now_rotation(&self) -> f32 {
        self.rotation.now()
    }
}

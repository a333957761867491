//! Keyframe animation for judge-line kinematics.
//!
//! Linear interpolation only — a full easing/tween catalog belongs to
//! the rendering/kinematics layer, not the touch-planning core, so it
//! is not reproduced here.

use super::Vector;
use serde::{Deserialize, Serialize};

/// A keyframe in a linear animation: reaching `value` at `time`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Keyframe-based, linearly-interpolated animation of an `f32` value.
///
/// A cursor tracks the active segment so repeated `set_time` calls in
/// increasing time order are O(1) amortized rather than a binary search
/// per call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimFloat {
    time: f32,
    keyframes: Vec<Keyframe<f32>>,
    cursor: usize,
}

impl Default for AnimFloat {
    fn default() -> Self {
        Self {
            time: 0.0,
            keyframes: Vec::new(),
            cursor: 0,
        }
    }
}

impl AnimFloat {
    pub fn new(keyframes: Vec<Keyframe<f32>>) -> Self {
        Self {
            time: 0.0,
            keyframes,
            cursor: 0,
        }
    }

    /// An animation that holds a single constant value forever.
    pub fn fixed(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    pub fn set_time(&mut self, time: f32) {
        if self.keyframes.is_empty() {
            self.time = time;
            return;
        }
        while let Some(kf) = self.keyframes.get(self.cursor + 1) {
            if kf.time > time {
                break;
            }
            self.cursor += 1;
        }
        while self.cursor != 0 && self.keyframes[self.cursor].time > time {
            self.cursor -= 1;
        }
        self.time = time;
    }

    /// Current value, `0.0` if there are no keyframes.
    pub fn now(&self) -> f32 {
        if self.keyframes.is_empty() {
            return 0.0;
        }
        if self.cursor == self.keyframes.len() - 1 {
            return self.keyframes[self.cursor].value;
        }
        let kf1 = &self.keyframes[self.cursor];
        let kf2 = &self.keyframes[self.cursor + 1];
        if kf2.time <= kf1.time {
            return kf1.value;
        }
        let t = (self.time - kf1.time) / (kf2.time - kf1.time);
        kf1.value + (kf2.value - kf1.value) * t.clamp(0.0, 1.0)
    }
}

/// Animation of a 2D point, one `AnimFloat` per axis.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnimVector {
    pub x: AnimFloat,
    pub y: AnimFloat,
}

impl AnimVector {
    pub fn fixed(v: Vector) -> Self {
        Self {
            x: AnimFloat::fixed(v.x),
            y: AnimFloat::fixed(v.y),
        }
    }

    pub fn set_time(&mut self, time: f32) {
        self.x.set_time(time);
        self.y.set_time(time);
    }

    pub fn now(&self) -> Vector {
        Vector::new(self.x.now(), self.y.now())
    }
}

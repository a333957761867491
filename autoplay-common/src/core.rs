//! Domain model the touch-planning engine is built on: judge line
//! kinematics, notes, and chart structure.
//!
//! Trimmed to what a judgment line needs to expose positions and angles
//! over time — no rendering, no easing catalog, no audio.

pub type Point = nalgebra::Point2<f32>;
pub type Vector = nalgebra::Vector2<f32>;

mod anim;
pub use anim::{AnimFloat, AnimVector, Keyframe};

mod bpm;
pub use bpm::BpmList;

mod object;
pub use object::Object;

mod chart;
pub use chart::{Chart, JudgeLine, JudgmentLine, Note, NoteKind};

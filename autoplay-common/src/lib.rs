//! Autoplay touch-planning engine: turns a chart into a device-ready
//! timeline of DOWN/MOVE/UP touch events.
//!
//! The pipeline is two stages. [`frame`] walks a chart's notes and
//! produces per-millisecond [`frame::FrameEvent`]s, with no notion yet
//! of pointer identity. [`pointer`] walks that timeline and binds each
//! event to a bounded pool of pointer ids, producing the
//! [`pointer::TouchEvent`] timeline an input-injection transport would
//! actually consume. [`core`] and [`geometry`] supply the chart and
//! screen collaborators both stages are generic over.

pub mod constants;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pointer;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, VecSink};
pub use error::AutoplayError;
pub use frame::{synthesize_frames, FrameAction, FrameEvent, FrameTimeline};
pub use geometry::{DeviceScreen, ScreenGeometry};
pub use pointer::{plan_touch_events, PointerManager, TouchAction, TouchEvent, TouchTimeline};

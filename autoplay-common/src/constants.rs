//! Tuning constants for the Frame Synthesizer and Pointer Planner.
//!
//! These were arrived at empirically against real charts, not derived
//! from first principles, so they stay as named constants rather than
//! configuration knobs.

/// FLICK event window start, in milliseconds relative to judgment time.
pub const FLICK_START: i64 = -20;
/// FLICK event window end, in milliseconds relative to judgment time.
pub const FLICK_END: i64 = 20;
/// `FLICK_END - FLICK_START`, the denominator of the flick rate curve.
pub const FLICK_DURATION: i64 = FLICK_END - FLICK_START;
/// Radius, in screen units, a FLICK's synthetic drag sweeps through.
pub const FLICK_RADIUS: f32 = 40.0;

/// How many milliseconds of off-screen rescue search to try around a
/// FLICK's judgment time before falling back to clipping it on-screen.
pub const FLICK_RESCUE_WINDOW_MS: i64 = 5;

/// Lane-offset-to-screen-unit scale factor (`Note::x` is in lane units).
pub const LANE_WIDTH: f32 = 72.0;

/// Pointer reuse: an unused pointer farther than this from a DRAG/FLICK's
/// re-acquisition point is never considered for reuse.
pub const REUSE_MAX_DISTANCE: f32 = 120.0;
/// Pointer reuse: milliseconds of idle time considered equivalent to one
/// screen unit of distance when scoring reuse candidates.
pub const REUSE_TIME_PENALTY_DIVISOR: f32 = 50.0;

/// Default first pointer id handed out by a fresh `PointerManager`.
pub const DEFAULT_BEGIN_POINTER_ID: i64 = 1000;
/// Default increment between freshly allocated pointer ids.
pub const DEFAULT_POINTER_ID_DELTA: i64 = 1;
/// Default ceiling on concurrently live (held + unused-but-reusable)
/// pointers before the planner reports `PointerBudgetExceeded`.
pub const DEFAULT_MAX_POINTERS: usize = 15;

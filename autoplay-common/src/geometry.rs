//! Screen geometry helpers: projecting a raw judgment point onto the
//! visible screen and testing screen membership. Real device geometry
//! (aspect ratio, safe-area insets, notches) lives outside the
//! touch-planning core; `DeviceScreen` is a plain reference
//! implementation good enough to drive the Frame Synthesizer in tests
//! and the CLI.

use crate::core::Point;

/// Euclidean distance between two screen points.
///
/// Used directly by the Pointer Planner's reuse heuristic — trivial
/// enough that, unlike `in_screen`/`recalc_pos`, it doesn't need to go
/// through a device-specific trait.
pub fn distance_of(a: Point, b: Point) -> f32 {
    (a - b).norm()
}

/// Projects raw judgment-line geometry onto a device's visible screen.
pub trait ScreenGeometry {
    fn in_screen(&self, point: Point) -> bool;
    /// Clip `point` into the visible screen if it falls outside it.
    /// `sa`/`ca` are the sin/cos of the note's judgment-time line angle,
    /// available for implementations that want to clip along the line's
    /// direction rather than axis-aligned.
    fn recalc_pos(&self, point: Point, sa: f32, ca: f32) -> Point;
}

/// A rectangular device screen, origin at the top-left, positive y down.
#[derive(Clone, Copy, Debug)]
pub struct DeviceScreen {
    pub width: f32,
    pub height: f32,
}

impl DeviceScreen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for DeviceScreen {
    /// A common 1080x2220 portrait panel.
    fn default() -> Self {
        Self::new(1080.0, 2220.0)
    }
}

impl ScreenGeometry for DeviceScreen {
    fn in_screen(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    fn recalc_pos(&self, point: Point, _sa: f32, _ca: f32) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }
}

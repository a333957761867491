//! Pointer Planner: binds synthesized frame events to a bounded pool of
//! device pointer ids, producing a balanced DOWN/MOVE/UP touch timeline.
//!
//! `PointerManager` owns pointer lifecycle (acquire/release/recycle/
//! finish, id allocation and recycling); `plan_touch_events` is the
//! per-frame dispatch table deciding, for each `FrameAction`, whether a
//! pointer is freshly acquired, reused, moved, or released.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{
    DEFAULT_BEGIN_POINTER_ID, DEFAULT_MAX_POINTERS, DEFAULT_POINTER_ID_DELTA,
    REUSE_MAX_DISTANCE, REUSE_TIME_PENALTY_DIVISOR,
};
use crate::core::Point;
use crate::error::AutoplayError;
use crate::frame::{FrameAction, FrameEvent, FrameTimeline};
use crate::geometry::distance_of;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouchEvent {
    pub pos: Point,
    pub action: TouchAction,
    pub pointer_id: i64,
}

/// `ms -> touch events at that millisecond`.
pub type TouchTimeline = BTreeMap<i64, Vec<TouchEvent>>;

#[derive(Debug, Clone)]
struct Pointer {
    pid: i64,
    pos: Point,
    timestamp: i64,
    /// Keyframes survived since becoming unused; an unused pointer is
    /// only actually released once it's outlived one extra keyframe, so
    /// a TAP immediately followed by another note doesn't thrash ids.
    occupied: u32,
}

/// Allocates and recycles pointer ids across the whole timeline.
///
/// Pointer identity is keyed by the frame event's note id while a touch
/// is live (`pointers`), and by pointer id once a touch ends but might
/// still be reused by a later note (`unused`). `BTreeMap`/`BTreeSet` are
/// used throughout instead of hash collections so id allocation and
/// reuse tie-breaks are deterministic given the same chart.
pub struct PointerManager {
    begin: i64,
    delta: i64,
    max_pointers: usize,
    max_pointer_id: i64,
    now: i64,

    recycled: BTreeSet<i64>,
    pointers: BTreeMap<i64, Pointer>,
    unused: BTreeMap<i64, Pointer>,
    unused_now: BTreeMap<i64, Pointer>,
    mark_as_released: Vec<i64>,
}

impl PointerManager {
    pub fn new(begin: i64, delta: i64, max_pointers: usize) -> Self {
        Self {
            begin,
            delta,
            max_pointers,
            max_pointer_id: begin,
            now: 0,
            recycled: BTreeSet::new(),
            pointers: BTreeMap::new(),
            unused: BTreeMap::new(),
            unused_now: BTreeMap::new(),
            mark_as_released: Vec::new(),
        }
    }

    fn alloc(&mut self) -> i64 {
        if let Some(pid) = self.recycled.pop_first() {
            return pid;
        }
        let pid = self.max_pointer_id;
        self.max_pointer_id += self.delta;
        pid
    }

    fn free(&mut self, pointer_id: i64) {
        self.recycled.insert(pointer_id);
        let total_allocated = ((self.max_pointer_id - self.begin) / self.delta) as usize;
        if self.recycled.len() == total_allocated {
            self.max_pointer_id = self.begin;
            self.recycled.clear();
        }
    }

    /// Binds `event` to a pointer id. If the event's note already has a
    /// live pointer, that pointer is refreshed and returned. Otherwise,
    /// when `try_reuse` is set, the nearest suitable unused pointer
    /// (within `REUSE_MAX_DISTANCE`, time-decayed) is claimed; failing
    /// that, or when `try_reuse` is unset, a new pointer id is allocated.
    ///
    /// Returns `(pointer_id, freshly_allocated)`.
    pub fn acquire(&mut self, event: &FrameEvent, try_reuse: bool) -> (i64, bool) {
        if let Some(ptr) = self.pointers.get_mut(&event.id) {
            ptr.timestamp = self.now;
            ptr.pos = event.point;
            return (ptr.pid, false);
        }

        if try_reuse {
            let mut best: Option<(i64, f32)> = None;
            for ptr in self.unused.values() {
                let distance = distance_of(event.point, ptr.pos);
                if distance >= REUSE_MAX_DISTANCE {
                    continue;
                }
                let time_factor = (self.now - ptr.timestamp) as f32 / REUSE_TIME_PENALTY_DIVISOR;
                let score = distance + time_factor;
                if best.map_or(true, |(_, b)| score < b) {
                    best = Some((ptr.pid, score));
                }
            }
            if let Some((pid, _)) = best {
                let mut ptr = self.unused.remove(&pid).expect("pid came from unused");
                ptr.timestamp = self.now;
                ptr.pos = event.point;
                ptr.occupied = 0;
                self.pointers.insert(event.id, ptr);
                return (pid, false);
            }
        }

        let pid = self.alloc();
        self.pointers.insert(
            event.id,
            Pointer {
                pid,
                pos: event.point,
                timestamp: self.now,
                occupied: 0,
            },
        );
        (pid, true)
    }

    /// Marks the pointer bound to `event`'s note as done for now. It
    /// isn't freed until the next `recycle` call.
    pub fn release(&mut self, event: &FrameEvent) {
        if let Some(ptr) = self.pointers.get(&event.id) {
            self.unused_now.insert(ptr.pid, ptr.clone());
            self.mark_as_released.push(event.id);
        }
    }

    /// Drops every pointer released this frame, ages out unused pointers
    /// that have survived a keyframe, and returns the UP events those
    /// expirations produce. Errors if the live pointer count would
    /// exceed the configured budget.
    pub fn recycle(&mut self, is_keyframe: bool) -> Result<Vec<(i64, i64, Point)>, AutoplayError> {
        for event_id in self.mark_as_released.drain(..) {
            self.pointers.remove(&event_id);
        }

        let mut ups = Vec::new();
        if is_keyframe {
            let mut expired = Vec::new();
            for ptr in self.unused.values_mut() {
                ptr.occupied += 1;
                if ptr.occupied > 1 {
                    ups.push((ptr.pid, ptr.timestamp + 1, ptr.pos));
                    expired.push(ptr.pid);
                }
            }
            for pid in expired {
                self.unused.remove(&pid);
                self.free(pid);
            }
        }

        for (pid, ptr) in std::mem::take(&mut self.unused_now) {
            self.unused.insert(pid, ptr);
        }

        let live = self.unused.len() + self.pointers.len();
        if live > self.max_pointers {
            return Err(AutoplayError::PointerBudgetExceeded {
                ms: self.now,
                pointers: live,
                budget: self.max_pointers,
            });
        }

        Ok(ups)
    }

    /// Releases every pointer still alive at the end of the timeline.
    pub fn finish(&mut self) -> Vec<(i64, i64, Point)> {
        self.unused
            .values()
            .chain(self.unused_now.values())
            .chain(self.pointers.values())
            .map(|ptr| (ptr.pid, ptr.timestamp + 1, ptr.pos))
            .collect()
    }
}

impl Default for PointerManager {
    fn default() -> Self {
        Self::new(
            DEFAULT_BEGIN_POINTER_ID,
            DEFAULT_POINTER_ID_DELTA,
            DEFAULT_MAX_POINTERS,
        )
    }
}

/// Walks a frame timeline in order and produces the touch event timeline
/// a device could actually be fed, dispatching each `FrameAction` to the
/// pointer lifecycle operation it implies.
pub fn plan_touch_events(
    frames: &FrameTimeline,
    begin_pointer_id: i64,
    delta: i64,
    max_pointers: usize,
) -> Result<TouchTimeline, AutoplayError> {
    let mut pointers = PointerManager::new(begin_pointer_id, delta, max_pointers);
    let mut result: TouchTimeline = BTreeMap::new();
    let mut previous_ms: Option<i64> = None;

    let mut push = |result: &mut TouchTimeline, ms: i64, pos: Point, action: TouchAction, pid: i64| {
        result.entry(ms).or_default().push(TouchEvent {
            pos,
            action,
            pointer_id: pid,
        });
    };

    for (&ms, events) in frames.iter() {
        if let Some(previous) = previous_ms {
            if ms < previous {
                return Err(AutoplayError::MonotonicityViolation { ms, previous });
            }
        }
        previous_ms = Some(ms);
        pointers.now = ms;
        let mut is_keyframe = false;

        for event in events {
            match event.action {
                FrameAction::Tap => {
                    let (pid, _) = pointers.acquire(event, false);
                    push(&mut result, ms, event.point, TouchAction::Down, pid);
                    pointers.release(event);
                    is_keyframe = true;
                }
                FrameAction::Drag => {
                    let (pid, fresh) = pointers.acquire(event, true);
                    let action = if fresh { TouchAction::Down } else { TouchAction::Move };
                    push(&mut result, ms, event.point, action, pid);
                    pointers.release(event);
                }
                FrameAction::FlickStart => {
                    let (pid, fresh) = pointers.acquire(event, true);
                    let action = if fresh { TouchAction::Down } else { TouchAction::Move };
                    push(&mut result, ms, event.point, action, pid);
                }
                FrameAction::Flick | FrameAction::Hold => {
                    let (pid, _) = pointers.acquire(event, false);
                    push(&mut result, ms, event.point, TouchAction::Move, pid);
                }
                FrameAction::FlickEnd | FrameAction::HoldEnd => {
                    let (pid, _) = pointers.acquire(event, false);
                    push(&mut result, ms, event.point, TouchAction::Move, pid);
                    pointers.release(event);
                }
                FrameAction::HoldStart => {
                    let (pid, _) = pointers.acquire(event, false);
                    push(&mut result, ms, event.point, TouchAction::Down, pid);
                    is_keyframe = true;
                }
            }
        }

        for (pid, ts, pos) in pointers.recycle(is_keyframe)? {
            push(&mut result, ts, pos, TouchAction::Up, pid);
        }
    }

    for (pid, ts, pos) in pointers.finish() {
        push(&mut result, ts, pos, TouchAction::Up, pid);
    }

    Ok(result)
}

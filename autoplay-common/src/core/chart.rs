//! Chart data structures: notes, judgment lines, and the judge-line
//! kinematics contract the touch-planning engine is built against.
//!
//! No rendering state (judge status, UI attachments, textures), no
//! authoring metadata. A judge line's notes are owned directly by it.

use super::object::Object;
use super::{BpmList, Point};
use crate::constants::LANE_WIDTH;
use serde::{Deserialize, Serialize};

// ============================================================================
// Notes
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NoteKind {
    Tap,
    Drag,
    Flick,
    /// `hold` is the duration of the hold, in chart time (beats).
    Hold { hold: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub kind: NoteKind,
    /// Judgment time, in chart time (beats).
    pub time: f32,
    /// Lane offset; the Frame Synthesizer multiplies this by 72 to get
    /// screen units.
    pub x: f32,
}

impl Note {
    pub fn new(kind: NoteKind, time: f32, x: f32) -> Self {
        Self { kind, time, x }
    }
}

// ============================================================================
// Judgment line contract (external collaborator)
// ============================================================================

/// What the Frame Synthesizer needs from a judgment line. Chart parsing
/// and the real kinematic model (easing, multi-line attachment, perspective
/// incline, ...) are out of scope for the touch-planning core; this trait
/// is the seam between the core and whatever supplies that model.
pub trait JudgmentLine {
    /// Chart time (beats) to seconds.
    fn seconds(&mut self, beat: f32) -> f32;
    /// Seconds to chart time (beats) — inverse of `seconds`.
    fn time(&mut self, seconds: f32) -> f32;
    /// Line position at the given chart time.
    fn pos(&mut self, beat: f32) -> Point;
    /// Line rotation, in degrees, at the given chart time.
    fn angle(&mut self, beat: f32) -> f32;
    /// Screen position of `note`'s anchor at the given chart time — used
    /// to track a HOLD tail as the line keeps moving after judgment.
    fn pos_of(&mut self, note: &Note, beat: f32) -> Point;
    fn notes(&self) -> &[Note];
}

// ============================================================================
// Reference judgment line implementation
// ============================================================================

/// A judgment line driven by linear keyframe motion and a BPM list.
///
/// This is the crate's one concrete `JudgmentLine`, standing in for a
/// real chart-format-specific kinematic model — out of scope here, since
/// this crate only needs something that can answer `pos`/`angle`/`seconds`
/// queries, not parse an actual chart format.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct JudgeLine {
    pub object: Object,
    pub bpm: BpmList,
    pub notes: Vec<Note>,
}

impl JudgeLine {
    pub fn new(bpm: BpmList, notes: Vec<Note>) -> Self {
        Self {
            object: Object::default(),
            bpm,
            notes,
        }
    }
}

impl JudgmentLine for JudgeLine {
    fn seconds(&mut self, beat: f32) -> f32 {
        self.bpm.seconds(beat)
    }

    fn time(&mut self, seconds: f32) -> f32 {
        self.bpm.time(seconds)
    }

    fn pos(&mut self, beat: f32) -> Point {
        self.object.set_time(beat);
        let v = self.object.now_translation();
        Point::new(v.x, v.y)
    }

    fn angle(&mut self, beat: f32) -> f32 {
        self.object.set_time(beat);
        self.object.now_rotation()
    }

    fn pos_of(&mut self, note: &Note, beat: f32) -> Point {
        let off_x = note.x * LANE_WIDTH;
        let center = self.pos(beat);
        let alpha = -self.angle(beat).to_radians();
        Point::new(
            center.x + off_x * alpha.cos(),
            center.y + off_x * alpha.sin(),
        )
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }
}

// ============================================================================
// Chart
// ============================================================================

/// A complete chart: every judgment line and the notes attached to it.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Chart {
    pub lines: Vec<JudgeLine>,
}

impl Chart {
    pub fn new(lines: Vec<JudgeLine>) -> Self {
        Self { lines }
    }

    pub fn note_count(&self) -> usize {
        self.lines.iter().map(|l| l.notes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anim::{AnimFloat, Keyframe};

    #[test]
    fn pos_of_follows_line_translation() {
        let mut line = JudgeLine::new(
            BpmList::new(vec![(0.0, 120.0)]),
            vec![Note::new(NoteKind::Hold { hold: 1.0 }, 0.0, 1.0)],
        );
        line.object.translation.x = AnimFloat::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(4.0, 400.0),
        ]);
        let note = line.notes[0];
        let p0 = line.pos_of(&note, 0.0);
        let p1 = line.pos_of(&note, 4.0);
        assert!((p1.x - p0.x - 400.0).abs() < 0.01);
    }

    #[test]
    fn chart_counts_notes_across_lines() {
        let a = JudgeLine::new(
            BpmList::default(),
            vec![Note::new(NoteKind::Tap, 0.0, 0.0)],
        );
        let b = JudgeLine::new(
            BpmList::default(),
            vec![Note::new(NoteKind::Drag, 1.0, 0.0), Note::new(NoteKind::Flick, 2.0, 0.0)],
        );
        let chart = Chart::new(vec![a, b]);
        assert_eq!(chart.note_count(), 3);
    }
}

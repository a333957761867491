//! BPM list for beat-to-time conversion.
//!
//! Backs a judgment line's `seconds`/`time` conversions.
use serde::{Deserialize, Serialize};

/// Stores BPM changes and converts between beat position and seconds.
#[derive(Clone, Serialize, Deserialize)]
pub struct BpmList {
    /// (beats, time_seconds, bpm)
    elements: Vec<(f32, f32, f32)>,
    #[serde(skip)]
    cursor: usize,
}

impl Default for BpmList {
    fn default() -> Self {
        Self {
            elements: vec![(0.0, 0.0, 120.0)],
            cursor: 0,
        }
    }
}

impl BpmList {
    /// Build from a list of (beat, bpm) change points, computing the time
    /// offset of each change point from the ones before it.
    pub fn new(ranges: Vec<(f32, f32)>) -> Self {
        if ranges.is_empty() {
            return Self::default();
        }

        let mut elements = Vec::with_capacity(ranges.len());
        let mut time = 0.0;
        let mut last_beats = 0.0;
        let mut last_bpm: Option<f32> = None;

        for (now_beats, bpm) in ranges {
            if let Some(prev_bpm) = last_bpm {
                time += (now_beats - last_beats) * (60.0 / prev_bpm);
            }
            last_beats = now_beats;
            last_bpm = Some(bpm);
            elements.push((now_beats, time, bpm));
        }

        BpmList { elements, cursor: 0 }
    }

    /// Chart time (beats) to seconds.
    pub fn seconds(&mut self, beats: f32) -> f32 {
        self.seek_by_beats(beats);
        let (start_beats, time, bpm) = &self.elements[self.cursor];
        time + (beats - start_beats) * (60.0 / bpm)
    }

    /// Seconds to chart time (beats) — inverse of `seconds`.
    pub fn time(&mut self, seconds: f32) -> f32 {
        self.seek_by_time(seconds);
        let (beats, start_time, bpm) = &self.elements[self.cursor];
        beats + (seconds - start_time) / (60.0 / bpm)
    }

    fn seek_by_beats(&mut self, beats: f32) {
        while let Some(kf) = self.elements.get(self.cursor + 1) {
            if kf.0 > beats {
                break;
            }
            self.cursor += 1;
        }
        while self.cursor != 0 && self.elements[self.cursor].0 > beats {
            self.cursor -= 1;
        }
    }

    fn seek_by_time(&mut self, time: f32) {
        while let Some(kf) = self.elements.get(self.cursor + 1) {
            if kf.1 > time {
                break;
            }
            self.cursor += 1;
        }
        while self.cursor != 0 && self.elements[self.cursor].1 > time {
            self.cursor -= 1;
        }
    }
}

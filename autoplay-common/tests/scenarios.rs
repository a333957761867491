//! Scenario and invariant tests for the touch-planning pipeline, run
//! end to end: chart -> Frame Synthesizer -> Pointer Planner.

use autoplay_common::core::{AnimFloat, BpmList, JudgeLine, Keyframe, Note, NoteKind};
use autoplay_common::diagnostics::{Diagnostic, VecSink};
use autoplay_common::geometry::{DeviceScreen, ScreenGeometry};
use autoplay_common::{plan_touch_events, synthesize_frames, AutoplayError, TouchAction};

/// A line at 60 BPM, where one beat equals exactly one second, so test
/// math can be done directly in milliseconds.
fn stationary_line_at(x: f32, y: f32, notes: Vec<Note>) -> JudgeLine {
    let mut line = JudgeLine::new(BpmList::new(vec![(0.0, 60.0)]), notes);
    line.object.translation.x = AnimFloat::fixed(x);
    line.object.translation.y = AnimFloat::fixed(y);
    line
}

fn plan(mut lines: Vec<JudgeLine>, screen: &DeviceScreen) -> autoplay_common::TouchTimeline {
    let mut sink = VecSink::new();
    let frames = synthesize_frames(&mut lines, screen, &mut sink);
    plan_touch_events(&frames, 1000, 1, 15).expect("planning should succeed")
}

// S1 — single TAP.
#[test]
fn s1_single_tap() {
    let screen = DeviceScreen::default();
    let line = stationary_line_at(500.0, 800.0, vec![Note::new(NoteKind::Tap, 1.0, 0.0)]);
    let timeline = plan(vec![line], &screen);

    let down = &timeline[&1000][0];
    assert_eq!(down.action, TouchAction::Down);
    assert_eq!(down.pointer_id, 1000);
    assert_eq!((down.pos.x, down.pos.y), (500.0, 800.0));

    let up = &timeline[&1001][0];
    assert_eq!(up.action, TouchAction::Up);
    assert_eq!(up.pointer_id, 1000);
}

// S2 — TAP then DRAG re-binds the same pointer.
#[test]
fn s2_tap_then_nearby_drag_reuses_pointer() {
    let screen = DeviceScreen::default();
    let mut line = JudgeLine::new(BpmList::new(vec![(0.0, 60.0)]), vec![
        Note::new(NoteKind::Tap, 1.0, 0.0),
        Note::new(NoteKind::Drag, 1.02, 0.0),
    ]);
    line.object.translation.x = AnimFloat::new(vec![Keyframe::new(1.0, 500.0), Keyframe::new(1.02, 510.0)]);
    line.object.translation.y = AnimFloat::new(vec![Keyframe::new(1.0, 800.0), Keyframe::new(1.02, 810.0)]);

    let timeline = plan(vec![line], &screen);

    let down = &timeline[&1000][0];
    assert_eq!(down.action, TouchAction::Down);
    assert_eq!(down.pointer_id, 1000);

    let moved = &timeline[&1020][0];
    assert_eq!(moved.action, TouchAction::Move);
    assert_eq!(moved.pointer_id, 1000, "drag within reuse distance should keep the tap's pointer");

    let all_pids: std::collections::BTreeSet<i64> =
        timeline.values().flatten().map(|e| e.pointer_id).collect();
    assert_eq!(all_pids.len(), 1);
}

// S3 — FLICK centered at ms 500.
#[test]
fn s3_flick_spans_its_window_and_uses_one_pointer() {
    let screen = DeviceScreen::default();
    let line = stationary_line_at(400.0, 400.0, vec![Note::new(NoteKind::Flick, 0.5, 0.0)]);
    let timeline = plan(vec![line], &screen);

    assert!(timeline.contains_key(&480));
    assert!(timeline.contains_key(&520));
    let intermediate_ms: Vec<_> = timeline.keys().filter(|&&ms| ms > 480 && ms < 520).collect();
    assert!(!intermediate_ms.is_empty(), "flick should sample at least one intermediate point");

    for event in timeline.values().flatten() {
        let dx = event.pos.x - 400.0;
        let dy = event.pos.y - 400.0;
        assert!((dx * dx + dy * dy).sqrt() <= 40.0 + 0.001);
    }

    let pids: std::collections::BTreeSet<i64> =
        timeline.values().flatten().map(|e| e.pointer_id).collect();
    assert_eq!(pids.len(), 1);
}

// S4 — HOLD with hold_ms = 100 starting at ms 2000.
#[test]
fn s4_hold_samples_every_5ms_and_ends() {
    let screen = DeviceScreen::default();
    let line = stationary_line_at(300.0, 300.0, vec![Note::new(NoteKind::Hold { hold: 0.1 }, 2.0, 0.0)]);
    let timeline = plan(vec![line], &screen);

    assert_eq!(timeline[&2000][0].action, TouchAction::Down);
    for ms in (2005..2100).step_by(5) {
        assert!(timeline.contains_key(&ms), "expected a sample at {ms}ms");
    }
    assert!(timeline.contains_key(&2099));

    let last_ms = *timeline.keys().last().unwrap();
    assert!(last_ms == 2100 || last_ms == 2101);
    assert_eq!(timeline[&last_ms].last().unwrap().action, TouchAction::Up);
}

// S5 — pointer budget breach.
#[test]
fn s5_pointer_budget_breach_is_reported() {
    let screen = DeviceScreen::new(20000.0, 20000.0);
    let notes: Vec<_> = (0..20)
        .map(|i| Note::new(NoteKind::Hold { hold: 10.0 }, i as f32 * 0.001, i as f32))
        .collect();
    let line = JudgeLine::new(BpmList::new(vec![(0.0, 60.0)]), notes);
    let mut lines = vec![line];
    let mut sink = VecSink::new();
    let frames = synthesize_frames(&mut lines, &screen, &mut sink);

    let result = plan_touch_events(&frames, 1000, 1, 15);
    match result {
        Err(AutoplayError::PointerBudgetExceeded { pointers, budget, .. }) => {
            assert!(pointers > budget);
        }
        other => panic!("expected PointerBudgetExceeded, got {other:?}"),
    }
}

// S6 — off-screen FLICK rescued by a +3ms micro-adjustment.
#[test]
fn s6_off_screen_flick_is_rescued() {
    let screen = DeviceScreen::default();
    let mut line = JudgeLine::new(BpmList::new(vec![(0.0, 60.0)]), vec![Note::new(NoteKind::Flick, 1.0, 0.0)]);
    line.object.translation.x = AnimFloat::new(vec![Keyframe::new(1.002, -50.0), Keyframe::new(1.003, 500.0)]);
    line.object.translation.y = AnimFloat::fixed(800.0);

    let mut sink = VecSink::new();
    let frames = synthesize_frames(&mut vec![line], &screen, &mut sink);

    assert_eq!(sink.0.len(), 1);
    match &sink.0[0] {
        Diagnostic::OffScreenFlick { original, adjusted, rescued_at_ms, .. } => {
            assert!(original.x < 0.0, "original point should have been off-screen");
            assert_eq!(*rescued_at_ms, Some(3));
            assert!(screen.in_screen(*adjusted));
        }
        other => panic!("expected OffScreenFlick, got {other:?}"),
    }

    for event in frames.values().flatten() {
        assert!(screen.in_screen(event.point));
    }
}

// General invariants across a denser, mixed chart.
fn mixed_chart() -> Vec<JudgeLine> {
    let notes = vec![
        Note::new(NoteKind::Tap, 0.0, 0.0),
        Note::new(NoteKind::Drag, 0.02, 1.0),
        Note::new(NoteKind::Flick, 1.0, 2.0),
        Note::new(NoteKind::Hold { hold: 0.5 }, 2.0, -1.0),
        Note::new(NoteKind::Tap, 3.0, 3.0),
    ];
    vec![stationary_line_at(400.0, 600.0, notes)]
}

#[test]
fn invariant_balanced_down_move_up_per_pointer() {
    // A pointer id can be recycled and reused by an unrelated note later
    // in the same run, so the invariant is checked per maximal run
    // between a DOWN and its matching UP, not over a pid's whole history.
    let screen = DeviceScreen::default();
    let timeline = plan(mixed_chart(), &screen);

    let mut by_pointer: std::collections::BTreeMap<i64, Vec<TouchAction>> = Default::default();
    for events in timeline.values() {
        for event in events {
            by_pointer.entry(event.pointer_id).or_default().push(event.action);
        }
    }

    for (pid, actions) in by_pointer {
        let mut expect_down = true;
        for action in actions {
            if expect_down {
                assert_eq!(action, TouchAction::Down, "pointer {pid} run must open with DOWN");
                expect_down = false;
            } else if action == TouchAction::Up {
                expect_down = true;
            } else {
                assert_eq!(action, TouchAction::Move, "pointer {pid} saw unexpected DOWN mid-run");
            }
        }
        assert!(expect_down, "pointer {pid}'s final run never closed with UP");
    }
}

#[test]
fn invariant_bounded_concurrency() {
    let screen = DeviceScreen::default();
    let timeline = plan(mixed_chart(), &screen);

    let mut open = std::collections::BTreeSet::new();
    let mut max_open = 0;
    for events in timeline.values() {
        for event in events {
            match event.action {
                TouchAction::Down => {
                    open.insert(event.pointer_id);
                }
                TouchAction::Up => {
                    open.remove(&event.pointer_id);
                }
                TouchAction::Move => {}
            }
        }
        max_open = max_open.max(open.len());
    }
    assert!(max_open <= 15);
}

#[test]
fn invariant_determinism() {
    let screen = DeviceScreen::default();
    let a = plan(mixed_chart(), &screen);
    let b = plan(mixed_chart(), &screen);
    assert_eq!(a, b);
}

//! Non-fatal oddities surfaced while synthesizing frames.
//!
//! Modeled as data and routed through an injected `DiagnosticSink`
//! rather than printed inline, so a CLI can log them, a library caller
//! can collect them, and tests can assert on them directly.

use crate::core::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A FLICK's judgment-time position fell off screen and had to be
    /// rescued by searching nearby judgment times, or — failing that —
    /// clipped onto the screen outright.
    OffScreenFlick {
        event_id: i64,
        original: Point,
        adjusted: Point,
        /// `Some(ms)` if a nearby in-bounds judgment time was found and
        /// used instead of the note's own; `None` if the point was
        /// simply clipped onto the screen.
        rescued_at_ms: Option<i64>,
    },

    /// A HOLD note has a non-positive duration once converted to
    /// milliseconds, so it degenerates into a single DOWN/UP pair with
    /// no sampled drag in between.
    DegenerateHold { event_id: i64, ms: i64 },
}

/// Where a `Diagnostic` is reported. Implementations never affect the
/// plan that's produced — they only observe it.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in the order they're reported, for tests and for
/// library callers that want to inspect them after the fact.
#[derive(Debug, Default)]
pub struct VecSink(pub Vec<Diagnostic>);

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for VecSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade at `warn` level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::OffScreenFlick {
                event_id,
                original,
                adjusted,
                rescued_at_ms: Some(ms),
            } => log::warn!(
                "flick {event_id} off-screen at ({:.1}, {:.1}), rescued at {ms}ms -> ({:.1}, {:.1})",
                original.x,
                original.y,
                adjusted.x,
                adjusted.y
            ),
            Diagnostic::OffScreenFlick {
                event_id,
                original,
                adjusted,
                rescued_at_ms: None,
            } => log::warn!(
                "flick {event_id} off-screen at ({:.1}, {:.1}), clipped to ({:.1}, {:.1})",
                original.x,
                original.y,
                adjusted.x,
                adjusted.y
            ),
            Diagnostic::DegenerateHold { event_id, ms } => {
                log::warn!("hold {event_id} has non-positive duration ({ms}ms)")
            }
        }
    }
}

//! Fatal errors the touch-planning core can raise.
//!
//! Everything here is unrecoverable for the plan being computed — unlike
//! `crate::diagnostics`, which carries non-fatal oddities a plan can
//! still be produced despite. Modeled on `octotablet`'s `ManagerError`:
//! a small, closed `thiserror` enum at the crate's one real failure
//! boundary, rather than a grab-bag `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    /// More pointers would need to be concurrently live than the
    /// configured budget allows.
    #[error("pointer budget exceeded at {ms}ms: {pointers} pointers in use, budget is {budget}")]
    PointerBudgetExceeded {
        ms: i64,
        pointers: usize,
        budget: usize,
    },

    /// The planner was asked to process a frame timestamp at or before
    /// one it already processed — frames must be visited in non-decreasing
    /// millisecond order.
    #[error("frame timestamps must be non-decreasing: saw {ms}ms after {previous}ms")]
    MonotonicityViolation { ms: i64, previous: i64 },
}

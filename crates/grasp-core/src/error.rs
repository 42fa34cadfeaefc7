// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Host contract violations reported by transformers.
///
/// Numerical hazards (degenerate offsets, non-finite ratios, out-of-range
/// values) never surface here; they are neutralised or clamped in place.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrabError {
    /// `begin_transform`/`update_transform` called with zero grab points.
    #[error("no active grab points")]
    NoGrabPoints,
    /// The grab-point count changed mid-session; end and begin a new session.
    #[error("grab point count changed mid-session: expected {expected}, got {actual}")]
    PointCountChanged {
        /// Count captured at session start.
        expected: usize,
        /// Count supplied this tick.
        actual: usize,
    },
    /// `update_transform`/`end_transform` called without a session in progress.
    #[error("no grab session in progress")]
    NoActiveSession,
}

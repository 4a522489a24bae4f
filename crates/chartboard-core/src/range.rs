// File: crates/chartboard-core/src/range.rs
// Summary: Ordered-or-not start/end pair used by every axis and data window.

use chrono::{DateTime, Utc};

/// A `{start, end}` pair. The two ends may come in either order; use
/// [`Range::lo`] / [`Range::hi`] rather than assuming `start < end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + PartialOrd> Range<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    pub fn lo(&self) -> T {
        if self.end < self.start { self.end } else { self.start }
    }

    pub fn hi(&self) -> T {
        if self.end < self.start { self.start } else { self.end }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, v: T) -> bool {
        v >= self.lo() && v <= self.hi()
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

impl Range<f64> {
    pub fn span(&self) -> f64 {
        (self.end - self.start).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

impl Range<DateTime<Utc>> {
    pub fn span_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds().abs()
    }

    pub fn lo_ms(&self) -> i64 {
        self.lo().timestamp_millis()
    }

    pub fn hi_ms(&self) -> i64 {
        self.hi().timestamp_millis()
    }
}

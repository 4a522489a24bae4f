// File: crates/chartboard-core/src/ticks.rs
// Summary: Tick spacing selection for the time axis and nice-number ticks for value axes.

use chrono::{DateTime, TimeDelta, Utc};

use crate::range::Range;

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Canonical time spacings, ascending.
pub const DEFAULT_LADDER: [i64; 14] = [
    MINUTE_MS,
    5 * MINUTE_MS,
    10 * MINUTE_MS,
    15 * MINUTE_MS,
    30 * MINUTE_MS,
    HOUR_MS,
    14_000_000, // ~3.9h
    6 * HOUR_MS,
    12 * HOUR_MS,
    DAY_MS,
    3 * DAY_MS,
    7 * DAY_MS,
    10 * DAY_MS,
    31 * DAY_MS,
];

/// Chosen spacing plus the tick instants it produced. `spacing_ms == 0`
/// means nothing fit and `ticks` is empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSelection {
    pub spacing_ms: i64,
    pub ticks: Vec<DateTime<Utc>>,
}

impl TickSelection {
    pub fn is_empty(&self) -> bool { self.ticks.is_empty() }
}

/// Picks the first ladder spacing whose tick count fits the pixel budget.
#[derive(Clone, Debug)]
pub struct TickSelector {
    ladder: Vec<i64>,
    min_bars: i64,
    label_width_px: f64,
}

impl Default for TickSelector {
    fn default() -> Self {
        Self { ladder: DEFAULT_LADDER.to_vec(), min_bars: 3, label_width_px: 50.0 }
    }
}

impl TickSelector {
    /// Replace the spacing ladder. Entries are sorted ascending and
    /// non-positive spacings dropped.
    pub fn with_ladder(mut self, mut ladder: Vec<i64>) -> Self {
        ladder.retain(|s| *s > 0);
        ladder.sort_unstable();
        ladder.dedup();
        self.ladder = ladder;
        self
    }

    pub fn with_label_width(mut self, px: f64) -> Self {
        self.label_width_px = px;
        self
    }

    pub fn with_min_bars(mut self, min_bars: i64) -> Self {
        self.min_bars = min_bars;
        self
    }

    pub fn ladder(&self) -> &[i64] { &self.ladder }

    /// Upper bound on ticks for a given width (`floor(width / label_width)`).
    pub fn max_bars(&self, width: f64) -> i64 {
        if !(self.label_width_px > 0.0) || !width.is_finite() {
            return 0;
        }
        (width / self.label_width_px).floor().max(0.0) as i64
    }

    pub fn select_spacing(
        &self,
        width: f64,
        interval: TimeDelta,
        range: &Range<DateTime<Utc>>,
    ) -> Option<i64> {
        let max_bars = self.max_bars(width);
        let range_ms = range.span_ms() as f64;
        let interval_ms = interval.num_milliseconds();
        let chosen = self
            .ladder
            .iter()
            .copied()
            .filter(|spacing| *spacing >= interval_ms)
            .find(|spacing| {
                let bars = (range_ms / *spacing as f64 + 1.0).ceil() as i64;
                bars >= self.min_bars && bars <= max_bars
            });
        tracing::trace!(width, max_bars, range_ms, ?chosen, "tick spacing");
        chosen
    }

    pub fn select(
        &self,
        width: f64,
        interval: TimeDelta,
        range: &Range<DateTime<Utc>>,
    ) -> TickSelection {
        match self.select_spacing(width, interval, range) {
            Some(spacing_ms) => TickSelection { spacing_ms, ticks: generate_ticks(spacing_ms, range) },
            None => TickSelection::default(),
        }
    }
}

/// Every multiple of `spacing_ms` (since the epoch) inside the range,
/// both ends inclusive.
pub fn generate_ticks(spacing_ms: i64, range: &Range<DateTime<Utc>>) -> Vec<DateTime<Utc>> {
    if spacing_ms <= 0 {
        return Vec::new();
    }
    let lo = range.lo_ms();
    let hi = range.hi_ms();
    let mut t = lo.div_euclid(spacing_ms) * spacing_ms;
    if t < lo {
        t += spacing_ms;
    }
    let mut out = Vec::new();
    while t <= hi {
        if let Some(dt) = DateTime::<Utc>::from_timestamp_millis(t) {
            out.push(dt);
        }
        t += spacing_ms;
    }
    out
}

/// `YYYY-M-D H:MM`, e.g. `2017-1-5 9:30`.
pub fn format_tick_label(date: DateTime<Utc>) -> String {
    date.format("%Y-%-m-%-d %-H:%M").to_string()
}

/// Round a raw step to 1, 2 or 5 times a power of ten.
pub fn nice_step(span: f64, target_count: usize) -> f64 {
    if !(span > 0.0 && span.is_finite()) || target_count == 0 {
        return 0.0;
    }
    let raw = span / target_count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Value ticks spaced at least `min_spacing_px` apart on an axis `length_px` long.
pub fn value_ticks(range: Range<f64>, length_px: f64, min_spacing_px: f64) -> Vec<f64> {
    if !range.is_finite() || !(min_spacing_px > 0.0) || !(length_px > 0.0) {
        return Vec::new();
    }
    let target = (length_px / min_spacing_px).floor().max(1.0) as usize;
    let step = nice_step(range.span(), target);
    if step <= 0.0 {
        return Vec::new();
    }
    let first = (range.lo() / step).ceil() as i64;
    let last = (range.hi() / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

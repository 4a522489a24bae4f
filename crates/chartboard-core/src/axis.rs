// File: crates/chartboard-core/src/axis.rs
// Summary: Numeric and time axes mapping data space to pixels, with pan/zoom hooks.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{ChartError, ChartResult};
use crate::range::Range;

/// Pan/zoom operations shared by every axis. Implementations replace their
/// held range in one assignment so no caller ever sees half an update.
pub trait Axis {
    fn width(&self) -> f64;
    fn set_width(&mut self, width: f64);
    /// Pan by a pixel delta.
    fn move_by(&mut self, pixel_delta: f64);
    /// Zoom: positive direction zooms in, negative zooms out.
    fn scale(&mut self, direction: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Pixel 0 maps to the low end of the range.
    Forward,
    /// Pixel 0 maps to the high end (screen Y grows downward).
    Reversed,
}

/// Linear value axis. Used for price panes whose range is recomputed every
/// render pass, so pan and zoom do nothing here.
#[derive(Clone, Debug)]
pub struct NumericAxis {
    range: Range<f64>,
    width: f64,
    interval: f64,
    orientation: Orientation,
}

impl NumericAxis {
    pub fn new(width: f64, interval: f64, range: Range<f64>) -> Self {
        Self { range, width, interval, orientation: Orientation::Forward }
    }

    /// Axis laid out top to bottom: larger values get smaller pixel offsets.
    pub fn vertical(height: f64, interval: f64, range: Range<f64>) -> Self {
        Self { range, width: height, interval, orientation: Orientation::Reversed }
    }

    pub fn range(&self) -> Range<f64> { self.range }
    pub fn interval(&self) -> f64 { self.interval }
    pub fn orientation(&self) -> Orientation { self.orientation }

    pub fn set_range(&mut self, range: Range<f64>) {
        self.range = range;
    }

    /// `width * (value - lo) / |end - start|`. A zero or non-finite span is
    /// the caller's problem; it maps everything to 0 rather than NaN.
    pub fn to_x(&self, value: f64) -> f64 {
        let span = self.range.span();
        if !(span > 0.0 && span.is_finite()) {
            return 0.0;
        }
        let t = self.width * (value - self.range.lo()) / span;
        match self.orientation {
            Orientation::Forward => t,
            Orientation::Reversed => self.width - t,
        }
    }

    /// Inverse of [`NumericAxis::to_x`].
    pub fn value_at(&self, pixel: f64) -> f64 {
        if self.width <= 0.0 {
            return self.range.lo();
        }
        let t = match self.orientation {
            Orientation::Forward => pixel,
            Orientation::Reversed => self.width - pixel,
        };
        self.range.lo() + t / self.width * self.range.span()
    }
}

impl Axis for NumericAxis {
    fn width(&self) -> f64 { self.width }
    fn set_width(&mut self, width: f64) { self.width = width.max(0.0); }
    fn move_by(&mut self, _pixel_delta: f64) {}
    fn scale(&mut self, _direction: f64) {}
}

/// Zoom factors and the interval-unit window the visible span must stay in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPolicy {
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub min_units: f64,
    pub max_units: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self { zoom_in_factor: 0.9, zoom_out_factor: 1.1, min_units: 10.0, max_units: 1000.0 }
    }
}

/// Horizontal date axis shared by every pane of a board.
#[derive(Clone, Debug)]
pub struct TimeAxis {
    range: Range<DateTime<Utc>>,
    width: f64,
    interval: TimeDelta,
    zoom: ZoomPolicy,
}

impl TimeAxis {
    /// A zero interval is treated as one millisecond and a zero-length range
    /// is widened backwards by one interval.
    pub fn new(width: f64, interval: TimeDelta, range: Range<DateTime<Utc>>) -> Self {
        let interval = if interval.num_milliseconds() <= 0 { TimeDelta::milliseconds(1) } else { interval };
        let range = if range.start == range.end {
            Range::new(range.end - interval, range.end)
        } else {
            range
        };
        Self { range, width: width.max(0.0), interval, zoom: ZoomPolicy::default() }
    }

    pub fn with_zoom_policy(mut self, zoom: ZoomPolicy) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn range(&self) -> Range<DateTime<Utc>> { self.range }
    pub fn interval(&self) -> TimeDelta { self.interval }
    pub fn zoom_policy(&self) -> ZoomPolicy { self.zoom }

    pub fn set_range(&mut self, range: Range<DateTime<Utc>>) {
        if range.start != range.end {
            self.range = range;
        }
    }

    /// Pixel offset of `date`. Dates outside the range are a hard error:
    /// they mean whoever is drawing fetched a window the axis does not show.
    pub fn to_x(&self, date: DateTime<Utc>) -> ChartResult<f64> {
        if !self.range.contains(date) {
            return Err(ChartError::OutOfRange {
                date,
                start: self.range.start,
                end: self.range.end,
            });
        }
        let span = self.range.span_ms();
        if span == 0 {
            return Ok(0.0);
        }
        let from_lo = (date - self.range.lo()).num_milliseconds();
        Ok(self.width * from_lo as f64 / span as f64)
    }

    /// Date under a pixel offset (not clamped).
    pub fn date_at(&self, pixel: f64) -> DateTime<Utc> {
        if self.width <= 0.0 {
            return self.range.lo();
        }
        let ms = (pixel / self.width * self.range.span_ms() as f64).round() as i64;
        self.range.lo() + TimeDelta::milliseconds(ms)
    }

    /// Visible span measured in interval units.
    pub fn units(&self) -> f64 {
        self.range.span_ms() as f64 / self.interval.num_milliseconds() as f64
    }
}

impl Axis for TimeAxis {
    fn width(&self) -> f64 { self.width }

    fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
    }

    fn move_by(&mut self, pixel_delta: f64) {
        if pixel_delta == 0.0 || !pixel_delta.is_finite() || self.width <= 0.0 {
            return;
        }
        let delta_ms = (pixel_delta * self.range.span_ms() as f64 / self.width).round() as i64;
        if delta_ms == 0 {
            return;
        }
        // dragging right reveals earlier dates
        let delta = TimeDelta::milliseconds(delta_ms);
        self.range = Range::new(self.range.start - delta, self.range.end - delta);
        tracing::debug!(pixel_delta, delta_ms, "time axis moved");
    }

    fn scale(&mut self, direction: f64) {
        if direction == 0.0 || direction.is_nan() {
            return;
        }
        let span = self.range.span_ms() as f64;
        let unit = self.interval.num_milliseconds() as f64;
        // the unit bounds only stop travel; a span already past a bound is
        // never pushed back across it by the opposite gesture
        let next = if direction > 0.0 {
            (span * self.zoom.zoom_in_factor).max(unit * self.zoom.min_units).min(span)
        } else {
            (span * self.zoom.zoom_out_factor).min(unit * self.zoom.max_units).max(span)
        };
        let next_ms = (next.round() as i64).max(1);
        if next_ms == self.range.span_ms() {
            return;
        }
        let end = self.range.end;
        self.range = Range::new(end - TimeDelta::milliseconds(next_ms), end);
        tracing::debug!(direction, span_ms = next_ms, "time axis scaled");
    }
}

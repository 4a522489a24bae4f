// File: crates/chartboard-core/src/stack.rs
// Summary: Charts and chart stacks: one pane of overlaid series sharing a derived value axis.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};

use crate::axis::{Axis, NumericAxis, TimeAxis};
use crate::canvas::DrawingTarget;
use crate::error::{ChartError, ChartResult};
use crate::event::{Event, SubscriptionId};
use crate::layout::Frame;
use crate::range::Range;
use crate::render::{CrosshairRenderer, RendererRegistry, TimeAxisRenderer, ValueAxisRenderer};
use crate::series::{Candle, Point, SeriesData, SeriesKind};
use crate::source::{DataSource, DateChanged};
use crate::ticks::TickSelection;

/// Value range used when a pane has nothing to show.
pub const DEFAULT_VALUE_RANGE: Range<f64> = Range::new(0.0, 100.0);

/// A data source of either record shape.
#[derive(Clone)]
pub enum SeriesSource {
    Candles(Rc<dyn DataSource<Candle>>),
    Points(Rc<dyn DataSource<Point>>),
}

impl SeriesSource {
    pub fn fetch(&self, range: &Range<DateTime<Utc>>) -> SeriesData {
        match self {
            SeriesSource::Candles(s) => SeriesData::Candles(s.get_data(range)),
            SeriesSource::Points(s) => SeriesData::Points(s.get_data(range)),
        }
    }

    pub fn date_changed(&self) -> &Event<DateChanged> {
        match self {
            SeriesSource::Candles(s) => s.date_changed(),
            SeriesSource::Points(s) => s.date_changed(),
        }
    }
}

/// One series in a pane: a source plus the kind of renderer that draws it.
pub struct Chart {
    kind: SeriesKind,
    source: SeriesSource,
    subscription: Option<SubscriptionId>,
}

impl Chart {
    pub fn new(kind: SeriesKind, source: SeriesSource) -> Self {
        Self { kind, source, subscription: None }
    }

    pub fn candlestick(source: Rc<dyn DataSource<Candle>>) -> Self {
        Self::new(SeriesKind::Candlestick, SeriesSource::Candles(source))
    }

    pub fn line(source: Rc<dyn DataSource<Point>>) -> Self {
        Self::new(SeriesKind::Line, SeriesSource::Points(source))
    }

    pub fn kind(&self) -> SeriesKind { self.kind }

    pub fn source(&self) -> &SeriesSource { &self.source }

    pub fn fetch(&self, range: &Range<DateTime<Utc>>) -> SeriesData {
        self.source.fetch(range)
    }

    fn watch(&mut self, dirty: &Rc<Cell<bool>>) {
        let dirty = Rc::downgrade(dirty);
        let id = self.source.date_changed().subscribe(move |_: &DateChanged| {
            if let Some(flag) = dirty.upgrade() {
                flag.set(true);
            }
        });
        self.subscription = Some(id);
    }
}

impl Drop for Chart {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.date_changed().unsubscribe(id);
        }
    }
}

/// Fold per-window `(min, max)` pairs into one range. Windows that are still
/// holding their `+inf`/`-inf` seeds drop out naturally; if nothing finite
/// is left the default range is returned. A flat result is widened by 1%
/// (or by 1 around zero) so the axis never has a zero span.
pub fn fold_value_range<I>(ranges: I) -> Range<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (lo, hi) = ranges
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (min, max)| (lo.min(min), hi.max(max)));
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return DEFAULT_VALUE_RANGE;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.01 };
        return Range::new(lo - pad, hi + pad);
    }
    Range::new(lo, hi)
}

/// Borrowed renderers a stack needs for a base-layer pass.
pub struct PaneRenderers<'a> {
    pub registry: &'a RendererRegistry,
    pub time_axis: &'a TimeAxisRenderer,
    pub value_axis: &'a ValueAxisRenderer,
    pub ticks: &'a TickSelection,
}

/// A pane: overlaid charts sharing one value axis derived each pass from
/// what is visible, and a weak handle on the board's time axis.
pub struct ChartStack {
    frame: Frame,
    weight: f64,
    time_axis: Weak<RefCell<TimeAxis>>,
    value_axis: NumericAxis,
    charts: Vec<Chart>,
    dirty: Rc<Cell<bool>>,
}

impl ChartStack {
    pub fn new(time_axis: &Rc<RefCell<TimeAxis>>) -> Self {
        Self {
            frame: Frame::default(),
            weight: 1.0,
            time_axis: Rc::downgrade(time_axis),
            value_axis: NumericAxis::vertical(0.0, 0.0, DEFAULT_VALUE_RANGE),
            charts: Vec::new(),
            dirty: Rc::new(Cell::new(true)),
        }
    }

    /// Share of the board height relative to sibling stacks.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn weight(&self) -> f64 { self.weight }

    pub fn frame(&self) -> Frame { self.frame }

    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.value_axis.set_width(frame.height);
    }

    pub fn value_axis(&self) -> &NumericAxis { &self.value_axis }

    pub fn charts(&self) -> &[Chart] { &self.charts }

    /// Adds a chart; its source's change notifications mark the stack dirty.
    pub fn add_chart(&mut self, mut chart: Chart) {
        chart.watch(&self.dirty);
        self.charts.push(chart);
        self.dirty.set(true);
    }

    pub fn is_dirty(&self) -> bool { self.dirty.get() }

    pub fn mark_clean(&self) { self.dirty.set(false) }

    /// Fetch every chart's window for the time axis' current range.
    pub fn fetch(&self) -> ChartResult<Vec<SeriesData>> {
        let axis = self.time_axis.upgrade().ok_or(ChartError::TimeAxisDetached)?;
        let range = axis.borrow().range();
        Ok(self.charts.iter().map(|c| c.fetch(&range)).collect())
    }

    /// Value range the fetched windows call for. The stack's own axis is
    /// left alone; see [`ChartStack::set_value_range`].
    pub fn derive_value_range(&self, windows: &[SeriesData]) -> Range<f64> {
        let range = fold_value_range(windows.iter().map(|w| match w {
            SeriesData::Candles(d) => (d.min_ordinate_value, d.max_ordinate_value),
            SeriesData::Points(d) => (d.min_ordinate_value, d.max_ordinate_value),
        }));
        if !self.charts.is_empty() && range == DEFAULT_VALUE_RANGE {
            tracing::warn!(charts = self.charts.len(), "no visible values; using default value range");
        }
        range
    }

    pub fn set_value_range(&mut self, range: Range<f64>) {
        self.value_axis.set_range(range);
    }

    /// Gridlines, every chart through its registered renderer, then value
    /// labels, all against a freshly derived value range. The range is
    /// returned rather than stored: the caller commits it once the whole
    /// pass has succeeded.
    pub fn render_base(&self, target: &mut dyn DrawingTarget, r: &PaneRenderers<'_>) -> ChartResult<Range<f64>> {
        let windows = self.fetch()?;
        let mut value_axis = self.value_axis.clone();
        value_axis.set_range(self.derive_value_range(&windows));

        let axis = self.time_axis.upgrade().ok_or(ChartError::TimeAxisDetached)?;
        let time_axis = axis.borrow();
        let frame = self.frame;

        r.value_axis.render_grid(target, &frame, &value_axis);
        r.time_axis.render_grid(target, &frame, &time_axis, r.ticks)?;
        for (chart, window) in self.charts.iter().zip(&windows) {
            let renderer = r.registry.get(chart.kind)?;
            renderer.render(target, window, frame.x, frame.y, &time_axis, &value_axis)?;
        }
        r.value_axis.render(target, &frame, &value_axis);
        Ok(value_axis.range())
    }

    /// Crosshair for a cursor at board coordinates.
    pub fn render_front(&self, target: &mut dyn DrawingTarget, crosshair: &CrosshairRenderer, cursor: (f64, f64)) {
        let (x, y) = cursor;
        crosshair.render_vertical(target, &self.frame, x);
        if self.frame.contains(x, y) {
            crosshair.render_horizontal(target, &self.frame, y, &self.value_axis);
        }
    }
}

// File: crates/chartboard-core/src/series.rs
// Summary: Record types (candles, points), fetched data windows and the series-kind tag.
// Notes:
// - Every price field is optional. A record missing fields is a gap in the
//   data, not an error; renderers skip it and the window range ignores it.

use chrono::{DateTime, Utc};

use crate::range::Range;

/// Which renderer draws a chart. Carried next to each data source instead of
/// inspecting the data's type at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Candlestick,
    Line,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub date: DateTime<Utc>,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl Candle {
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { date, open: Some(open), close: Some(close), high: Some(high), low: Some(low) }
    }

    /// A period with no trades.
    pub fn empty(date: DateTime<Utc>) -> Self {
        Self { date, open: None, close: None, high: None, low: None }
    }

    /// `(open, high, low, close)` when all four are present.
    pub fn ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.open?, self.high?, self.low?, self.close?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub date: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Point {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value: Some(value) }
    }

    pub fn gap(date: DateTime<Utc>) -> Self {
        Self { date, value: None }
    }
}

/// Anything a data source can serve.
pub trait Record: Clone {
    fn date(&self) -> DateTime<Utc>;
    /// `(min, max)` of the record's defined values, if any.
    fn ordinate_range(&self) -> Option<(f64, f64)>;
}

impl Record for Candle {
    fn date(&self) -> DateTime<Utc> { self.date }

    fn ordinate_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in [self.open, self.high, self.low, self.close].into_iter().flatten() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo <= hi { Some((lo, hi)) } else { None }
    }
}

impl Record for Point {
    fn date(&self) -> DateTime<Utc> { self.date }

    fn ordinate_range(&self) -> Option<(f64, f64)> {
        self.value.map(|v| (v, v))
    }
}

/// A fetched window plus the value range observed while filtering it.
/// An empty window keeps the `+inf`/`-inf` seeds.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData<T> {
    pub data: Vec<T>,
    pub min_ordinate_value: f64,
    pub max_ordinate_value: f64,
}

impl<T> Default for ChartData<T> {
    fn default() -> Self {
        Self { data: Vec::new(), min_ordinate_value: f64::INFINITY, max_ordinate_value: f64::NEG_INFINITY }
    }
}

impl<T: Record> ChartData<T> {
    /// Keep the records dated inside `range` (inclusive), tightening the
    /// ordinate range as they are kept.
    pub fn from_window<'a, I>(records: I, range: &Range<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut out = Self::default();
        for r in records {
            if range.contains(r.date()) {
                out.push(r.clone());
            }
        }
        out
    }

    pub fn push(&mut self, record: T) {
        if let Some((lo, hi)) = record.ordinate_range() {
            self.min_ordinate_value = self.min_ordinate_value.min(lo);
            self.max_ordinate_value = self.max_ordinate_value.max(hi);
        }
        self.data.push(record);
    }
}

impl<T> ChartData<T> {
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// `None` while still holding the sentinel seeds.
    pub fn ordinate_range(&self) -> Option<(f64, f64)> {
        if self.min_ordinate_value <= self.max_ordinate_value {
            Some((self.min_ordinate_value, self.max_ordinate_value))
        } else {
            None
        }
    }
}

/// A window of either record shape, as handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesData {
    Candles(ChartData<Candle>),
    Points(ChartData<Point>),
}

impl SeriesData {
    pub fn shape(&self) -> &'static str {
        match self {
            SeriesData::Candles(_) => "candle",
            SeriesData::Points(_) => "point",
        }
    }

    pub fn ordinate_range(&self) -> Option<(f64, f64)> {
        match self {
            SeriesData::Candles(d) => d.ordinate_range(),
            SeriesData::Points(d) => d.ordinate_range(),
        }
    }
}

// File: crates/chartboard-core/src/source.rs
// Summary: Data source contract and an in-memory, date-sorted implementation.

use std::cell::RefCell;

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::Event;
use crate::range::Range;
use crate::series::{ChartData, Record};

/// Payload of [`DataSource::date_changed`]: the dates whose records changed,
/// or `None` when everything may have.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateChanged {
    pub range: Option<Range<DateTime<Utc>>>,
}

/// How many times the default neighbour lookups double their window before
/// settling for what they found.
const MAX_WIDENINGS: u32 = 16;

pub trait DataSource<T: Record> {
    /// Records dated inside `range` (inclusive) and their value range.
    fn get_data(&self, range: &Range<DateTime<Utc>>) -> ChartData<T>;
    /// Native sampling granularity of the records.
    fn interval(&self) -> TimeDelta;
    fn date_changed(&self) -> &Event<DateChanged>;

    /// Up to `count` records dated strictly before `date`, oldest first.
    /// Counted in records, not in intervals, so gaps in the data (weekends,
    /// halts) do not shorten the result.
    fn records_before(&self, date: DateTime<Utc>, count: usize) -> Vec<T> {
        let mut found = neighbours(self, date, count, |reach| {
            date.checked_sub_signed(reach).map(|lo| Range::new(lo, date))
        });
        found.retain(|r| r.date() < date);
        let skip = found.len().saturating_sub(count);
        found.split_off(skip)
    }

    /// Up to `count` records dated strictly after `date`, oldest first.
    fn records_after(&self, date: DateTime<Utc>, count: usize) -> Vec<T> {
        let mut found = neighbours(self, date, count, |reach| {
            date.checked_add_signed(reach).map(|hi| Range::new(date, hi))
        });
        found.retain(|r| r.date() > date);
        found.truncate(count);
        found
    }
}

/// Fetch windows next to `date`, doubling their reach from `count` intervals
/// until at least `count` records besides any at `date` itself turn up.
fn neighbours<T, S, F>(source: &S, date: DateTime<Utc>, count: usize, window: F) -> Vec<T>
where
    T: Record,
    S: DataSource<T> + ?Sized,
    F: Fn(TimeDelta) -> Option<Range<DateTime<Utc>>>,
{
    if count == 0 {
        return Vec::new();
    }
    let step = source.interval().num_milliseconds().max(1);
    let mut reach_ms = step.saturating_mul(count as i64);
    let mut found = Vec::new();
    for _ in 0..MAX_WIDENINGS {
        let Some(range) = TimeDelta::try_milliseconds(reach_ms).and_then(&window) else { break };
        found = source.get_data(&range).data;
        if found.iter().filter(|r| r.date() != date).count() >= count {
            break;
        }
        reach_ms = reach_ms.saturating_mul(2);
    }
    found
}

/// Records held in memory, kept sorted by date.
pub struct ArrayDataSource<T: Record> {
    records: RefCell<Vec<T>>,
    interval: TimeDelta,
    date_changed: Event<DateChanged>,
}

impl<T: Record> ArrayDataSource<T> {
    pub fn new(interval: TimeDelta, mut records: Vec<T>) -> Self {
        records.sort_by_key(|r| r.date());
        Self { records: RefCell::new(records), interval, date_changed: Event::new() }
    }

    pub fn len(&self) -> usize { self.records.borrow().len() }

    pub fn is_empty(&self) -> bool { self.records.borrow().is_empty() }

    /// First and last record dates.
    pub fn extent(&self) -> Option<Range<DateTime<Utc>>> {
        let records = self.records.borrow();
        Some(Range::new(records.first()?.date(), records.last()?.date()))
    }

    /// Replace every record and notify subscribers.
    pub fn set_data(&self, mut records: Vec<T>) {
        records.sort_by_key(|r| r.date());
        *self.records.borrow_mut() = records;
        let range = self.extent();
        self.date_changed.emit(&DateChanged { range });
    }

    /// Insert one record (replacing any with the same date) and notify.
    pub fn upsert(&self, record: T) {
        let date = record.date();
        {
            let mut records = self.records.borrow_mut();
            let at = records.partition_point(|r| r.date() < date);
            if records.get(at).is_some_and(|r| r.date() == date) {
                records[at] = record;
            } else {
                records.insert(at, record);
            }
        }
        self.date_changed.emit(&DateChanged { range: Some(Range::new(date, date)) });
    }
}

impl<T: Record> DataSource<T> for ArrayDataSource<T> {
    fn get_data(&self, range: &Range<DateTime<Utc>>) -> ChartData<T> {
        let records = self.records.borrow();
        let lo = range.lo();
        let hi = range.hi();
        let start = records.partition_point(|r| r.date() < lo);
        let end = records.partition_point(|r| r.date() <= hi);
        ChartData::from_window(&records[start..end.max(start)], range)
    }

    fn interval(&self) -> TimeDelta { self.interval }

    fn date_changed(&self) -> &Event<DateChanged> { &self.date_changed }

    fn records_before(&self, date: DateTime<Utc>, count: usize) -> Vec<T> {
        let records = self.records.borrow();
        let end = records.partition_point(|r| r.date() < date);
        records[end.saturating_sub(count)..end].to_vec()
    }

    fn records_after(&self, date: DateTime<Utc>, count: usize) -> Vec<T> {
        let records = self.records.borrow();
        let start = records.partition_point(|r| r.date() <= date);
        records[start..(start + count).min(records.len())].to_vec()
    }
}

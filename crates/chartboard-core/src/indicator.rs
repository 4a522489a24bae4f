// File: crates/chartboard-core/src/indicator.rs
// Summary: Indicator data sources derived from another source (simple moving average).

use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::{Event, SubscriptionId};
use crate::range::Range;
use crate::series::{Candle, ChartData, Point};
use crate::source::{DataSource, DateChanged};

/// Simple moving average of candle closes, served as a point series.
///
/// Each output point averages the `period` candles ending at its date. A
/// window with a missing close (or fewer than `period` candles behind it)
/// yields a gap.
pub struct MovingAverage {
    input: Rc<dyn DataSource<Candle>>,
    period: usize,
    date_changed: Rc<Event<DateChanged>>,
    subscription: SubscriptionId,
}

impl MovingAverage {
    pub fn new(input: Rc<dyn DataSource<Candle>>, period: usize) -> Self {
        let period = period.max(1);
        let date_changed = Rc::new(Event::new());

        // A changed candle moves every average whose window covers it: the
        // next `period - 1` candles, however far apart they are dated.
        let own = Rc::downgrade(&date_changed);
        let upstream = Rc::downgrade(&input);
        let subscription = input.date_changed().subscribe(move |change: &DateChanged| {
            let (Some(event), Some(input)) = (own.upgrade(), upstream.upgrade()) else { return };
            let range = change.range.map(|r| {
                let reach = input.records_after(r.hi(), period - 1);
                Range::new(r.lo(), reach.last().map_or(r.hi(), |c| c.date))
            });
            event.emit(&DateChanged { range });
        });

        Self { input, period, date_changed, subscription }
    }

    pub fn period(&self) -> usize { self.period }
}

impl Drop for MovingAverage {
    fn drop(&mut self) {
        self.input.date_changed().unsubscribe(self.subscription);
    }
}

impl DataSource<Point> for MovingAverage {
    fn get_data(&self, range: &Range<DateTime<Utc>>) -> ChartData<Point> {
        let mut candles = self.input.records_before(range.lo(), self.period - 1);
        let lead = candles.len();
        candles.extend(self.input.get_data(range).data);

        let p = self.period;
        let mut out = ChartData::default();
        let mut sum = 0.0f64;
        let mut missing = 0usize;
        for i in 0..candles.len() {
            match candles[i].close {
                Some(c) => sum += c,
                None => missing += 1,
            }
            if i >= p {
                match candles[i - p].close {
                    Some(c) => sum -= c,
                    None => missing -= 1,
                }
            }
            if i < lead {
                continue;
            }
            let value = if i + 1 >= p && missing == 0 { Some(sum / p as f64) } else { None };
            out.push(Point { date: candles[i].date, value });
        }
        out
    }

    fn interval(&self) -> TimeDelta { self.input.interval() }

    fn date_changed(&self) -> &Event<DateChanged> { &self.date_changed }
}

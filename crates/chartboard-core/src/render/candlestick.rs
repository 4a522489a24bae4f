// File: crates/chartboard-core/src/render/candlestick.rs
// Summary: Candlestick renderer: snapped body rectangles with high/low wicks.

use crate::axis::{NumericAxis, TimeAxis};
use crate::canvas::{Color, DrawingTarget};
use crate::error::{ChartError, ChartResult};
use crate::series::SeriesData;
use crate::theme::Theme;

use super::SeriesRenderer;

#[derive(Clone, Copy, Debug)]
pub struct CandlestickRenderer {
    pub up: Color,
    pub down: Color,
    pub outline: Color,
    pub line_width: f64,
    /// Body extends this many pixels either side of the candle's x.
    pub half_body: f64,
}

impl CandlestickRenderer {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            up: theme.candle_up,
            down: theme.candle_down,
            outline: theme.candle_outline,
            line_width: 1.0,
            half_body: 1.0,
        }
    }
}

impl Default for CandlestickRenderer {
    fn default() -> Self { Self::from_theme(&Theme::default()) }
}

impl SeriesRenderer for CandlestickRenderer {
    fn name(&self) -> &'static str { "candlestick" }

    fn render(
        &self,
        target: &mut dyn DrawingTarget,
        data: &SeriesData,
        offset_x: f64,
        offset_y: f64,
        time_axis: &TimeAxis,
        value_axis: &NumericAxis,
    ) -> ChartResult<()> {
        let SeriesData::Candles(window) = data else {
            return Err(ChartError::DataMismatch { renderer: self.name(), found: data.shape() });
        };

        let mut styled = false;
        for candle in &window.data {
            // partial candles are gaps
            let Some((open, high, low, close)) = candle.ohlc() else { continue };

            if !styled {
                target.set_line_width(self.line_width);
                target.set_stroke_style(self.outline);
                styled = true;
            }

            let x = target.snap(offset_x + time_axis.to_x(candle.date)?);
            let y_upper = target.snap(offset_y + value_axis.to_x(open.max(close)));
            let y_lower = target.snap(offset_y + value_axis.to_x(open.min(close)));
            let y_high = target.snap(offset_y + value_axis.to_x(high));
            let y_low = target.snap(offset_y + value_axis.to_x(low));

            target.begin_path();
            target.move_to(x, y_upper);
            target.line_to(x, y_high);
            target.move_to(x, y_lower);
            target.line_to(x, y_low);
            target.stroke();

            let top = y_upper.min(y_lower);
            let height = (y_upper - y_lower).abs();
            let left = x - self.half_body;
            let width = 2.0 * self.half_body;
            target.set_fill_style(if close > open { self.up } else { self.down });
            target.fill_rect(left, top, width, height);
            target.stroke_rect(left, top, width, height);
        }
        Ok(())
    }
}

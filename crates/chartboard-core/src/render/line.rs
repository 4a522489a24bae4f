// File: crates/chartboard-core/src/render/line.rs
// Summary: Line renderer for point series, one stroked segment per valid pair.

use crate::axis::{NumericAxis, TimeAxis};
use crate::canvas::{Color, DrawingTarget};
use crate::error::{ChartError, ChartResult};
use crate::series::SeriesData;

use super::SeriesRenderer;

/// What a point without a value does to the line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GapPolicy {
    /// Connect the last valid point to the next valid one across the gap.
    #[default]
    Bridge,
    /// Stop the line at the gap and restart after it.
    Break,
}

#[derive(Clone, Copy, Debug)]
pub struct LineRenderer {
    pub color: Color,
    pub line_width: f64,
    pub gaps: GapPolicy,
}

impl LineRenderer {
    pub fn new(color: Color) -> Self {
        Self { color, line_width: 1.0, gaps: GapPolicy::default() }
    }

    pub fn with_gaps(mut self, gaps: GapPolicy) -> Self {
        self.gaps = gaps;
        self
    }
}

impl SeriesRenderer for LineRenderer {
    fn name(&self) -> &'static str { "line" }

    fn render(
        &self,
        target: &mut dyn DrawingTarget,
        data: &SeriesData,
        offset_x: f64,
        offset_y: f64,
        time_axis: &TimeAxis,
        value_axis: &NumericAxis,
    ) -> ChartResult<()> {
        let SeriesData::Points(window) = data else {
            return Err(ChartError::DataMismatch { renderer: self.name(), found: data.shape() });
        };

        target.set_line_width(self.line_width);
        target.set_stroke_style(self.color);

        let mut prev: Option<(f64, f64)> = None;
        for point in &window.data {
            let Some(value) = point.value else {
                if self.gaps == GapPolicy::Break {
                    prev = None;
                }
                continue;
            };
            let x = target.snap(offset_x + time_axis.to_x(point.date)?);
            let y = target.snap(offset_y + value_axis.to_x(value));
            if let Some((px, py)) = prev {
                target.begin_path();
                target.move_to(px, py);
                target.line_to(x, y);
                target.stroke();
            }
            prev = Some((x, y));
        }
        Ok(())
    }
}

// File: crates/chartboard-core/src/render/axis.rs
// Summary: Time axis strip (tick marks + labels), value axis labels, and pane gridlines.

use crate::axis::{Axis, NumericAxis, TimeAxis};
use crate::canvas::{Color, DrawingTarget, TextAlign, TextBaseline};
use crate::error::ChartResult;
use crate::layout::Frame;
use crate::theme::Theme;
use crate::ticks::{format_tick_label, nice_step, value_ticks, TickSelection, TickSelector};

#[derive(Clone, Debug)]
pub struct TimeAxisRenderer {
    pub selector: TickSelector,
    pub tick_length: f64,
    pub line: Color,
    pub tick: Color,
    pub label: Color,
    pub grid: Color,
}

impl TimeAxisRenderer {
    pub fn from_theme(theme: &Theme, selector: TickSelector) -> Self {
        Self {
            selector,
            tick_length: 5.0,
            line: theme.axis_line,
            tick: theme.tick,
            label: theme.axis_label,
            grid: theme.grid,
        }
    }

    pub fn ticks(&self, axis: &TimeAxis) -> TickSelection {
        self.selector.select(axis.width(), axis.interval(), &axis.range())
    }

    /// Axis line along the top of `strip`, then a mark and a centered label
    /// per tick. No ticks means a bare line.
    pub fn render(
        &self,
        target: &mut dyn DrawingTarget,
        strip: &Frame,
        axis: &TimeAxis,
        ticks: &TickSelection,
    ) -> ChartResult<()> {
        target.set_line_width(1.0);
        let top = target.snap(strip.y);

        target.set_stroke_style(self.line);
        target.begin_path();
        target.move_to(strip.x, top);
        target.line_to(strip.right(), top);
        target.stroke();

        target.set_stroke_style(self.tick);
        target.set_fill_style(self.label);
        target.set_text_align(TextAlign::Left);
        target.set_text_baseline(TextBaseline::Top);
        for tick in &ticks.ticks {
            let x = target.snap(strip.x + axis.to_x(*tick)?);
            target.begin_path();
            target.move_to(x, top);
            target.line_to(x, top + self.tick_length);
            target.stroke();

            let label = format_tick_label(*tick);
            let width = target.measure_text(&label).width;
            target.fill_text(&label, x - width / 2.0, top + self.tick_length + 2.0, None);
        }
        Ok(())
    }

    /// Vertical gridlines through `pane` at each tick.
    pub fn render_grid(
        &self,
        target: &mut dyn DrawingTarget,
        pane: &Frame,
        axis: &TimeAxis,
        ticks: &TickSelection,
    ) -> ChartResult<()> {
        if ticks.is_empty() {
            return Ok(());
        }
        target.set_line_width(1.0);
        target.set_stroke_style(self.grid);
        for tick in &ticks.ticks {
            let x = target.snap(pane.x + axis.to_x(*tick)?);
            target.begin_path();
            target.move_to(x, pane.y);
            target.line_to(x, pane.bottom());
            target.stroke();
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ValueAxisRenderer {
    /// Minimum vertical distance between labels.
    pub min_spacing_px: f64,
    pub tick_length: f64,
    pub line: Color,
    pub label: Color,
    pub grid: Color,
}

impl ValueAxisRenderer {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            min_spacing_px: 40.0,
            tick_length: 4.0,
            line: theme.axis_line,
            label: theme.axis_label,
            grid: theme.grid,
        }
    }

    pub fn ticks(&self, pane: &Frame, axis: &NumericAxis) -> Vec<f64> {
        value_ticks(axis.range(), pane.height, self.min_spacing_px)
    }

    pub fn render_grid(&self, target: &mut dyn DrawingTarget, pane: &Frame, axis: &NumericAxis) {
        target.set_line_width(1.0);
        target.set_stroke_style(self.grid);
        for v in self.ticks(pane, axis) {
            let y = target.snap(pane.y + axis.to_x(v));
            target.begin_path();
            target.move_to(pane.x, y);
            target.line_to(pane.right(), y);
            target.stroke();
        }
    }

    /// Border on the pane's right edge with a mark and label per tick.
    pub fn render(&self, target: &mut dyn DrawingTarget, pane: &Frame, axis: &NumericAxis) {
        let ticks = self.ticks(pane, axis);
        let target_count = (pane.height / self.min_spacing_px).floor().max(1.0) as usize;
        let step = nice_step(axis.range().span(), target_count);

        target.set_line_width(1.0);
        let right = target.snap(pane.right());
        target.set_stroke_style(self.line);
        target.begin_path();
        target.move_to(right, pane.y);
        target.line_to(right, pane.bottom());
        target.stroke();

        target.set_fill_style(self.label);
        target.set_text_align(TextAlign::Left);
        target.set_text_baseline(TextBaseline::Middle);
        for v in ticks {
            let y = target.snap(pane.y + axis.to_x(v));
            target.begin_path();
            target.move_to(right, y);
            target.line_to(right + self.tick_length, y);
            target.stroke();
            target.fill_text(&format_value(v, step), right + self.tick_length + 2.0, y, None);
        }
    }
}

/// Enough decimals to tell neighbouring ticks `step` apart.
pub fn format_value(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        2
    };
    format!("{v:.decimals$}")
}

// File: crates/chartboard-core/src/render/crosshair.rs
// Summary: Front-layer crosshair: vertical line per pane, horizontal line and value tag in the hovered pane.

use crate::axis::NumericAxis;
use crate::canvas::{Color, DrawingTarget, TextAlign, TextBaseline};
use crate::layout::{clamp, Frame};
use crate::theme::Theme;

use super::axis::format_value;

#[derive(Clone, Copy, Debug)]
pub struct CrosshairRenderer {
    pub color: Color,
    pub tag_fill: Color,
    pub tag_text: Color,
    pub tag_height: f64,
}

impl CrosshairRenderer {
    pub fn from_theme(theme: &Theme) -> Self {
        Self { color: theme.crosshair, tag_fill: theme.crosshair, tag_text: theme.background, tag_height: 16.0 }
    }

    pub fn render_vertical(&self, target: &mut dyn DrawingTarget, pane: &Frame, x: f64) {
        if x < pane.x || x > pane.right() {
            return;
        }
        target.set_line_width(1.0);
        target.set_stroke_style(self.color);
        let x = target.snap(x);
        target.begin_path();
        target.move_to(x, pane.y);
        target.line_to(x, pane.bottom());
        target.stroke();
    }

    /// Horizontal line at `y` plus the value under it, tagged on the right edge.
    pub fn render_horizontal(&self, target: &mut dyn DrawingTarget, pane: &Frame, y: f64, axis: &NumericAxis) {
        if y < pane.y || y > pane.bottom() {
            return;
        }
        target.set_line_width(1.0);
        target.set_stroke_style(self.color);
        let sy = target.snap(y);
        target.begin_path();
        target.move_to(pane.x, sy);
        target.line_to(pane.right(), sy);
        target.stroke();

        let value = axis.value_at(y - pane.y);
        let label = format_value(value, axis.range().span() / 100.0);
        let width = target.measure_text(&label).width + 6.0;
        let half = self.tag_height / 2.0;
        let top = clamp(sy - half, pane.y, (pane.bottom() - self.tag_height).max(pane.y));
        target.set_fill_style(self.tag_fill);
        target.fill_rect(pane.right(), top, width, self.tag_height);
        target.set_fill_style(self.tag_text);
        target.set_text_align(TextAlign::Left);
        target.set_text_baseline(TextBaseline::Middle);
        target.fill_text(&label, pane.right() + 3.0, top + half, None);
    }
}

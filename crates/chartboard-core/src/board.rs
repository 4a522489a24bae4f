// File: crates/chartboard-core/src/board.rs
// Summary: Chart board: stacked panes over one shared time axis, pointer gestures,
// and two-layer (base/front) rendering.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::axis::{Axis, TimeAxis, ZoomPolicy};
use crate::canvas::{replay, DrawCommand, DrawingTarget, Recorder};
use crate::error::{ChartError, ChartResult};
use crate::layout::{split_vertical, Frame, Insets};
use crate::range::Range;
use crate::render::{CrosshairRenderer, RendererRegistry, TimeAxisRenderer, ValueAxisRenderer};
use crate::stack::{Chart, ChartStack, PaneRenderers};
use crate::theme::Theme;
use crate::ticks::TickSelector;

#[derive(Clone, Debug)]
pub struct BoardOptions {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    /// Height of the date strip under the last pane.
    pub time_axis_height: f64,
    pub theme: Theme,
    pub tick_selector: TickSelector,
    pub zoom: ZoomPolicy,
    /// A mouse press this soon after a touch release is treated as the
    /// browser-synthesised echo of the touch and ignored.
    pub ghost_click_window_ms: u64,
    pub ghost_click_radius_px: f64,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 640.0,
            insets: Insets::default(),
            time_axis_height: 24.0,
            theme: Theme::default(),
            tick_selector: TickSelector::default(),
            zoom: ZoomPolicy::default(),
            ghost_click_window_ms: 500,
            ghost_click_radius_px: 10.0,
        }
    }
}

/// Which layers a render pass should repaint. Layers left out are not touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawLayers {
    pub base: bool,
    pub front: bool,
}

impl RedrawLayers {
    pub const NONE: Self = Self { base: false, front: false };
    pub const FRONT: Self = Self { base: false, front: true };
    pub const ALL: Self = Self { base: true, front: true };

    pub fn union(self, other: Self) -> Self {
        Self { base: self.base || other.base, front: self.front || other.front }
    }

    pub fn is_empty(&self) -> bool { !self.base && !self.front }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Leave,
    /// Negative `delta_y` (wheel up) zooms in.
    Wheel { delta_y: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub action: PointerAction,
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl PointerEvent {
    pub fn mouse(action: PointerAction, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Mouse, action, x, y, timestamp_ms }
    }

    pub fn touch(action: PointerAction, x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { kind: PointerKind::Touch, action, x, y, timestamp_ms }
    }
}

pub struct ChartBoard {
    options: BoardOptions,
    time_axis: Rc<RefCell<TimeAxis>>,
    stacks: Vec<ChartStack>,
    registry: RendererRegistry,
    time_renderer: TimeAxisRenderer,
    value_renderer: ValueAxisRenderer,
    crosshair: CrosshairRenderer,
    time_strip: Frame,
    cursor: Option<(f64, f64)>,
    drag_x: Option<f64>,
    last_touch_up: Option<(f64, f64, u64)>,
}

impl ChartBoard {
    pub fn new(
        options: BoardOptions,
        range: Range<DateTime<Utc>>,
        interval: TimeDelta,
        registry: RendererRegistry,
    ) -> ChartResult<Self> {
        check_dimensions(options.width, options.height)?;
        let axis = TimeAxis::new(0.0, interval, range).with_zoom_policy(options.zoom);
        let theme = options.theme;
        let mut board = Self {
            time_renderer: TimeAxisRenderer::from_theme(&theme, options.tick_selector.clone()),
            value_renderer: ValueAxisRenderer::from_theme(&theme),
            crosshair: CrosshairRenderer::from_theme(&theme),
            options,
            time_axis: Rc::new(RefCell::new(axis)),
            stacks: Vec::new(),
            registry,
            time_strip: Frame::default(),
            cursor: None,
            drag_x: None,
            last_touch_up: None,
        };
        board.layout();
        Ok(board)
    }

    pub fn options(&self) -> &BoardOptions { &self.options }

    /// Shared handle on the time axis. Stacks only hold it weakly.
    pub fn time_axis(&self) -> Rc<RefCell<TimeAxis>> { self.time_axis.clone() }

    pub fn stacks(&self) -> &[ChartStack] { &self.stacks }

    pub fn stack_mut(&mut self, index: usize) -> Option<&mut ChartStack> { self.stacks.get_mut(index) }

    pub fn time_strip(&self) -> Frame { self.time_strip }

    pub fn cursor(&self) -> Option<(f64, f64)> { self.cursor }

    /// Append an empty pane; returns its index.
    pub fn add_stack(&mut self, weight: f64) -> usize {
        self.stacks.push(ChartStack::new(&self.time_axis).with_weight(weight));
        self.layout();
        self.stacks.len() - 1
    }

    /// Returns false if there is no stack at `index`.
    pub fn add_chart(&mut self, index: usize, chart: Chart) -> bool {
        match self.stacks.get_mut(index) {
            Some(stack) => {
                stack.add_chart(chart);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) -> ChartResult<()> {
        check_dimensions(width, height)?;
        self.options.width = width;
        self.options.height = height;
        self.layout();
        Ok(())
    }

    fn layout(&mut self) {
        let plot = Frame::new(0.0, 0.0, self.options.width, self.options.height).inset(&self.options.insets);
        let strip_h = self.options.time_axis_height.min(plot.height).max(0.0);
        let panes = Frame::new(plot.x, plot.y, plot.width, plot.height - strip_h);
        let weights: Vec<f64> = self.stacks.iter().map(|s| s.weight()).collect();
        for (stack, frame) in self.stacks.iter_mut().zip(split_vertical(panes, &weights)) {
            stack.set_frame(frame);
        }
        self.time_strip = Frame::new(plot.x, panes.bottom(), plot.width, strip_h);
        self.time_axis.borrow_mut().set_width(plot.width);
    }

    /// True when a data source changed since the last base pass.
    pub fn needs_redraw(&self) -> bool {
        self.stacks.iter().any(|s| s.is_dirty())
    }

    pub fn pan(&mut self, pixel_delta: f64) -> RedrawLayers {
        self.mutate_axis(|axis| axis.move_by(pixel_delta))
    }

    pub fn zoom(&mut self, direction: f64) -> RedrawLayers {
        self.mutate_axis(|axis| axis.scale(direction))
    }

    fn mutate_axis(&mut self, f: impl FnOnce(&mut TimeAxis)) -> RedrawLayers {
        let mut axis = self.time_axis.borrow_mut();
        let before = axis.range();
        f(&mut *axis);
        if axis.range() == before { RedrawLayers::NONE } else { RedrawLayers::ALL }
    }

    /// Apply one pointer event and report which layers need repainting.
    pub fn handle_event(&mut self, ev: PointerEvent) -> RedrawLayers {
        match ev.action {
            PointerAction::Down => {
                if ev.kind == PointerKind::Mouse && self.is_ghost_click(&ev) {
                    tracing::debug!(x = ev.x, y = ev.y, "ghost click suppressed");
                    return RedrawLayers::NONE;
                }
                self.drag_x = Some(ev.x);
                RedrawLayers::NONE
            }
            PointerAction::Move => {
                self.cursor = Some((ev.x, ev.y));
                let mut layers = RedrawLayers::FRONT;
                if let Some(last) = self.drag_x {
                    self.drag_x = Some(ev.x);
                    layers = layers.union(self.pan(ev.x - last));
                }
                layers
            }
            PointerAction::Up => {
                self.drag_x = None;
                if ev.kind == PointerKind::Touch {
                    self.last_touch_up = Some((ev.x, ev.y, ev.timestamp_ms));
                }
                RedrawLayers::NONE
            }
            PointerAction::Leave => {
                self.drag_x = None;
                self.cursor = None;
                RedrawLayers::FRONT
            }
            PointerAction::Wheel { delta_y } => {
                if delta_y == 0.0 || delta_y.is_nan() {
                    return RedrawLayers::NONE;
                }
                self.zoom(if delta_y < 0.0 { 1.0 } else { -1.0 })
            }
        }
    }

    fn is_ghost_click(&self, ev: &PointerEvent) -> bool {
        let Some((x, y, at)) = self.last_touch_up else { return false };
        let elapsed = ev.timestamp_ms.saturating_sub(at);
        let dist = ((ev.x - x).powi(2) + (ev.y - y).powi(2)).sqrt();
        ev.timestamp_ms >= at && elapsed <= self.options.ghost_click_window_ms && dist <= self.options.ghost_click_radius_px
    }

    /// Repaint the requested layers. Each layer is recorded in full first and
    /// only then cleared and replayed, so an error leaves its previous
    /// contents in place.
    pub fn render(
        &mut self,
        layers: RedrawLayers,
        base: &mut dyn DrawingTarget,
        front: &mut dyn DrawingTarget,
    ) -> ChartResult<()> {
        if layers.base {
            let commands = self.record_base(&*base)?;
            base.clear();
            replay(&commands, base);
            for stack in &self.stacks {
                stack.mark_clean();
            }
            tracing::debug!(commands = commands.len(), stacks = self.stacks.len(), "base layer rendered");
        }
        if layers.front {
            let commands = self.record_front(&*front);
            front.clear();
            replay(&commands, front);
        }
        Ok(())
    }

    fn record_base(&mut self, metrics: &dyn DrawingTarget) -> ChartResult<Vec<DrawCommand>> {
        let mut rec = Recorder::with_metrics(metrics);
        let theme = self.options.theme;
        rec.set_fill_style(theme.background);
        rec.fill_rect(0.0, 0.0, self.options.width, self.options.height);

        let time_axis = self.time_axis.borrow();
        let ticks = self.time_renderer.ticks(&time_axis);
        let renderers = PaneRenderers {
            registry: &self.registry,
            time_axis: &self.time_renderer,
            value_axis: &self.value_renderer,
            ticks: &ticks,
        };
        let mut ranges = Vec::with_capacity(self.stacks.len());
        for stack in &self.stacks {
            ranges.push(stack.render_base(&mut rec, &renderers)?);
        }
        self.time_renderer.render(&mut rec, &self.time_strip, &time_axis, &ticks)?;

        // nothing below can fail; value axes change together with the pixels
        for (stack, range) in self.stacks.iter_mut().zip(ranges) {
            stack.set_value_range(range);
        }
        Ok(rec.into_commands())
    }

    fn record_front(&self, metrics: &dyn DrawingTarget) -> Vec<DrawCommand> {
        let mut rec = Recorder::with_metrics(metrics);
        if let Some(cursor) = self.cursor {
            for stack in &self.stacks {
                stack.render_front(&mut rec, &self.crosshair, cursor);
            }
        }
        rec.into_commands()
    }
}

fn check_dimensions(width: f64, height: f64) -> ChartResult<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ChartError::InvalidDimensions { width, height });
    }
    Ok(())
}

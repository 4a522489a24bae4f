// File: crates/chartboard-core/src/render/mod.rs
// Summary: Series renderer contract and the kind-keyed registry the board dispatches through.

use std::collections::HashMap;

use crate::axis::{NumericAxis, TimeAxis};
use crate::canvas::DrawingTarget;
use crate::error::{ChartError, ChartResult};
use crate::series::{SeriesData, SeriesKind};
use crate::theme::Theme;

pub mod axis;
pub mod candlestick;
pub mod crosshair;
pub mod line;

pub use axis::{TimeAxisRenderer, ValueAxisRenderer};
pub use candlestick::CandlestickRenderer;
pub use crosshair::CrosshairRenderer;
pub use line::{GapPolicy, LineRenderer};

/// Draws one fetched window against the pane's axes. Offsets locate the
/// pane's top-left corner on the target.
pub trait SeriesRenderer {
    fn name(&self) -> &'static str;

    fn render(
        &self,
        target: &mut dyn DrawingTarget,
        data: &SeriesData,
        offset_x: f64,
        offset_y: f64,
        time_axis: &TimeAxis,
        value_axis: &NumericAxis,
    ) -> ChartResult<()>;
}

/// Renderers by series kind. Built up front and handed to the board.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<SeriesKind, Box<dyn SeriesRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self { Self::default() }

    /// Candlestick and line renderers colored from `theme`.
    pub fn with_defaults(theme: &Theme) -> Self {
        let mut reg = Self::new();
        reg.register(SeriesKind::Candlestick, Box::new(CandlestickRenderer::from_theme(theme)));
        reg.register(SeriesKind::Line, Box::new(LineRenderer::new(theme.line_stroke)));
        reg
    }

    /// Returns the renderer previously registered for `kind`, if any.
    pub fn register(
        &mut self,
        kind: SeriesKind,
        renderer: Box<dyn SeriesRenderer>,
    ) -> Option<Box<dyn SeriesRenderer>> {
        self.renderers.insert(kind, renderer)
    }

    pub fn get(&self, kind: SeriesKind) -> ChartResult<&dyn SeriesRenderer> {
        self.renderers
            .get(&kind)
            .map(|r| r.as_ref())
            .ok_or(ChartError::UnknownRenderer(kind))
    }

    pub fn contains(&self, kind: SeriesKind) -> bool {
        self.renderers.contains_key(&kind)
    }
}

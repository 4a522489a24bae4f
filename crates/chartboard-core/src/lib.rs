// File: crates/chartboard-core/src/lib.rs
// Summary: Core library entry point; exports axes, tick selection, renderers and board orchestration.

pub mod axis;
pub mod board;
pub mod canvas;
pub mod error;
pub mod event;
pub mod indicator;
pub mod layout;
pub mod range;
pub mod render;
pub mod series;
pub mod source;
pub mod stack;
pub mod theme;
pub mod ticks;

pub use axis::{Axis, NumericAxis, TimeAxis, ZoomPolicy};
pub use board::{BoardOptions, ChartBoard, PointerAction, PointerEvent, PointerKind, RedrawLayers};
pub use canvas::{Color, DrawCommand, DrawingTarget, PixelSnap, Recorder, TextAlign, TextBaseline, TextMeasure, TextMetrics};
pub use error::{ChartError, ChartResult};
pub use event::{Event, SubscriptionId};
pub use indicator::MovingAverage;
pub use layout::{Frame, Insets};
pub use range::Range;
pub use render::{RendererRegistry, SeriesRenderer};
pub use series::{Candle, ChartData, Point, Record, SeriesData, SeriesKind};
pub use source::{ArrayDataSource, DataSource, DateChanged};
pub use stack::{Chart, ChartStack, SeriesSource};
pub use theme::Theme;
pub use ticks::{TickSelection, TickSelector};

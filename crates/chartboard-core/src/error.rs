// File: crates/chartboard-core/src/error.rs
// Summary: Error taxonomy shared by axes, renderers and the board.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::series::SeriesKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A renderer asked the time axis for a date it does not cover.
    /// Indicates the renderer and axis are out of sync.
    #[error("date {date} outside axis range [{start}, {end}]")]
    OutOfRange {
        date: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("no renderer registered for series kind {0:?}")]
    UnknownRenderer(SeriesKind),

    #[error("{renderer} renderer cannot draw {found} data")]
    DataMismatch {
        renderer: &'static str,
        found: &'static str,
    },

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("time axis was dropped while a stack still referenced it")]
    TimeAxisDetached,

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

// File: crates/chartboard-core/tests/render.rs
// Purpose: Series renderers against a recording target: candle geometry, gaps, snapping.

use chartboard_core::render::{CandlestickRenderer, GapPolicy, LineRenderer, TimeAxisRenderer};
use chartboard_core::{
    Candle, ChartData, ChartError, DrawCommand, NumericAxis, PixelSnap, Point, Range, Recorder, SeriesData,
    SeriesRenderer, Theme, TickSelector, TimeAxis,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 1, d, 0, 0, 0).unwrap()
}

fn axes() -> (TimeAxis, NumericAxis) {
    let time = TimeAxis::new(600.0, TimeDelta::days(1), Range::new(day(1), day(31)));
    let value = NumericAxis::vertical(100.0, 0.0, Range::new(0.0, 5.0));
    (time, value)
}

fn candles(records: Vec<Candle>) -> SeriesData {
    let mut window = ChartData::default();
    for c in records {
        window.push(c);
    }
    SeriesData::Candles(window)
}

fn points(records: Vec<Point>) -> SeriesData {
    let mut window = ChartData::default();
    for p in records {
        window.push(p);
    }
    SeriesData::Points(window)
}

#[test]
fn pixel_snap_is_a_step_function_of_width() {
    assert_eq!(PixelSnap::for_line_width(1.0).offset(), 0.5);
    assert_eq!(PixelSnap::for_line_width(1.4).offset(), 0.5);
    assert_eq!(PixelSnap::for_line_width(2.0).offset(), 0.0);
    assert_eq!(PixelSnap::for_line_width(3.0).offset(), 0.5);
    assert_eq!(PixelSnap::for_line_width(1.0).apply(10.2), 10.5);
    assert_eq!(PixelSnap::for_line_width(2.0).apply(10.7), 11.0);
}

#[test]
fn rising_candle_geometry() -> anyhow::Result<()> {
    let (time, value) = axes();
    let theme = Theme::default();
    let renderer = CandlestickRenderer::from_theme(&theme);
    let data = candles(vec![Candle::new(day(16), 1.0, 3.0, 0.5, 2.0)]);

    let mut rec = Recorder::new();
    renderer.render(&mut rec, &data, 0.0, 0.0, &time, &value)?;

    let snap = PixelSnap::for_line_width(1.0);
    let x = snap.apply(time.to_x(day(16))?);
    let top = snap.apply(value.to_x(2.0));
    let bottom = snap.apply(value.to_x(1.0));
    let high = snap.apply(value.to_x(3.0));
    let low = snap.apply(value.to_x(0.5));
    assert_eq!((x, top, bottom, high, low), (300.5, 60.5, 80.5, 40.5, 90.5));

    let expected = vec![
        DrawCommand::LineWidth(1.0),
        DrawCommand::StrokeStyle(theme.candle_outline),
        DrawCommand::BeginPath,
        DrawCommand::MoveTo(x, top),
        DrawCommand::LineTo(x, high),
        DrawCommand::MoveTo(x, bottom),
        DrawCommand::LineTo(x, low),
        DrawCommand::Stroke,
        DrawCommand::FillStyle(theme.candle_up),
        DrawCommand::FillRect(x - 1.0, top, 2.0, bottom - top),
        DrawCommand::StrokeRect(x - 1.0, top, 2.0, bottom - top),
    ];
    assert_eq!(rec.commands(), expected.as_slice());
    Ok(())
}

#[test]
fn falling_and_flat_candles_use_the_down_color() -> anyhow::Result<()> {
    let (time, value) = axes();
    let theme = Theme::default();
    let renderer = CandlestickRenderer::from_theme(&theme);
    let data = candles(vec![
        Candle::new(day(10), 2.0, 3.0, 0.5, 1.0),
        Candle::new(day(11), 2.0, 3.0, 0.5, 2.0),
    ]);

    let mut rec = Recorder::new();
    renderer.render(&mut rec, &data, 0.0, 0.0, &time, &value)?;
    let fills: Vec<_> = rec
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillStyle(color) => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![theme.candle_down, theme.candle_down]);
    Ok(())
}

#[test]
fn offsets_shift_every_coordinate() -> anyhow::Result<()> {
    let (time, value) = axes();
    let renderer = CandlestickRenderer::default();
    let data = candles(vec![Candle::new(day(16), 1.0, 3.0, 0.5, 2.0)]);

    let mut rec = Recorder::new();
    renderer.render(&mut rec, &data, 20.0, 40.0, &time, &value)?;
    assert!(rec.commands().contains(&DrawCommand::MoveTo(320.5, 100.5)));
    Ok(())
}

#[test]
fn partial_candle_emits_no_draw_calls() -> anyhow::Result<()> {
    let (time, value) = axes();
    let renderer = CandlestickRenderer::default();
    let mut partial = Candle::new(day(3), 1.0, 3.0, 0.5, 2.0);
    partial.close = None;
    let data = candles(vec![partial, Candle::empty(day(4))]);

    let mut rec = Recorder::new();
    renderer.render(&mut rec, &data, 0.0, 0.0, &time, &value)?;
    assert_eq!(rec.draw_calls(), 0);
    assert!(rec.is_empty());
    Ok(())
}

#[test]
fn candle_outside_the_axis_is_an_error() {
    let (time, value) = axes();
    let renderer = CandlestickRenderer::default();
    let data = candles(vec![Candle::new(day(1) - TimeDelta::days(1), 1.0, 3.0, 0.5, 2.0)]);

    let mut rec = Recorder::new();
    let err = renderer.render(&mut rec, &data, 0.0, 0.0, &time, &value).unwrap_err();
    assert!(matches!(err, ChartError::OutOfRange { .. }));
}

#[test]
fn renderers_reject_the_wrong_record_shape() {
    let (time, value) = axes();
    let mut rec = Recorder::new();

    let err = CandlestickRenderer::default()
        .render(&mut rec, &points(vec![Point::new(day(2), 1.0)]), 0.0, 0.0, &time, &value)
        .unwrap_err();
    assert!(matches!(err, ChartError::DataMismatch { renderer: "candlestick", found: "point" }));

    let err = LineRenderer::new(Theme::default().line_stroke)
        .render(&mut rec, &candles(vec![]), 0.0, 0.0, &time, &value)
        .unwrap_err();
    assert!(matches!(err, ChartError::DataMismatch { renderer: "line", found: "candle" }));
}

fn segments(rec: &Recorder) -> usize {
    rec.commands().iter().filter(|c| matches!(c, DrawCommand::LineTo(..))).count()
}

#[test]
fn line_bridges_gaps_by_default() -> anyhow::Result<()> {
    let (time, value) = axes();
    let data = points(vec![Point::new(day(1), 1.0), Point::gap(day(2)), Point::new(day(3), 3.0), Point::new(day(4), 2.0)]);

    let mut rec = Recorder::new();
    LineRenderer::new(Theme::default().line_stroke).render(&mut rec, &data, 0.0, 0.0, &time, &value)?;
    assert_eq!(segments(&rec), 2);

    let snap = PixelSnap::for_line_width(1.0);
    let from = (snap.apply(time.to_x(day(1))?), snap.apply(value.to_x(1.0)));
    let to = (snap.apply(time.to_x(day(3))?), snap.apply(value.to_x(3.0)));
    assert!(rec.commands().windows(2).any(|w| w
        == [DrawCommand::MoveTo(from.0, from.1), DrawCommand::LineTo(to.0, to.1)]));
    Ok(())
}

#[test]
fn line_breaks_at_gaps_when_asked() -> anyhow::Result<()> {
    let (time, value) = axes();
    let data = points(vec![Point::new(day(1), 1.0), Point::gap(day(2)), Point::new(day(3), 3.0), Point::new(day(4), 2.0)]);

    let mut rec = Recorder::new();
    LineRenderer::new(Theme::default().line_stroke)
        .with_gaps(GapPolicy::Break)
        .render(&mut rec, &data, 0.0, 0.0, &time, &value)?;
    assert_eq!(segments(&rec), 1);
    Ok(())
}

#[test]
fn single_point_draws_nothing() -> anyhow::Result<()> {
    let (time, value) = axes();
    let mut rec = Recorder::new();
    LineRenderer::new(Theme::default().line_stroke).render(
        &mut rec,
        &points(vec![Point::new(day(5), 2.0)]),
        0.0,
        0.0,
        &time,
        &value,
    )?;
    assert_eq!(rec.draw_calls(), 0);
    Ok(())
}

#[test]
fn time_labels_are_centered_on_their_tick() -> anyhow::Result<()> {
    let time = TimeAxis::new(1000.0, TimeDelta::minutes(1), Range::new(day(1), day(2)));
    let renderer = TimeAxisRenderer::from_theme(&Theme::default(), TickSelector::default());
    let ticks = renderer.ticks(&time);
    assert_eq!(ticks.spacing_ms, 14_000_000);

    let strip = chartboard_core::Frame::new(0.0, 0.0, 1000.0, 24.0);
    let mut rec = Recorder::new();
    renderer.render(&mut rec, &strip, &time, &ticks)?;

    let first = ticks.ticks[0];
    let label = chartboard_core::ticks::format_tick_label(first);
    let x = PixelSnap::for_line_width(1.0).apply(time.to_x(first)?);
    // default metrics advance 7px per char
    let expected_left = x - label.chars().count() as f64 * 7.0 / 2.0;
    let drawn = rec.commands().iter().find_map(|c| match c {
        DrawCommand::FillText { text, x, .. } if *text == label => Some(*x),
        _ => None,
    });
    assert_eq!(drawn, Some(expected_left));
    Ok(())
}

#[test]
fn time_axis_without_ticks_draws_only_its_line() -> anyhow::Result<()> {
    let time = TimeAxis::new(100.0, TimeDelta::minutes(1), Range::new(day(1), day(2)));
    let renderer = TimeAxisRenderer::from_theme(&Theme::default(), TickSelector::default());
    let ticks = renderer.ticks(&time);
    assert!(ticks.is_empty());

    let strip = chartboard_core::Frame::new(0.0, 0.0, 100.0, 24.0);
    let mut rec = Recorder::new();
    renderer.render(&mut rec, &strip, &time, &ticks)?;
    assert!(!rec.commands().iter().any(|c| matches!(c, DrawCommand::FillText { .. })));
    assert_eq!(segments(&rec), 1);
    Ok(())
}

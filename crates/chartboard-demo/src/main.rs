// File: crates/chartboard-demo/src/main.rs
// Summary: Demo loads OHLC CSV into a two-pane board (candles + SMA, closes), applies
// scripted zoom/pan gestures and writes the composited layers to PNG.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use chartboard_core::{
    ArrayDataSource, BoardOptions, Candle, Chart, ChartBoard, MovingAverage, Point, PointerAction, PointerEvent,
    Range, RedrawLayers, RendererRegistry,
};
use chartboard_skia::LayeredSurface;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chartboard-demo")]
#[command(about = "Render an OHLC CSV as a pannable candlestick board", long_about = None)]
struct Cli {
    /// Input CSV (.csv/.cvs extensions are tried both ways)
    input: String,

    #[arg(long, default_value_t = 1024.0)]
    width: f64,

    #[arg(long, default_value_t = 640.0)]
    height: f64,

    /// Device pixel ratio of the output raster
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Candles visible before any gesture
    #[arg(long, default_value_t = 120)]
    bars: usize,

    /// Wheel steps: positive zooms in, negative zooms out
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    /// Horizontal drag in pixels (positive reveals earlier candles)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan: f64,

    /// Moving-average period overlaid on the candles (0 disables)
    #[arg(long, default_value_t = 20)]
    sma: usize,

    /// Crosshair position as `x,y`
    #[arg(long)]
    cursor: Option<String>,

    /// Theme preset: dark, light, high-contrast-dark
    #[arg(long, default_value = "dark")]
    theme: String,

    /// Skip axis labels
    #[arg(long)]
    no_labels: bool,

    /// Output PNG (defaults to target/out/chart_<stem>_board.png)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let (path, used_alt) = resolve_path(&cli.input)?;
    tracing::info!(path = %path.display(), used_alt, "using input file");

    let candles = load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if candles.is_empty() {
        anyhow::bail!("no candles loaded; check headers/delimiter.");
    }
    let interval = infer_interval(&candles);
    tracing::info!(candles = candles.len(), interval_ms = interval.num_milliseconds(), "loaded");

    let theme = chartboard_core::theme::find(&cli.theme);
    let options = BoardOptions { width: cli.width, height: cli.height, theme, ..BoardOptions::default() };
    let end = candles[candles.len() - 1].date;
    let range = visible_range(end, interval, cli.bars)?;

    let closes: Vec<Point> =
        candles.iter().map(|c| Point { date: c.date, value: c.close }).collect();
    let price_source = Rc::new(ArrayDataSource::new(interval, candles));
    let close_source = Rc::new(ArrayDataSource::new(interval, closes));

    let mut board = ChartBoard::new(options, range, interval, RendererRegistry::with_defaults(&theme))?;
    let price = board.add_stack(3.0);
    board.add_chart(price, Chart::candlestick(price_source.clone()));
    if cli.sma > 0 {
        board.add_chart(price, Chart::line(Rc::new(MovingAverage::new(price_source, cli.sma))));
    }
    let lower = board.add_stack(1.0);
    board.add_chart(lower, Chart::line(close_source));

    apply_gestures(&mut board, &cli)?;

    let mut layers = LayeredSurface::for_board(&board, cli.dpr)?;
    layers.set_draw_labels(!cli.no_labels);
    layers.render(&mut board, RedrawLayers::ALL)?;

    let out = cli.out.clone().unwrap_or_else(|| out_name_with(&path, "board"));
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out, layers.encode_png()?).with_context(|| format!("writing {}", out.display()))?;
    let shown = board.time_axis().borrow().range();
    tracing::info!(out = %out.display(), start = %shown.start, end = %shown.end, "wrote board");
    Ok(())
}

/// Replay the CLI's zoom/pan/cursor as pointer events, the way a UI would.
fn apply_gestures(board: &mut ChartBoard, cli: &Cli) -> Result<()> {
    let mid_y = cli.height / 2.0;
    let mut t = 0u64;
    let mut next = || {
        t += 16;
        t
    };

    let delta_y = if cli.zoom > 0 { -1.0 } else { 1.0 };
    for _ in 0..cli.zoom.unsigned_abs() {
        board.handle_event(PointerEvent::mouse(PointerAction::Wheel { delta_y }, 0.0, mid_y, next()));
    }

    if cli.pan != 0.0 {
        let x0 = cli.width / 2.0;
        board.handle_event(PointerEvent::mouse(PointerAction::Down, x0, mid_y, next()));
        board.handle_event(PointerEvent::mouse(PointerAction::Move, x0 + cli.pan, mid_y, next()));
        board.handle_event(PointerEvent::mouse(PointerAction::Up, x0 + cli.pan, mid_y, next()));
    }

    if let Some(raw) = &cli.cursor {
        let (x, y) = raw
            .split_once(',')
            .and_then(|(x, y)| Some((x.trim().parse::<f64>().ok()?, y.trim().parse::<f64>().ok()?)))
            .with_context(|| format!("cursor must be `x,y`, got '{raw}'"))?;
        board.handle_event(PointerEvent::mouse(PointerAction::Move, x, y, next()));
    }
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let mut out = PathBuf::from("target/out");
    if short.is_empty() {
        out.push(format!("chart_{}.png", suffix));
    } else {
        out.push(format!("chart_{}_{}.png", short, suffix));
    }
    out
}

/// Load Binance-like OHLC CSV. Rows with a missing or unparsable price keep
/// their date and become gaps; rows without a usable time are skipped.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |names: &[&str]| -> Option<usize> { headers.iter().position(|h| names.contains(&h.as_str())) };

    // Common Binance headers
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"])
        .context("no time column (time/timestamp/open_time/date/datetime)")?;
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        tracing::warn!("could not find one of open/high/low/close columns; those values will be gaps");
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| -> Option<f64> {
            i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok()).filter(|v| v.is_finite())
        };
        let Some(date) = rec.get(i_time).and_then(parse_time) else {
            skipped += 1;
            continue;
        };
        out.push(Candle {
            date,
            open: parse(i_open),
            high: parse(i_high),
            low: parse(i_low),
            close: parse(i_close),
        });
    }
    if skipped > 0 {
        tracing::warn!(skipped, "rows without a usable time were skipped");
    }
    out.sort_by_key(|c| c.date);
    out.dedup_by_key(|c| c.date);
    Ok(out)
}

/// Epoch seconds or milliseconds, RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` (UTC).
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms vs sec
        return if n > 10_i64.pow(11) {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Smallest positive step between consecutive candles; one minute if there is none.
/// A window `bars` candles wide (at least two) ending at `end`.
fn visible_range(end: DateTime<Utc>, interval: TimeDelta, bars: usize) -> Result<Range<DateTime<Utc>>> {
    let steps = i32::try_from(bars.max(2) - 1).context("--bars is too large")?;
    let span = interval.checked_mul(steps).context("--bars spans more time than can be represented")?;
    let start = end.checked_sub_signed(span).context("--bars reaches before the earliest representable date")?;
    Ok(Range::new(start, end))
}

fn infer_interval(candles: &[Candle]) -> TimeDelta {
    candles
        .windows(2)
        .map(|w| w[1].date - w[0].date)
        .filter(|d| *d > TimeDelta::zero())
        .min()
        .unwrap_or_else(|| TimeDelta::minutes(1))
}

fn swap_ext(p: &Path) -> Option<std::path::PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_common_time_formats() {
        let want = Utc.with_ymd_and_hms(2017, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(parse_time("1483608600"), Some(want));
        assert_eq!(parse_time("1483608600000"), Some(want));
        assert_eq!(parse_time("2017-01-05T09:30:00Z"), Some(want));
        assert_eq!(parse_time("2017-01-05 09:30:00"), Some(want));
        assert_eq!(parse_time("2017-01-05 09:30"), Some(want));
        assert_eq!(parse_time("not a date"), None);
    }

    #[test]
    fn interval_is_the_smallest_step() {
        let t = |m: i64| Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap() + TimeDelta::minutes(m);
        let candles = vec![Candle::empty(t(0)), Candle::empty(t(15)), Candle::empty(t(20)), Candle::empty(t(40))];
        assert_eq!(infer_interval(&candles), TimeDelta::minutes(5));
        assert_eq!(infer_interval(&candles[..1]), TimeDelta::minutes(1));
    }

    #[test]
    fn visible_range_ends_at_the_last_candle() {
        let end = Utc.with_ymd_and_hms(2017, 1, 31, 0, 0, 0).unwrap();
        let range = visible_range(end, TimeDelta::days(1), 31).unwrap();
        assert_eq!(range, Range::new(Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap(), end));
        assert_eq!(visible_range(end, TimeDelta::days(1), 0).unwrap().start, end - TimeDelta::days(1));
    }

    #[test]
    fn oversized_bar_counts_are_errors() {
        let end = Utc.with_ymd_and_hms(2017, 1, 31, 0, 0, 0).unwrap();
        assert!(visible_range(end, TimeDelta::days(1), usize::MAX).is_err());
        assert!(visible_range(end, TimeDelta::days(1), i32::MAX as usize).is_err());
    }

    #[test]
    fn swaps_csv_extension() {
        assert_eq!(swap_ext(Path::new("a.cvs")), Some(PathBuf::from("a.csv")));
        assert_eq!(swap_ext(Path::new("a.csv")), Some(PathBuf::from("a.cvs")));
        assert_eq!(swap_ext(Path::new("a.txt")), None);
    }
}

// File: crates/chartboard-skia/tests/snapshot.rs
// Purpose: Skia layers: device pixel ratio, compositing, and a golden board snapshot with bless flow.
// Behavior:
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use std::rc::Rc;

use chartboard_core::{
    ArrayDataSource, BoardOptions, Candle, Chart, ChartBoard, ChartError, Color, DrawingTarget, MovingAverage,
    PointerAction, PointerEvent, Range, RedrawLayers, RendererRegistry, TextMeasure, Theme,
};
use chartboard_skia::{LayeredSurface, SkiaTarget};
use chrono::{TimeDelta, TimeZone, Utc};

const RED: Color = Color::from_rgb(255, 0, 0);

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn device_pixel_ratio_scales_the_raster() -> anyhow::Result<()> {
    let mut target = SkiaTarget::new(20.0, 10.0, 2.0)?;
    target.set_fill_style(RED);
    target.fill_rect(0.0, 0.0, 5.0, 5.0);

    let img = decode(&target.encode_png()?);
    assert_eq!(img.dimensions(), (40, 20));
    assert_eq!(img.get_pixel(8, 8).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(12, 12).0[3], 0);
    Ok(())
}

#[test]
fn invalid_sizes_are_rejected() {
    assert!(matches!(SkiaTarget::new(0.0, 10.0, 1.0), Err(ChartError::InvalidDimensions { .. })));
    assert!(matches!(SkiaTarget::new(10.0, f64::NAN, 1.0), Err(ChartError::InvalidDimensions { .. })));
}

#[test]
fn clear_resets_to_transparent() -> anyhow::Result<()> {
    let mut target = SkiaTarget::new(10.0, 10.0, 1.0)?;
    target.set_fill_style(RED);
    target.fill_rect(0.0, 0.0, 10.0, 10.0);
    target.clear();
    let img = decode(&target.encode_png()?);
    assert!(img.pixels().all(|p| p.0[3] == 0));
    Ok(())
}

#[test]
fn text_is_measured_even_when_not_drawn() -> anyhow::Result<()> {
    let mut target = SkiaTarget::new(10.0, 10.0, 1.0)?;
    target.set_draw_labels(false);
    target.fill_text("2017-1-1 0:00", 0.0, 0.0, None);
    let img = decode(&target.encode_png()?);
    assert!(img.pixels().all(|p| p.0[3] == 0));
    assert!(target.measure_text("").width <= target.measure_text("2017-1-1 0:00").width);
    Ok(())
}

#[test]
fn front_layer_composites_over_base() -> anyhow::Result<()> {
    let theme = Theme::default();
    let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let mut board = ChartBoard::new(
        BoardOptions { width: 200.0, height: 120.0, ..BoardOptions::default() },
        Range::new(start, start + TimeDelta::days(30)),
        TimeDelta::days(1),
        RendererRegistry::with_defaults(&theme),
    )?;
    board.add_stack(1.0);

    let mut layers = LayeredSurface::for_board(&board, 1.0)?;
    layers.set_draw_labels(false);
    layers.render(&mut board, RedrawLayers::ALL)?;

    // the vertical crosshair line lands on the pixel column at x = 100
    board.handle_event(PointerEvent::mouse(PointerAction::Move, 100.0, 50.0, 0));
    layers.render(&mut board, RedrawLayers::FRONT)?;

    let img = decode(&layers.encode_png()?);
    let bg = theme.background;
    assert_eq!(img.get_pixel(2, 2).0, [bg.r, bg.g, bg.b, 255]);
    let c = theme.crosshair;
    assert_eq!(img.get_pixel(100, 30).0, [c.r, c.g, c.b, 255]);

    // leaving clears the front without repainting the base
    board.handle_event(PointerEvent::mouse(PointerAction::Leave, 0.0, 0.0, 1));
    layers.render(&mut board, RedrawLayers::FRONT)?;
    let img = decode(&layers.encode_png()?);
    assert_ne!(img.get_pixel(100, 30).0, [c.r, c.g, c.b, 255]);
    Ok(())
}

#[test]
fn empty_board_paints_only_its_background() -> anyhow::Result<()> {
    let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let mut board = ChartBoard::new(
        BoardOptions { width: 10.0, height: 10.0, ..BoardOptions::default() },
        Range::new(start, start + TimeDelta::days(1)),
        TimeDelta::hours(1),
        RendererRegistry::new(),
    )?;
    let mut layers = LayeredSurface::for_board(&board, 1.0)?;
    layers.render(&mut board, RedrawLayers::ALL)?;
    let img = decode(&layers.encode_png()?);
    let bg = board.options().theme.background;
    assert_eq!(img.get_pixel(5, 5).0, [bg.r, bg.g, bg.b, 255]);
    Ok(())
}

fn render_board_bytes() -> anyhow::Result<Vec<u8>> {
    let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let interval = TimeDelta::hours(6);
    let candles: Vec<Candle> = (0..60)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.3).sin() * 8.0;
            let close = base + (i as f64 * 0.7).cos() * 2.0;
            Candle::new(start + interval * i, base, base.max(close) + 1.0, base.min(close) - 1.0, close)
        })
        .collect();
    let end = start + interval * 59;

    let theme = Theme::default();
    let mut board = ChartBoard::new(
        BoardOptions { width: 480.0, height: 300.0, ..BoardOptions::default() },
        Range::new(start, end),
        interval,
        RendererRegistry::with_defaults(&theme),
    )?;
    let source = Rc::new(ArrayDataSource::new(interval, candles));
    let price = board.add_stack(3.0);
    board.add_chart(price, Chart::candlestick(source.clone()));
    board.add_chart(price, Chart::line(Rc::new(MovingAverage::new(source, 5))));

    let mut layers = LayeredSurface::for_board(&board, 1.0)?;
    // avoid text nondeterminism across platforms
    layers.set_draw_labels(false);
    layers.render(&mut board, RedrawLayers::ALL)?;
    Ok(layers.encode_png()?)
}

#[test]
fn golden_candle_board() -> anyhow::Result<()> {
    let bytes = render_board_bytes()?;
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("candle_board.png");

    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir)?;
        std::fs::write(&snap_path, &bytes)?;
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return Ok(());
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path)?;
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = decode(&bytes);
        let want_img = decode(&want);
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
    Ok(())
}

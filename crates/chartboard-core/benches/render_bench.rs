use anyhow::Result;
use chartboard_core::{
    ArrayDataSource, BoardOptions, Candle, Chart, ChartBoard, MovingAverage, Range, Recorder, RedrawLayers,
    RendererRegistry, Theme,
};
use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::rc::Rc;

fn build_board(n: usize) -> Result<ChartBoard> {
    let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let interval = TimeDelta::minutes(1);
    let mut candles = Vec::with_capacity(n);
    for i in 0..n {
        let base = (i as f64 * 0.01).sin() * 10.0 + 100.0;
        candles.push(Candle::new(start + interval * i as i32, base, base + 1.5, base - 1.5, base + 0.5));
    }
    let end = start + interval * (n as i32 - 1);

    let source = Rc::new(ArrayDataSource::new(interval, candles));
    let mut board = ChartBoard::new(
        BoardOptions { width: 1200.0, height: 700.0, ..BoardOptions::default() },
        Range::new(start, end),
        interval,
        RendererRegistry::with_defaults(&Theme::default()),
    )?;
    let price = board.add_stack(3.0);
    board.add_chart(price, Chart::candlestick(source.clone()));
    board.add_chart(price, Chart::line(Rc::new(MovingAverage::new(source, 20))));
    Ok(board)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_base_pass");
    for &n in &[200usize, 1_000usize] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut board = build_board(n).expect("board");
            b.iter(|| -> Result<()> {
                let (mut base, mut front) = (Recorder::new(), Recorder::new());
                board.render(RedrawLayers::ALL, &mut base, &mut front)?;
                black_box(base.commands().len());
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

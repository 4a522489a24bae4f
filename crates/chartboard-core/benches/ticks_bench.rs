use chartboard_core::ticks::generate_ticks;
use chartboard_core::{Range, TickSelector};
use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_select(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
    let selector = TickSelector::default();
    let mut group = c.benchmark_group("tick_select");
    for &days in &[1i64, 30, 365] {
        let range = Range::new(start, start + TimeDelta::days(days));
        group.bench_with_input(BenchmarkId::from_parameter(days), &range, |b, range| {
            b.iter(|| black_box(selector.select(black_box(1000.0), TimeDelta::minutes(1), range)));
        });
    }
    group.finish();

    let range = Range::new(start, start + TimeDelta::days(365));
    c.bench_function("generate_ticks_hourly_year", |b| {
        b.iter(|| black_box(generate_ticks(black_box(3_600_000), &range)));
    });
}

criterion_group!(benches, bench_select);
criterion_main!(benches);

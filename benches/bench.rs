// Criterion benchmarks for Raceboard

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use raceboard::core::{
    distance::haversine_distance,
    leaderboard::LeaderboardBuilder,
    track::{sample_track, MAX_CHART_POINTS},
};
use raceboard::models::{RawResultRow, TrackPoint};
use serde_json::json;

fn create_row(i: usize) -> RawResultRow {
    serde_json::from_value(json!({
        "Overall Rank": (i % 7 != 0).then(|| (i + 1).to_string()).unwrap_or_default(),
        "Gender Rank": ((i / 2) + 1).to_string(),
        "BIB": format!("{}", 1000 - i),
        "Name": format!("Runner_{}", i),
        "GENDER": if i % 2 == 0 { "pria" } else { "f_ma_e" },
        "Nation": "INA",
        "Club": "Trail Club",
        "Finish Time": "04_15_22",
        "NetTime": "04:14:58",
        "Gap": "00:01:00",
        "Status": "Finished",
    }))
    .unwrap()
}

fn create_track(len: usize) -> Vec<TrackPoint> {
    (0..len)
        .map(|i| TrackPoint {
            distance_km: i as f64 * 0.01,
            elevation_m: (i % 200) as f64,
            lat: i as f64 * 0.0001,
            lon: 0.0,
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_leaderboard_build(c: &mut Criterion) {
    let builder = LeaderboardBuilder::new();
    let mut group = c.benchmark_group("leaderboard");

    for row_count in [50, 200, 1000].iter() {
        let rows: Vec<RawResultRow> = (0..*row_count).map(create_row).collect();

        group.bench_with_input(BenchmarkId::new("build", row_count), row_count, |b, _| {
            b.iter(|| builder.build(black_box(&rows), black_box(&[])));
        });
    }

    group.finish();
}

fn bench_track_sampling(c: &mut Criterion) {
    let track = create_track(10_000);

    c.bench_function("sample_track_10k_points", |b| {
        b.iter(|| sample_track(black_box(&track), black_box(MAX_CHART_POINTS)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_leaderboard_build,
    bench_track_sampling
);

criterion_main!(benches);

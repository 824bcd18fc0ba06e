use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fieldguard_core::{
    aggregate_readings, haversine_distance, is_point_in_polygon, rollup, Geofence, Granularity,
    Point, Reading,
};

const SENSOR: &str = "123e4567-e89b-12d3-a456-426614174000";

fn bench_haversine(c: &mut Criterion) {
    let london = Point::new(51.5074, -0.1278);
    let paris = Point::new(48.8566, 2.3522);

    c.bench_function("haversine_distance", |b| {
        b.iter(|| haversine_distance(black_box(&london), black_box(&paris)))
    });
}

fn bench_geofence(c: &mut Criterion) {
    // 64-gon approximating a plot boundary
    let ring: Vec<Point> = (0..64)
        .map(|i| {
            let theta = f64::from(i) / 64.0 * std::f64::consts::TAU;
            Point::new(theta.sin() * 0.01, theta.cos() * 0.01)
        })
        .collect();
    let inside = Point::new(0.001, 0.002);

    c.bench_function("point_in_polygon_64", |b| {
        b.iter(|| is_point_in_polygon(black_box(&inside), black_box(&ring)))
    });

    let site = Geofence::circle(Point::new(-1.2921, 36.8219), 250.0, 50.0).unwrap();
    c.bench_function("circle_verify", |b| {
        b.iter(|| site.verify(black_box(&Point::new(-1.2946, 36.8219))))
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
    let readings: Vec<Reading> = (0..10_000)
        .map(|i| Reading::new(SENSOR, f64::from(i % 97), start + Duration::seconds(i64::from(i) * 8)))
        .collect();

    c.bench_function("aggregate_10k", |b| {
        b.iter(|| aggregate_readings(black_box(&readings)))
    });

    c.bench_function("rollup_hourly_10k", |b| {
        b.iter(|| rollup(black_box(&readings), Granularity::Hourly))
    });
}

criterion_group!(benches, bench_haversine, bench_geofence, bench_aggregation);
criterion_main!(benches);

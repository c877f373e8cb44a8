use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datebook_core::models::{NewSeriesData, Termination, WeekdaySet};
use datebook_core::recurrence::RecurrenceGenerator;
use datebook_core::repository::{EventRepository, EventStore};

fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, 0, 0).unwrap()
}

fn series(weekdays: &str, termination: Termination) -> NewSeriesData {
    let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    NewSeriesData::new(
        "Benchmark",
        at(day, 9),
        at(day, 10),
        weekdays.parse().unwrap(),
        termination,
    )
}

fn bench_expand_by_count(c: &mut Criterion) {
    let generator = RecurrenceGenerator::new();
    let mut group = c.benchmark_group("expand_by_count");

    for count in [10u32, 100, 1000].iter() {
        let data = series("MWF", Termination::Count(*count));
        group.bench_with_input(BenchmarkId::new("occurrences", count), count, |b, _| {
            b.iter(|| generator.expand(black_box(&data)).unwrap())
        });
    }
    group.finish();
}

fn bench_expand_until(c: &mut Criterion) {
    let generator = RecurrenceGenerator::new();
    let mut group = c.benchmark_group("expand_until");

    for days in [30u64, 365, 3650].iter() {
        let until = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .checked_add_days(chrono::Days::new(*days))
            .unwrap();
        let data = series("U", Termination::Until(until));
        group.bench_with_input(BenchmarkId::new("days", days), days, |b, _| {
            b.iter(|| generator.expand(black_box(&data)).unwrap())
        });
    }
    group.finish();
}

fn bench_store_queries(c: &mut Criterion) {
    let mut store = EventStore::new();
    let occurrences = RecurrenceGenerator::new()
        .expand(&NewSeriesData::new(
            "Daily",
            at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 9),
            at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 17),
            WeekdaySet::all(),
            Termination::Count(2000),
        ))
        .unwrap();
    store.add_all(occurrences).unwrap();

    let day = NaiveDate::from_ymd_opt(2027, 3, 15).unwrap();

    c.bench_function("is_busy_2000_events", |b| {
        b.iter(|| store.is_busy(black_box(at(day, 12))))
    });
    c.bench_function("events_on_2000_events", |b| {
        b.iter(|| store.events_on(black_box(day)).len())
    });
    c.bench_function("events_in_range_month", |b| {
        b.iter(|| {
            store
                .events_in_range(
                    black_box(at(day, 0)),
                    black_box(at(NaiveDate::from_ymd_opt(2027, 4, 15).unwrap(), 0)),
                )
                .len()
        })
    });
}

criterion_group!(
    benches,
    bench_expand_by_count,
    bench_expand_until,
    bench_store_queries
);
criterion_main!(benches);

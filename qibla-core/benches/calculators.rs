use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qibla_core::{
    astro::{julian_date, solar_declination, solar_noon},
    next_prayer, qibla_bearing, CalculationMethod, CivilDate, ClockTime, CompassConfig,
    CompassEngine, GeoPoint, MagneticSample, PrayerCalculator, ReplayMagnetometer,
};

fn astronomy_bench(c: &mut Criterion) {
    let date = CivilDate::new(2024, 6, 21).unwrap();
    let jd = julian_date(date);

    let mut group = c.benchmark_group("astro");
    group.bench_function("julian_date", |b| b.iter(|| julian_date(black_box(date))));
    group.bench_function("solar_declination", |b| {
        b.iter(|| solar_declination(black_box(jd)))
    });
    group.bench_function("solar_noon", |b| {
        b.iter(|| solar_noon(black_box(jd), black_box(-74.006)))
    });
    group.finish();
}

fn prayer_bench(c: &mut Criterion) {
    let new_york = GeoPoint::new(40.7128, -74.0060).unwrap();
    let tromso = GeoPoint::new(69.6492, 18.9553).unwrap();
    let date = CivilDate::new(2024, 6, 21).unwrap();
    let calc = PrayerCalculator::new(CalculationMethod::MuslimWorldLeague);
    let times = calc.calculate(new_york, date, -4.0);

    let mut group = c.benchmark_group("prayer");
    group.bench_function("calculate_mid_latitude", |b| {
        b.iter(|| calc.calculate(black_box(new_york), black_box(date), -4.0))
    });
    group.bench_function("calculate_polar_fallback", |b| {
        b.iter(|| calc.calculate(black_box(tromso), black_box(date), 2.0))
    });
    group.bench_function("next_prayer", |b| {
        b.iter(|| next_prayer(black_box(&times), black_box(ClockTime::from_minutes(1300))))
    });
    group.finish();
}

fn compass_bench(c: &mut Criterion) {
    let new_york = GeoPoint::new(40.7128, -74.0060).unwrap();

    let mut group = c.benchmark_group("compass");
    group.bench_function("qibla_bearing", |b| b.iter(|| qibla_bearing(black_box(new_york))));

    let mut engine = CompassEngine::new(CompassConfig::default());
    engine.initialize(new_york);
    engine
        .start_updates(ReplayMagnetometer::new(Vec::new()), |_| {})
        .unwrap();
    let sample = MagneticSample::new(15.6, 25.4, -42.0);
    group.bench_function("handle_sample", |b| {
        b.iter(|| engine.handle_sample(black_box(sample)))
    });
    group.finish();
}

criterion_group!(benches, astronomy_bench, prayer_bench, compass_bench);
criterion_main!(benches);

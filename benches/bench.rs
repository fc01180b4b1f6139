use batchfft::strategies::TransformPlan;
use batchfft::{
    BackendThreads, BatchDescriptor, BatchStrategy, BenchmarkConfig, ManualParallel, NativeBatch,
    PlanningMode, Real, SignalBatch,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};

const LENGTHS: &[usize] = &[6, 8, 10, 12, 14];
const BATCH: usize = 64;
const THREADS: usize = 4;

fn bench_strategy<T: Real, S: BatchStrategy>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    id: &str,
    strategy: &S,
    config: &BenchmarkConfig,
) {
    let _threads = BackendThreads::configure(strategy.backend_threads(config)).unwrap();
    let plan = strategy.build_plan::<T>(config).unwrap();

    group.bench_function(BenchmarkId::new(id, config.length()), |b| {
        b.iter_batched(
            || SignalBatch::<T>::generate(config).unwrap(),
            |mut signal| plan.execute(signal.as_mut_slice()).unwrap(),
            BatchSize::LargeInput,
        );
    });
}

fn benchmark_strategies_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Strategies f32");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        let config = BenchmarkConfig::new(BATCH, len, THREADS).unwrap();
        group.throughput(Throughput::Elements((BATCH * len) as u64));

        bench_strategy::<f32, _>(&mut group, "native-batch", &NativeBatch::default(), &config);
        let manual = ManualParallel::default();
        bench_strategy::<f32, _>(&mut group, "manual-parallel", &manual, &config);
        bench_strategy::<f32, _>(&mut group, "batch-descriptor", &BatchDescriptor, &config);
    }
    group.finish();
}

fn benchmark_strategies_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Strategies f64");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        let config = BenchmarkConfig::new(BATCH, len, THREADS).unwrap();
        group.throughput(Throughput::Elements((BATCH * len) as u64));

        bench_strategy::<f64, _>(&mut group, "native-batch", &NativeBatch::default(), &config);
        let manual = ManualParallel::default();
        bench_strategy::<f64, _>(&mut group, "manual-parallel", &manual, &config);
        bench_strategy::<f64, _>(&mut group, "batch-descriptor", &BatchDescriptor, &config);
    }
    group.finish();
}

fn benchmark_planning_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Planning");

    // non power of two lengths give the measured search more to choose from
    for len in [1000, 1536, 4096, 6000] {
        let config = BenchmarkConfig::new(BATCH, len, 1).unwrap();
        group.throughput(Throughput::Elements((BATCH * len) as u64));

        for (id, planning) in [
            ("estimate", PlanningMode::Estimate),
            ("measure", PlanningMode::Measure),
        ] {
            bench_strategy::<f64, _>(&mut group, id, &NativeBatch { planning }, &config);
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_strategies_f32,
    benchmark_strategies_f64,
    benchmark_planning_modes
);
criterion_main!(benches);

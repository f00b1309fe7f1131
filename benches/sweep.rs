use bpsweep::sweep::{Naming, SweepPlan};
use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let plan = SweepPlan {
        simulator: "./build/X86/gem5.opt".into(),
        benchmarks: (0..128).map(|i| format!("CC{i}")).collect(),
        predictors: ["LocalBP", "BiModeBP", "PerceptronBP", "TournamentBP"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        jobs: 1,
        benchmarks_dir: "microbench".into(),
        config_script: "configs/deprecated/example/se.py".into(),
        outdir: "out".into(),
        naming: Naming {
            tag_predictor: true,
            dump_config: true,
        },
    };

    c.bench_function("enumerate_specs", |b| b.iter(|| plan.specs()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

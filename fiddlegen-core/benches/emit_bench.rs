//! Criterion benchmarks for the generator.
//!
//! Benchmarks:
//! 1. Catalog walk + classification over synthetic catalogs
//! 2. Rendering all five artifacts in memory

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fiddlegen_core::descriptor::{
    EnumPair, FunctionDescriptor, InputDescriptor, InputKind, OptInputDescriptor, OptInputKind,
    OutputDescriptor, OutputKind,
};
use fiddlegen_core::{CatalogDump, GeneratorConfig, Plan};

// ── Helpers ──────────────────────────────────────────────────────────

/// Mix of real-input, price-tuple and two-input functions, ten per group.
fn make_catalog(n: usize) -> CatalogDump {
    let mut dump = CatalogDump::default();
    for i in 0..n {
        let input_kind = if i % 3 == 0 { InputKind::Price } else { InputKind::Real };
        let mut inputs = vec![InputDescriptor {
            name: "in0".into(),
            kind: input_kind,
        }];
        if i % 5 == 1 {
            inputs.push(InputDescriptor {
                name: "in1".into(),
                kind: InputKind::Real,
            });
        }
        let descriptor = FunctionDescriptor {
            name: format!("FN{i}"),
            camel_case_name: format!("Fn{i}"),
            group: String::new(),
            hint: format!("Synthetic function {i}"),
            inputs,
            opt_inputs: vec![
                OptInputDescriptor {
                    name: "optInTimePeriod".into(),
                    display_name: "Time Period".into(),
                    default_value: 14.0,
                    kind: OptInputKind::IntegerRange {
                        suggested_start: 2,
                        suggested_end: 200,
                    },
                },
                OptInputDescriptor {
                    name: "optInNbDev".into(),
                    display_name: "Deviations".into(),
                    default_value: 2.0,
                    kind: OptInputKind::RealRange {
                        suggested_start: 0.5,
                        suggested_end: 3.0,
                    },
                },
                OptInputDescriptor {
                    name: "optInMAType".into(),
                    display_name: "MA Type".into(),
                    default_value: 0.0,
                    kind: OptInputKind::IntegerList {
                        values: (0..9)
                            .map(|v| EnumPair {
                                label: format!("MA{v}"),
                                value: v,
                            })
                            .collect(),
                    },
                },
            ],
            outputs: vec![
                OutputDescriptor {
                    name: "outReal".into(),
                    kind: OutputKind::Real,
                },
                OutputDescriptor {
                    name: "outInteger".into(),
                    kind: OutputKind::Integer,
                },
            ],
        };
        dump.push(&format!("Group {}", i / 10), descriptor);
    }
    dump
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let config = GeneratorConfig::default();

    for &size in &[50, 160, 500] {
        let dump = make_catalog(size);
        group.bench_with_input(BenchmarkId::new("classify", size), &size, |b, _| {
            b.iter(|| Plan::build(black_box(&dump), black_box(&config)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = GeneratorConfig::default();

    for &size in &[50, 160, 500] {
        let dump = make_catalog(size);
        let plan = Plan::build(&dump, &config).unwrap();
        group.bench_with_input(BenchmarkId::new("all_artifacts", size), &size, |b, _| {
            b.iter(|| black_box(&plan).render("fiddlegen_runtime"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walk, bench_render);
criterion_main!(benches);

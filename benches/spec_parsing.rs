//! Benchmarks for configuration, spec and tag parsing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use entity_catalog::config::Configuration;
use entity_catalog::spec::SpecBody;
use entity_catalog::tag::parse_tag;

const SMALL_SPEC: &str = "name: ds\ntype: dataset\nversion: 1\n";

const LARGE_SPEC: &str = r#"
dataset:
  categories:
    - computer-vision
    - images
    - classification
  manifest:
    files: MANIFEST.yaml
    storage: s3h://mlgit-datasets
    amount: 1281167
    size: 147.9 GB
  mutability: strict
  name: imagenet
  version: 42
  metadata:
    license: custom
    source: https://image-net.org
    annotations: [bounding-boxes, synsets]
"#;

/// A configuration naming `n` remotes.
fn config_with_remotes(n: usize) -> String {
    let mut yaml = String::from("remotes:\n");
    for i in 0..n {
        yaml.push_str(&format!("  role{}: org/repo-{}\n", i, i));
    }
    yaml
}

fn bench_spec_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("spec_parsing");
    for (label, spec) in [("small", SMALL_SPEC), ("large", LARGE_SPEC)] {
        group.bench_with_input(BenchmarkId::from_parameter(label), spec, |b, spec| {
            b.iter(|| SpecBody::from_yaml("bench.spec", black_box(spec)).unwrap())
        });
    }
    group.finish();
}

fn bench_config_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");
    for n in [1, 10, 100] {
        let yaml = config_with_remotes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &yaml, |b, yaml| {
            b.iter(|| Configuration::from_yaml(black_box(yaml)).unwrap())
        });
    }
    group.finish();
}

fn bench_tag_parsing(c: &mut Criterion) {
    c.bench_function("parse_tag", |b| {
        b.iter(|| parse_tag(black_box("computer-vision__images__imagenet__42")))
    });
}

criterion_group!(
    benches,
    bench_spec_parsing,
    bench_config_parsing,
    bench_tag_parsing
);
criterion_main!(benches);

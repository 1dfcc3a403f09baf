use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scour::{search, SearchConfig};
use std::fs::File;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use tempfile::TempDir;

fn plain_tempdir() -> TempDir {
    // tempfile's default `.tmp` prefix would trip the dotfile filter.
    tempfile::Builder::new()
        .prefix("scour-bench-")
        .tempdir()
        .unwrap()
}

fn create_test_files(dir: &TempDir, file_count: usize, lines_per_file: usize) -> io::Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("bench_{}.txt", i));
        let mut file = File::create(file_path)?;
        for j in 0..lines_per_file {
            writeln!(
                file,
                "line {} TODO: fix bug {} FIXME: optimize line {} NOTE: task {}",
                j, j, j, j
            )?;
        }
    }
    Ok(())
}

fn base_config(dir: &TempDir, pattern: &str) -> SearchConfig {
    SearchConfig {
        pattern: pattern.to_string(),
        roots: vec![dir.path().to_path_buf()],
        ignore_files: vec![],
        ..Default::default()
    }
}

fn bench_pattern_shapes(c: &mut Criterion) {
    let dir = plain_tempdir();
    create_test_files(&dir, 10, 200).unwrap();

    let patterns = [
        "TODO",
        r"TODO:.*\d+",
        r"FIXME:.*bug.*line \d+",
        r"NOTE:.*task \d+",
    ];

    let mut group = c.benchmark_group("Pattern Shapes");
    for (i, pattern) in patterns.iter().enumerate() {
        let config = base_config(&dir, pattern);
        group.bench_function(format!("pattern_{}", i), |b| {
            b.iter(|| black_box(search(&config, &mut io::sink()).unwrap()));
        });
    }
    group.finish();
}

fn bench_pool_scaling(c: &mut Criterion) {
    let dir = plain_tempdir();
    create_test_files(&dir, 50, 100).unwrap();

    let mut group = c.benchmark_group("Pool Scaling");
    for workers in [1, 4, 8, 20] {
        let mut config = base_config(&dir, "TODO");
        config.workers = NonZeroUsize::new(workers).unwrap();
        group.bench_function(format!("workers_{}", workers), |b| {
            b.iter(|| black_box(search(&config, &mut io::sink()).unwrap()));
        });
    }
    group.finish();
}

fn bench_file_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("File Scaling");
    for file_count in [1, 10, 100] {
        let dir = plain_tempdir();
        create_test_files(&dir, file_count, 50).unwrap();
        let config = base_config(&dir, "TODO");
        group.bench_function(format!("files_{}", file_count), |b| {
            b.iter(|| black_box(search(&config, &mut io::sink()).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_pattern_shapes,
    bench_pool_scaling,
    bench_file_scaling
);
criterion_main!(benches);

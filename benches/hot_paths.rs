//! Performance benchmarks for snub's hot paths.
//!
//! Measures the operations that dominate a large traversal:
//! - glob matching under backtracking-heavy patterns
//! - the combined predicate engine's per-file evaluation cost
//!
//! Run with: `cargo bench`
//! View reports: `open target/criterion/report/index.html`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use snub::pattern::{glob_match, pattern_matches};
use snub::platform::dir_iter::Entry;
use snub::predicate::matches;
use snub::types::{SearchCriteria, SearchFlags, SearchLimits, SizeBand, TimeWindow};
use std::time::SystemTime;

fn bench_glob_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("glob_match");

    let cases = [
        ("plain_star", "report_2024_final.txt", "*.txt"),
        ("backtracking", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaab", "*a*a*a*a*a*b"),
        ("char_class", "image_07.png", "image_[0-9][0-9].[pP][nN][gG]"),
    ];

    for (name, text, pattern) in cases {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(text, pattern), |b, (text, pattern)| {
            b.iter(|| black_box(glob_match(text, pattern, false)))
        });
    }

    group.finish();
}

fn bench_pattern_matches_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_matches");

    group.bench_function("substring", |b| {
        b.iter(|| black_box(pattern_matches("README.md", "readme", false, false)))
    });
    group.bench_function("glob", |b| {
        b.iter(|| black_box(pattern_matches("README.md", "*.md", false, true)))
    });
    group.bench_function("brace", |b| {
        b.iter(|| black_box(pattern_matches("README.md", "readme.{txt,md}", false, true)))
    });

    group.finish();
}

fn bench_predicate_engine(c: &mut Criterion) {
    let criteria = SearchCriteria {
        root: ".".to_string(),
        search_term: "*.rs".to_string(),
        extensions: vec!["rs".to_string()],
        size: SizeBand {
            min: Some(0),
            max: Some(1_000_000),
            exact: None,
        },
        time: TimeWindow::default(),
        flags: SearchFlags {
            use_glob: true,
            ..SearchFlags::default()
        },
        limits: SearchLimits::default(),
    };

    let entry = Entry {
        name: "traversal.rs".to_string(),
        size: 4_096,
        mtime: SystemTime::now(),
        is_dir: false,
        is_symlink: false,
    };

    c.bench_function("predicate_full_chain", |b| {
        b.iter(|| black_box(matches(black_box(&entry), black_box(&criteria))))
    });
}

criterion_group!(benches, bench_glob_match, bench_pattern_matches_dispatch, bench_predicate_engine);
criterion_main!(benches);

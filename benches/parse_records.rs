use collision_csv::{Layout, RawLine, parser};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample_lines(count: usize) -> Vec<RawLine> {
    (0..count)
        .map(|i| {
            let tokens: Vec<String> = (0..18).map(|t| format!("{}.{}", i, t)).collect();
            RawLine::new(i + 2, tokens.join(" "))
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let lines = sample_lines(10_000);

    c.bench_function("parse_basic_10k", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parser::parse(line, Layout::Basic).unwrap());
            }
        })
    });

    c.bench_function("parse_extended_10k", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parser::parse(line, Layout::Extended).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);

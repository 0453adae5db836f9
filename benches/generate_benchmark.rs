//! Benchmarks for manual generation.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rostermanual::builder::DocumentBuilder;
use rostermanual::docx::DocxWriter;
use rostermanual::render::{to_markdown, RenderOptions};
use rostermanual::{build_manual, inspect_bytes, ManualConfig, Row};

fn fixed_config() -> ManualConfig {
    ManualConfig {
        created: Some("2025-10-01T00:00:00Z".to_string()),
        ..Default::default()
    }
}

/// A synthetic document of `steps` numbered steps split into runs of ten,
/// with a small table after each run.
fn synthetic_document(steps: usize) -> rostermanual::Document {
    let mut builder = DocumentBuilder::new();
    builder.add_heading("Benchmark", 0);
    for chunk in 0..steps.div_ceil(10) {
        builder
            .start_section(format!("{}. Chapter", chunk + 1))
            .add_heading(format!("{}. Chapter", chunk + 1), 1)
            .add_bold_paragraph("Steps:");
        for i in 0..10.min(steps - chunk * 10) {
            builder.add_numbered(format!("Step {} of chapter {}", i + 1, chunk + 1));
        }
        builder.add_table(
            Some(Row::header(["Code", "Meaning"])),
            vec![Row::from_texts(["DO", "Day Off"])],
            "LightGridAccent1",
        );
    }
    builder.build()
}

/// Benchmark building and writing the full manual.
fn bench_manual(c: &mut Criterion) {
    let config = fixed_config();
    let writer = DocxWriter::new().with_created("2025-10-01T00:00:00Z");

    c.bench_function("build_manual", |b| {
        b.iter(|| build_manual(black_box(&config)))
    });

    let doc = build_manual(&config);
    c.bench_function("write_manual_docx", |b| {
        b.iter(|| writer.to_bytes(black_box(&doc)))
    });

    let bytes = writer.to_bytes(&doc).unwrap();
    c.bench_function("read_manual_docx", |b| {
        b.iter(|| inspect_bytes(black_box(&bytes)))
    });

    c.bench_function("render_manual_markdown", |b| {
        let options = RenderOptions::default();
        b.iter(|| to_markdown(black_box(&doc), &options))
    });
}

/// Benchmark DOCX writing at various sizes.
fn bench_docx_writing(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_writing");
    let writer = DocxWriter::new().with_created("2025-10-01T00:00:00Z");

    for steps in [10, 100, 1000].iter() {
        let doc = synthetic_document(*steps);
        group.throughput(Throughput::Elements(*steps as u64));
        group.bench_with_input(BenchmarkId::new("steps", steps), &doc, |b, doc| {
            b.iter(|| writer.to_bytes(black_box(doc)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_manual, bench_docx_writing);
criterion_main!(benches);

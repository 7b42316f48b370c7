//! Performance benchmarks for PDF Workbench
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_workbench::pdf::{add_watermark, QpdfWrapper};

/// Letter-sized PDF with one line of text per page
fn generate_pdf(num_pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for page_num in 1..=num_pages {
        let content = format!("BT /F1 12 Tf 50 700 Td (Bench-Page-{}) Tj ET", page_num);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set(
            "MediaBox",
            Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
        );
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(num_pages as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to build benchmark PDF");
    buffer
}

/// Benchmark merging several documents into one
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for count in [2usize, 8, 32] {
        let inputs: Vec<Vec<u8>> = (0..count).map(|_| generate_pdf(5)).collect();
        let refs: Vec<&[u8]> = inputs.iter().map(Vec::as_slice).collect();
        let total: usize = inputs.iter().map(Vec::len).sum();

        group.throughput(Throughput::Bytes(total as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &refs, |b, refs| {
            b.iter(|| QpdfWrapper::merge(black_box(refs)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark splitting a large document into ranges
fn bench_split(c: &mut Criterion) {
    let data = generate_pdf(100);

    let mut group = c.benchmark_group("split");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for ranges in ["1-50", "1-25,26-50,51-75,76-100", "z-z"] {
        group.bench_with_input(BenchmarkId::from_parameter(ranges), ranges, |b, ranges| {
            b.iter(|| QpdfWrapper::split(black_box(&data), ranges).unwrap());
        });
    }

    group.finish();
}

/// Benchmark object-stream compression
fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for pages in [10u32, 100] {
        let data = generate_pdf(pages);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &data, |b, data| {
            b.iter(|| QpdfWrapper::compress(black_box(data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark stamping a watermark on every page
fn bench_watermark(c: &mut Criterion) {
    let data = generate_pdf(50);

    let mut group = c.benchmark_group("watermark");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("50_pages", |b| {
        b.iter(|| add_watermark(black_box(&data), "CONFIDENTIAL").unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_split, bench_compress, bench_watermark);
criterion_main!(benches);

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use phonoscribe::g2p::GraphemeTranscriber;
use phonoscribe::{
    MissingWordPolicy, PronouncingDictionary, TranscriptionRequest, TranscriptionRouter,
    transcribe_batch,
};
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog while the nation \
                        watches school children throw sticks at the thick oak";

fn fixture_dictionary() -> PronouncingDictionary {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini_cmudict.dict");
    PronouncingDictionary::from_file(&path).expect("Failed to load dictionary fixture")
}

fn bench_fallback(c: &mut Criterion) {
    let transcriber = GraphemeTranscriber::with_defaults().expect("Invalid built-in table");
    let mut group = c.benchmark_group("fallback");

    for repeat in [1usize, 10, 100] {
        let text = vec![SENTENCE; repeat].join(" ");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("transcribe", repeat), &text, |b, text| {
            b.iter(|| transcriber.transcribe(black_box(text)))
        });
    }

    group.finish();
}

fn bench_router(c: &mut Criterion) {
    let router = TranscriptionRouter::new(
        GraphemeTranscriber::with_defaults().expect("Invalid built-in table"),
    )
    .with_dictionary(Arc::new(fixture_dictionary()))
    .with_missing_word_policy(MissingWordPolicy::Fallback);

    let native = TranscriptionRequest::new(SENTENCE, "en");
    let foreign = TranscriptionRequest::new(SENTENCE, "es");

    c.bench_function("route/dictionary", |b| {
        b.iter(|| router.route(black_box(&native)))
    });
    c.bench_function("route/fallback", |b| {
        b.iter(|| router.route(black_box(&foreign)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let router = TranscriptionRouter::new(
        GraphemeTranscriber::with_defaults().expect("Invalid built-in table"),
    );
    let requests: Vec<TranscriptionRequest> = (0..256)
        .map(|_| TranscriptionRequest::new(SENTENCE, "it"))
        .collect();

    let mut group = c.benchmark_group("batch");
    for workers in [1usize, 4] {
        group.bench_with_input(
            BenchmarkId::new("workers", workers),
            &workers,
            |b, &workers| b.iter(|| transcribe_batch(&router, requests.clone(), workers)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fallback, bench_router, bench_batch);
criterion_main!(benches);

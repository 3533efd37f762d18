//! Performance benchmarks for the hotline gateway
//!
//! Run with: cargo bench
//! Or for specific benchmarks: cargo bench -- <filter>

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::time::Duration;

use hotline_gateway::core::{AudioArtifact, AudioStore, FacilityDirectory};
use hotline_gateway::dialog::SmsCommand;
use hotline_gateway::markup::{Directive, parse, render};
use hotline_gateway::utils::phone_validation::validate_phone_number;

fn greeting() -> Vec<Directive> {
    vec![
        Directive::say(
            "Welcome to the emergency information system. For disaster information, press 1. \
             To share your location, press 2. To speak your query, press 3.",
        ),
        Directive::gather(1, "/handle_menu"),
    ]
}

/// Benchmark markup rendering
fn bench_markup_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_render");
    group.measurement_time(Duration::from_secs(5));

    let play = vec![Directive::play(
        "https://hotline.example.org/static/3f2a0c1b9d8e4f5a6b7c8d9e0f1a2b3c.mp3",
    )];
    let record = vec![
        Directive::say("Please speak your query after the beep."),
        Directive::record(30, "#"),
    ];

    group.bench_function("greeting", |b| b.iter(|| render(black_box(&greeting()))));
    group.bench_function("play", |b| b.iter(|| render(black_box(&play))));
    group.bench_function("record", |b| b.iter(|| render(black_box(&record))));

    // Generated briefings vary in length and may need escaping
    for size in [100usize, 1_000, 4_000] {
        let text = "Floods & landslides near <river> ".repeat(size / 33 + 1);
        let directives = vec![Directive::say(text)];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("escaped_say", size),
            &directives,
            |b, directives| b.iter(|| render(black_box(directives))),
        );
    }

    group.finish();
}

/// Benchmark parsing rendered documents back
fn bench_markup_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_parse");
    group.measurement_time(Duration::from_secs(5));

    let document = render(&greeting());
    group.throughput(Throughput::Bytes(document.len() as u64));
    group.bench_function("greeting", |b| b.iter(|| parse(black_box(&document))));

    group.finish();
}

/// Benchmark facility lookup and inbound SMS parsing
fn bench_dialog_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialog_inputs");
    group.measurement_time(Duration::from_secs(5));

    let facilities = FacilityDirectory::default();
    group.bench_function("facility_hit", |b| {
        b.iter(|| facilities.lookup(black_box("1")))
    });
    group.bench_function("facility_miss", |b| {
        b.iter(|| facilities.lookup(black_box("9")))
    });

    group.bench_function("sms_location", |b| {
        b.iter(|| SmsCommand::parse(black_box("LOCATION 1.2921,36.8219")))
    });
    group.bench_function("sms_malformed", |b| {
        b.iter(|| SmsCommand::parse(black_box("LOCATION somewhere")))
    });
    group.bench_function("sms_other", |b| {
        b.iter(|| SmsCommand::parse(black_box("help")))
    });

    group.bench_function("phone_with_spaces", |b| {
        b.iter(|| validate_phone_number(black_box("+254 711 000 000")))
    });

    group.finish();
}

/// Benchmark artifact store operations
fn bench_audio_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("audio_store");
    group.measurement_time(Duration::from_secs(5));

    let store = AudioStore::new(Duration::from_secs(600), 100_000);
    let audio = vec![0u8; 32 * 1024];

    group.bench_function("insert_32kb", |b| {
        b.to_async(&rt)
            .iter(|| async { store.insert(AudioArtifact::mp3(audio.clone())).await })
    });

    let reference = rt.block_on(store.insert(AudioArtifact::mp3(audio.clone())));
    group.bench_function("get_by_file_name", |b| {
        b.to_async(&rt)
            .iter(|| async { store.get_by_file_name(black_box(&reference.file_name)).await })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_markup_render,
    bench_markup_parse,
    bench_dialog_inputs,
    bench_audio_store,
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spike2_importer::{open_recording, ExtractKind, ExtractOptions, Marker, SyntheticSource};

fn synthetic_source(samples_per_channel: usize) -> SyntheticSource {
    let mut source = SyntheticSource::new(1e-5).with_max_time(100_000_000);
    for channel in 0..4 {
        let samples = (0..samples_per_channel)
            .map(|i| ((i + channel) as f32).sin())
            .collect();
        source.push_wave(&format!("U{channel}"), 100, samples);
    }
    source.push_markers(
        "Keyboard",
        (0..1000)
            .map(|i| Marker {
                tick: i * 500,
                codes: [65 + (i % 26) as u8, 0, 0, 0],
            })
            .collect(),
    );
    source
}

pub fn bench_extract_waves(c: &mut Criterion) {
    c.bench_function("extract_waves_4x100k", |b| {
        b.iter(|| {
            let source = synthetic_source(100_000);
            let mut session =
                open_recording("bench_preinfusion.smr", source, ExtractOptions::default())
                    .unwrap();
            let dataset = session.extract(&[ExtractKind::Waves]).unwrap();
            black_box(dataset.data.len())
        });
    });
}

pub fn bench_extract_events(c: &mut Criterion) {
    c.bench_function("extract_events_1k_markers", |b| {
        b.iter(|| {
            let source = synthetic_source(0);
            let mut session =
                open_recording("bench_preinfusion.smr", source, ExtractOptions::default())
                    .unwrap();
            let dataset = session.extract(&[ExtractKind::Events]).unwrap();
            black_box(dataset.data.len())
        });
    });
}

criterion_group!(benches, bench_extract_waves, bench_extract_events);
criterion_main!(benches);

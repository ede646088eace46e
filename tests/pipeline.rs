//! End-to-end flow: open two related recordings, extract both partitions,
//! persist and reload one, then merge the pair into a single timeline.

use std::path::Path;

use ndarray::Array2;
use spike2_importer::merge::{merge_datasets, merge_recordings};
use spike2_importer::{
    open_recording, ChannelData, Dataset, ExtractKind, ExtractOptions, JsonStore, Marker,
    DatasetStore, SpikeRecord, Spike2Error, SyntheticSource,
};

const TIME_BASE: f64 = 1e-4;

fn recording(unit_offset: f32) -> SyntheticSource {
    let mut source = SyntheticSource::new(TIME_BASE).with_max_time(2_000_000);
    let unit: Vec<f32> = (0..5_000).map(|i| i as f32 * 0.001 + unit_offset).collect();
    source.push_wave("U1", 2, unit);
    let lfp: Vec<f32> = (0..500).map(|i| i as f32 * 0.01).collect();
    source.push_wave("LFP1", 20, lfp);
    source.push_markers(
        "Keyboard",
        vec![
            Marker { tick: 1_000, codes: [79, 78, 0, 0] },  // "ON"
            Marker { tick: 900_000, codes: [79, 70, 70, 0] }, // "OFF"
            Marker { tick: 950_000, codes: [1, 2, 3, 4] },  // control bytes, dropped
        ],
    );
    source
}

#[test]
fn extract_persist_reload_and_merge() {
    let pre_path = Path::new("rat3_preinfusion.smr");
    let post_path = Path::new("rat3_postinfusion.smrx");

    let mut pre = open_recording(pre_path, recording(0.0), ExtractOptions::default()).unwrap();
    let mut post = open_recording(post_path, recording(5.0), ExtractOptions::default()).unwrap();

    pre.extract(&[ExtractKind::Events, ExtractKind::Waves]).unwrap();
    post.extract(&[ExtractKind::Events, ExtractKind::Waves]).unwrap();

    assert!(pre.errors().is_empty());
    assert_eq!(pre.dataset().data.len(), 3);

    // the control-byte marker was filtered, the printable two survive
    match &pre.dataset().data["Keyboard"] {
        ChannelData::Events(record) => {
            assert_eq!(record.codes, vec!["ON", "OFF"]);
            assert_eq!(record.times.to_vec(), vec![0.1, 90.0]);
        }
        _ => panic!("expected event record"),
    }

    // persist one half and make sure it survives the round trip
    let dir = tempfile::tempdir().unwrap();
    let saved = pre
        .save(&JsonStore, dir.path().join("rat3_preinfusion.json"), false)
        .unwrap();
    let reloaded = JsonStore.load(&saved).unwrap();
    assert_eq!(reloaded.metadata, *pre.metadata());
    match (&reloaded.data["U1"], &pre.dataset().data["U1"]) {
        (ChannelData::Wave(a), ChannelData::Wave(b)) => {
            assert_eq!(a.samples, b.samples);
            assert_eq!(a.times, b.times);
        }
        _ => panic!("expected waveform records"),
    }

    // wrong subject is rejected before any data is touched
    let err = merge_recordings(
        Path::new("rat4_preinfusion.smr"),
        pre.dataset(),
        post_path,
        post.dataset(),
    )
    .unwrap_err();
    assert!(matches!(err, Spike2Error::IdentityMismatch { .. }));

    let (identity, merged) =
        merge_recordings(pre_path, pre.dataset(), post_path, post.dataset()).unwrap();
    assert_eq!(identity, "rat3");

    // unit and LFP keys merge; the event channel merges at recording level
    assert_eq!(merged.data.len(), 2);
    match &merged.data["LFP1"] {
        ChannelData::Wave(record) => {
            assert_eq!(record.samples.len(), 1000);
            assert_eq!(record.times.len(), 1000);
            // post times continue from the pre half's final timestamp
            let pre_last = 499.0 / 500.0;
            assert!((record.times[500] - pre_last).abs() < 1e-9);
            for window in record.times.to_vec().windows(2) {
                assert!(window[1] >= window[0]);
            }
        }
        _ => panic!("expected waveform record"),
    }

    assert_eq!(merged.events.codes, vec!["ON", "OFF", "ON", "OFF"]);
    // post events shift by the pre stream's final event time (90 s)
    let event_times = merged.events.times.to_vec();
    for (actual, expected) in event_times.iter().zip([0.1, 90.0, 90.1, 180.0]) {
        assert!((actual - expected).abs() < 1e-9);
    }

    // both metadata halves stay available for audit
    assert_eq!(merged.metadata.pre, *pre.metadata());
    assert_eq!(merged.metadata.post, *post.metadata());
}

#[test]
fn sorted_spike_trains_merge_across_recordings() {
    // a downstream sorter replaces the continuous unit waveform with
    // per-event spike snippets; the merge stacks those across the pair
    let spikes = |rows: usize, fill: f64, times: Vec<f64>| {
        ChannelData::Spikes(SpikeRecord {
            channel_name: "U1".to_string(),
            waveforms: Array2::from_elem((rows, 32), fill),
            times: times.into(),
        })
    };

    let mut pre = open_recording(
        "rat9_preinfusion.smr",
        recording(0.0),
        ExtractOptions::default(),
    )
    .unwrap();
    pre.extract(&[ExtractKind::Waves]).unwrap();
    let mut pre_data: Dataset = pre.dataset().clone();
    pre_data
        .data
        .insert("U1".to_string(), spikes(3, 1.0, vec![0.2, 0.5, 0.9]));

    let mut post_data = pre_data.clone();
    post_data
        .data
        .insert("U1".to_string(), spikes(2, 2.0, vec![0.1, 0.4]));

    let merged = merge_datasets(&pre_data, &post_data).unwrap();
    match &merged.data["U1"] {
        ChannelData::Spikes(record) => {
            assert_eq!(record.waveforms.nrows(), 5);
            assert_eq!(record.waveforms[[0, 0]], 1.0);
            assert_eq!(record.waveforms[[4, 0]], 2.0);
            assert_eq!(record.times.to_vec(), vec![0.2, 0.5, 0.9, 1.0, 1.3]);
        }
        _ => panic!("expected spike record"),
    }
}

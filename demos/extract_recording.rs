use anyhow::Result;
use spike2_importer::merge::merge_recordings;
use spike2_importer::{
    open_recording, ChannelData, ExtractKind, ExtractOptions, JsonStore, Marker, SyntheticSource,
};
use std::path::Path;

/// Builds an in-memory stand-in for one recording half.
fn synthetic_recording(seed: f32) -> SyntheticSource {
    let mut source = SyntheticSource::new(1e-5).with_max_time(30_000_000);

    let unit: Vec<f32> = (0..20_000).map(|i| (i as f32 * 0.01 + seed).sin()).collect();
    source.push_wave("U1", 10, unit);

    let lfp: Vec<f32> = (0..2_000).map(|i| (i as f32 * 0.1 + seed).cos()).collect();
    source.push_wave("LFP1", 100, lfp);

    source.push_markers(
        "Keyboard",
        vec![
            Marker { tick: 100_000, codes: [83, 84, 82, 84] }, // "STRT"
            Marker { tick: 20_000_000, codes: [83, 84, 79, 80] }, // "STOP"
            Marker { tick: 25_000_000, codes: [0, 255, 0, 0] }, // dropped: not printable
        ],
    );

    source
}

fn main() -> Result<()> {
    env_logger::init();

    let pre_path = Path::new("rat1_preinfusion.smr");
    let post_path = Path::new("rat1_postinfusion.smr");

    let mut pre = open_recording(pre_path, synthetic_recording(0.0), ExtractOptions::default())?;
    let mut post = open_recording(post_path, synthetic_recording(1.0), ExtractOptions::default())?;

    println!("{pre}");

    pre.extract(&[ExtractKind::Events, ExtractKind::Waves])?;
    post.extract(&[ExtractKind::Events, ExtractKind::Waves])?;

    for (name, channel) in &pre.dataset().data {
        match channel {
            ChannelData::Wave(record) => {
                println!("{name}: {} samples at {} Hz", record.len(), record.channel.sampling_rate)
            }
            ChannelData::Events(record) => println!("{name}: {} markers", record.len()),
            ChannelData::Spikes(record) => {
                println!("{name}: {} spike waveforms", record.waveforms.nrows())
            }
        }
    }

    let out_dir = std::env::temp_dir().join("spike2_importer_demo");
    let saved = pre.save(&JsonStore, out_dir.join("rat1_preinfusion.json"), true)?;
    println!("saved pre-infusion dataset to {}", saved.display());

    let (identity, merged) =
        merge_recordings(pre_path, pre.dataset(), post_path, post.dataset())?;
    println!(
        "merged subject {identity}: {} channel(s), {} event(s)",
        merged.data.len(),
        merged.events.codes.len()
    );
    if let ChannelData::Wave(record) = &merged.data["LFP1"] {
        println!(
            "LFP1 spans {:.1} s after the merge",
            record.times.last().copied().unwrap_or(0.0)
        );
    }

    Ok(())
}

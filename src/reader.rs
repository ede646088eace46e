//! Extraction session: the main workhorse of this crate.
//!
//! A [`Spike2Session`] owns one opened source file, builds the per-channel
//! metadata table, partitions it into event and waveform channels, and
//! extracts the selected partitions into a [`Dataset`]. Waveform channels
//! are streamed in memory-bounded chunks; marker channels are decoded and
//! filtered to printable codes. Per-channel failures land in the session's
//! error map and never abort the rest of the file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};
use ndarray::Array1;

use crate::cache::FifoCache;
use crate::error::{Result, Spike2Error};
use crate::source::RecordingSource;
use crate::store::DatasetStore;
use crate::time::{indices_to_seconds, round_to, ticks_to_seconds};
use crate::types::{
    ChannelClass, ChannelData, ChannelDescriptor, Dataset, EventRecord, ExtractKind, ExtractOptions,
    FileMetadata, VoidMarkerPolicy, WaveformClass, WaveformRecord,
};

const RECOGNIZED_EXTENSIONS: [&str; 2] = ["smr", "smrx"];
const SAMPLING_RATE_DECIMALS: u32 = 2;

/// Opens a recording and builds an extraction session for it.
///
/// The path supplies the recording's name and extension; the already-opened
/// `source` supplies everything else. Fails before any channel is touched if
/// the extension is not `.smr`/`.smrx` or the source reports an open error.
pub fn open_recording<P: AsRef<Path>, S: RecordingSource>(
    path: P,
    source: S,
    options: ExtractOptions,
) -> Result<Spike2Session<S>> {
    Spike2Session::open(path, source, options)
}

/// Channel table partitioned by semantic class.
///
/// Disabled channels are excluded up front; every remaining channel lands in
/// exactly one of `events`, `waves` or `unclassified`, and every waveform
/// channel in exactly one of `units`, `lfps` or `other_waves`.
#[derive(Debug, Clone, Default)]
pub struct ChannelPartition {
    /// Marker channels extracted as events
    pub events: Vec<ChannelDescriptor>,
    /// All analog waveform channels
    pub waves: Vec<ChannelDescriptor>,
    /// Waveform channels named as units
    pub units: Vec<ChannelDescriptor>,
    /// Waveform channels named as LFPs
    pub lfps: Vec<ChannelDescriptor>,
    /// Waveform channels with no recognized name tag
    pub other_waves: Vec<ChannelDescriptor>,
    /// Enabled channels that are neither marker-kind nor analog
    pub unclassified: Vec<ChannelDescriptor>,
    /// Disabled channel slots
    pub off: Vec<ChannelDescriptor>,
}

impl ChannelPartition {
    /// Partitions a channel table.
    pub fn from_table(table: &[ChannelDescriptor]) -> Self {
        let mut partition = ChannelPartition::default();
        for descriptor in table {
            match descriptor.classify() {
                None => partition.off.push(descriptor.clone()),
                Some(ChannelClass::Event) => partition.events.push(descriptor.clone()),
                Some(ChannelClass::Waveform(subtype)) => {
                    partition.waves.push(descriptor.clone());
                    match subtype {
                        WaveformClass::Unit => partition.units.push(descriptor.clone()),
                        WaveformClass::Lfp => partition.lfps.push(descriptor.clone()),
                        WaveformClass::Other => partition.other_waves.push(descriptor.clone()),
                    }
                }
                Some(ChannelClass::Unclassified) => {
                    partition.unclassified.push(descriptor.clone())
                }
            }
        }
        partition
    }
}

/// An extraction session over one opened recording.
pub struct Spike2Session<S: RecordingSource> {
    source: S,
    filename: PathBuf,
    table: Vec<ChannelDescriptor>,
    partition: ChannelPartition,
    dataset: Dataset,
    errors: BTreeMap<String, Spike2Error>,
    cache: FifoCache<String, ChannelData>,
    options: ExtractOptions,
    available_memory_override: Option<u64>,
}

impl<S: RecordingSource> Spike2Session<S> {
    /// See [`open_recording`].
    pub fn open(path: impl AsRef<Path>, source: S, options: ExtractOptions) -> Result<Self> {
        let filename = path.as_ref().to_path_buf();

        let ext = filename
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !RECOGNIZED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Spike2Error::UnsupportedExtension {
                path: filename,
                ext,
            });
        }

        let code = source.open_error();
        if code != 0 {
            return Err(Spike2Error::OpenFailed {
                path: filename,
                code,
            });
        }

        let table = build_channel_table(&source)?;
        let partition = ChannelPartition::from_table(&table);
        let metadata = FileMetadata {
            time_base: source.time_base(),
            bitrate: if source.is_32bit() { 32 } else { 64 },
            recording_length: source.max_time() as f64 * source.time_base(),
        };

        info!(
            "{}: {} waveform channel(s), {} event channel(s), {} disabled, {:.3} s at {}-bit",
            filename.display(),
            partition.waves.len(),
            partition.events.len(),
            partition.off.len(),
            metadata.recording_length,
            metadata.bitrate,
        );

        let cache = FifoCache::new(options.cache_entries);
        let dataset = Dataset {
            data: BTreeMap::new(),
            channels: table.clone(),
            metadata,
        };

        Ok(Spike2Session {
            source,
            filename,
            table,
            partition,
            dataset,
            errors: BTreeMap::new(),
            cache,
            options,
            available_memory_override: None,
        })
    }

    /// Pins the available-memory figure used for chunk sizing instead of
    /// querying the system, mainly for tests.
    pub fn with_available_memory(mut self, bytes: u64) -> Self {
        self.available_memory_override = Some(bytes);
        self
    }

    /// Path the session was opened with.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// The full channel metadata table.
    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.table
    }

    /// The classified channel partitions.
    pub fn partition(&self) -> &ChannelPartition {
        &self.partition
    }

    /// File-level metadata.
    pub fn metadata(&self) -> &FileMetadata {
        &self.dataset.metadata
    }

    /// Per-channel errors accumulated so far, keyed by channel identity.
    pub fn errors(&self) -> &BTreeMap<String, Spike2Error> {
        &self.errors
    }

    /// Everything extracted so far.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Extracts the selected partitions into the session dataset.
    ///
    /// Channels already extracted by an earlier call are served from the
    /// session cache rather than re-read. Per-channel failures are recorded
    /// in [`errors`](Self::errors) and do not fail the call.
    pub fn extract(&mut self, kinds: &[ExtractKind]) -> Result<&Dataset> {
        for kind in kinds {
            match kind {
                ExtractKind::Events => self.extract_events(),
                ExtractKind::Waves => self.extract_waves(),
            }
        }
        Ok(&self.dataset)
    }

    fn extract_events(&mut self) {
        for descriptor in self.partition.events.clone() {
            if let Some(hit) = self.cache.get(&descriptor.name).cloned() {
                self.dataset.data.insert(descriptor.name.clone(), hit);
                continue;
            }
            info!(
                "processing event channel: idx={}, name={}, kind={:?}, fs={}, units={}",
                descriptor.index,
                descriptor.name,
                descriptor.kind,
                descriptor.sampling_rate,
                descriptor.units,
            );
            let record = match self.read_event_channel(&descriptor) {
                Ok(record) => record,
                Err(error) => {
                    warn!(
                        "error reading markers on {} ({:?}): {}",
                        descriptor.name, descriptor.kind, error
                    );
                    self.errors.insert(error_key(&descriptor), error);
                    EventRecord::empty(descriptor.clone())
                }
            };
            let data = ChannelData::Events(record);
            self.cache.insert(descriptor.name.clone(), data.clone());
            self.dataset.data.insert(descriptor.name.clone(), data);
        }
    }

    fn read_event_channel(&mut self, descriptor: &ChannelDescriptor) -> Result<EventRecord> {
        let markers =
            self.source
                .read_markers(descriptor.index, self.options.max_markers, 0)?;

        let mut codes = Vec::new();
        let mut ticks = Vec::new();
        for marker in &markers {
            let code = codes_to_string(&marker.codes);
            if !code.chars().all(is_printable_ascii) {
                continue;
            }
            if code.is_empty() && self.options.void_markers == VoidMarkerPolicy::Drop {
                continue;
            }
            codes.push(code);
            ticks.push(marker.tick);
        }

        let decimals = self.options.time_decimals;
        let times = ticks_to_seconds(&ticks, self.source.time_base())
            .mapv(|seconds| round_to(seconds, decimals));

        Ok(EventRecord {
            channel: descriptor.clone(),
            codes,
            times,
        })
    }

    fn extract_waves(&mut self) {
        for descriptor in self.partition.waves.clone() {
            if let Some(hit) = self.cache.get(&descriptor.name).cloned() {
                self.dataset.data.insert(descriptor.name.clone(), hit);
                continue;
            }
            info!(
                "processing waveform channel: idx={}, name={}, kind={:?}, fs={}, units={}",
                descriptor.index,
                descriptor.name,
                descriptor.kind,
                descriptor.sampling_rate,
                descriptor.units,
            );
            match self.read_wave_channel(&descriptor) {
                Ok(record) => {
                    let data = ChannelData::Wave(record);
                    self.cache.insert(descriptor.name.clone(), data.clone());
                    self.dataset.data.insert(descriptor.name.clone(), data);
                }
                // nothing partial is emitted for an abandoned channel
                Err(error) => {
                    warn!("error reading waveform {}: {}", descriptor.name, error);
                    self.errors.insert(error_key(&descriptor), error);
                }
            }
        }
    }

    fn read_wave_channel(&mut self, descriptor: &ChannelDescriptor) -> Result<WaveformRecord> {
        let item_size = self.source.item_size(descriptor.index)?;
        let total_bytes = self.source.channel_bytes(descriptor.index)?;
        if item_size == 0 || total_bytes % item_size != 0 {
            return Err(Spike2Error::channel_read(
                descriptor,
                format!(
                    "reported size {total_bytes} B is not a whole number of {item_size} B items"
                ),
            ));
        }
        let total_items = (total_bytes / item_size) as usize;

        let available = self
            .available_memory_override
            .unwrap_or_else(available_memory);
        let chunk_items = optimal_chunk_size(item_size, self.options.memory_fraction, available);

        let mut samples: Vec<f64> = Vec::with_capacity(total_items);
        let mut start = 0usize;
        while start < total_items {
            let count = chunk_items.min(total_items - start);
            let chunk = self.source.read_floats(descriptor.index, count, start)?;
            if chunk.len() != count {
                return Err(Spike2Error::channel_read(
                    descriptor,
                    format!(
                        "short read: wanted {count} items at {start}, got {}",
                        chunk.len()
                    ),
                ));
            }
            samples.extend(chunk.into_iter().map(f64::from));
            start += count;
        }

        let times = indices_to_seconds(samples.len(), descriptor.sampling_rate);
        Ok(WaveformRecord {
            channel: descriptor.clone(),
            samples: Array1::from(samples),
            times,
        })
    }

    /// Hands the extracted dataset to a storage collaborator.
    ///
    /// An existing file is left untouched unless `overwrite_existing` is
    /// set. Returns the path written (or skipped).
    pub fn save(
        &self,
        store: &dyn DatasetStore,
        path: impl AsRef<Path>,
        overwrite_existing: bool,
    ) -> Result<PathBuf> {
        let path = path.as_ref().to_path_buf();
        if path.exists() && !overwrite_existing {
            info!(
                "{} already exists, skipping write (pass overwrite_existing to replace)",
                path.display()
            );
            return Ok(path);
        }
        if path.exists() {
            info!("overwriting existing file: {}", path.display());
        } else {
            info!("saving data to {}", path.display());
        }
        store.save(&path, &self.dataset)?;
        Ok(path)
    }
}

impl<S: RecordingSource> fmt::Display for Spike2Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} | nchan = {} | nevents = {}",
            self.filename.display(),
            self.partition.waves.len(),
            self.partition.events.len()
        )?;
        writeln!(f, "-----\nwaves\n-----")?;
        for descriptor in &self.partition.waves {
            writeln!(
                f,
                "{:>4}  {:<12} {:?} fs={} {}",
                descriptor.index,
                descriptor.name,
                descriptor.kind,
                descriptor.sampling_rate,
                descriptor.units
            )?;
        }
        writeln!(f, "------\nevents\n------")?;
        for descriptor in &self.partition.events {
            writeln!(
                f,
                "{:>4}  {:<12} {:?}",
                descriptor.index, descriptor.name, descriptor.kind
            )?;
        }
        Ok(())
    }
}

/// Reads the per-channel metadata table from a source.
///
/// Sampling rate is derived from the channel's sample interval and the file
/// time base, rounded to two decimals; channels without an interval report
/// `0.0`.
fn build_channel_table<S: RecordingSource>(source: &S) -> Result<Vec<ChannelDescriptor>> {
    let time_base = source.time_base();
    (0..source.channel_count())
        .map(|index| {
            let divide = source.channel_divide(index)?;
            let sampling_rate = if divide > 0 {
                round_to(1.0 / (divide as f64 * time_base), SAMPLING_RATE_DECIMALS)
            } else {
                0.0
            };
            Ok(ChannelDescriptor {
                index,
                name: source.channel_title(index)?,
                kind: source.channel_kind(index)?,
                sampling_rate,
                units: source.channel_units(index)?,
            })
        })
        .collect()
}

/// Chunk size in items for streaming a waveform channel.
///
/// A chunk may occupy `memory_fraction` of the available memory; the floor
/// of that figure divided by the per-item byte width, never below one item.
pub fn optimal_chunk_size(item_size: u64, memory_fraction: f64, available_memory: u64) -> usize {
    (((available_memory as f64 * memory_fraction) / item_size as f64) as usize).max(1)
}

/// Available system memory in bytes.
pub fn available_memory() -> u64 {
    use sysinfo::{MemoryRefreshKind, RefreshKind, System};

    let system = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
    );
    system.available_memory()
}

fn error_key(descriptor: &ChannelDescriptor) -> String {
    format!(
        "{}_{}_{:?}",
        descriptor.index, descriptor.name, descriptor.kind
    )
}

/// Decodes four marker code bytes into a string, dropping zero padding.
fn codes_to_string(codes: &[u8; 4]) -> String {
    codes
        .iter()
        .filter(|&&code| code != 0)
        .map(|&code| code as char)
        .collect()
}

/// Printable ASCII in the same sense as Python's `string.printable`:
/// graphic characters, space, and the usual whitespace controls.
fn is_printable_ascii(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || matches!(c, '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SyntheticSource;
    use crate::types::{ChannelKind, Marker};

    const TIME_BASE: f64 = 1e-3;

    fn wave_samples(count: usize) -> Vec<f32> {
        (0..count).map(|i| (i as f32) * 0.25).collect()
    }

    fn mixed_source() -> SyntheticSource {
        let mut source = SyntheticSource::new(TIME_BASE).with_max_time(500_000);
        source.push_wave("U1", 10, wave_samples(100));
        source.push_wave("LFP1", 100, wave_samples(50));
        source.push_wave("resp", 100, wave_samples(20));
        source.push_markers(
            "Keyboard",
            vec![
                Marker { tick: 10, codes: [65, 66, 67, 68] },
                Marker { tick: 20, codes: [0, 255, 0, 0] },
            ],
        );
        source.push_channel(crate::source::SyntheticChannel {
            title: "unused".to_string(),
            kind: ChannelKind::Off,
            divide: 0,
            units: String::new(),
            samples: Vec::new(),
            markers: Vec::new(),
            reported_bytes: None,
        });
        source.push_channel(crate::source::SyntheticChannel {
            title: "Trigger".to_string(),
            kind: ChannelKind::EventRise,
            divide: 0,
            units: String::new(),
            samples: Vec::new(),
            markers: Vec::new(),
            reported_bytes: None,
        });
        source
    }

    fn open(source: SyntheticSource) -> Spike2Session<SyntheticSource> {
        open_recording("rat1_preinfusion.smr", source, ExtractOptions::default()).unwrap()
    }

    #[test]
    fn rejects_unrecognized_extension() {
        let result = open_recording(
            "rat1.txt",
            SyntheticSource::new(TIME_BASE),
            ExtractOptions::default(),
        );
        assert!(matches!(
            result.err().unwrap(),
            Spike2Error::UnsupportedExtension { .. }
        ));
    }

    #[test]
    fn rejects_source_open_error() {
        let source = SyntheticSource::new(TIME_BASE).with_open_error(-7);
        let result = open_recording("rat1.smrx", source, ExtractOptions::default());
        assert!(matches!(
            result.err().unwrap(),
            Spike2Error::OpenFailed { code: -7, .. }
        ));
    }

    #[test]
    fn every_channel_lands_in_exactly_one_partition() {
        let session = open(mixed_source());
        let partition = session.partition();
        let total = partition.events.len()
            + partition.waves.len()
            + partition.unclassified.len()
            + partition.off.len();
        assert_eq!(total, session.channels().len());
        let wave_total =
            partition.units.len() + partition.lfps.len() + partition.other_waves.len();
        assert_eq!(wave_total, partition.waves.len());
        assert_eq!(partition.units.len(), 1);
        assert_eq!(partition.lfps.len(), 1);
        assert_eq!(partition.other_waves.len(), 1);
        assert_eq!(partition.unclassified.len(), 1);
        assert_eq!(partition.off.len(), 1);
    }

    #[test]
    fn sampling_rate_comes_from_divide_and_time_base() {
        let session = open(mixed_source());
        // divide 10 at 1 ms per tick: 1 / (10 * 1e-3) = 100 Hz
        assert_eq!(session.channels()[0].sampling_rate, 100.0);
        assert_eq!(session.channels()[3].sampling_rate, 0.0);
    }

    #[test]
    fn metadata_reflects_the_source() {
        let session = open(mixed_source());
        let metadata = session.metadata();
        assert_eq!(metadata.time_base, TIME_BASE);
        assert_eq!(metadata.bitrate, 64);
        assert!((metadata.recording_length - 500.0).abs() < 1e-9);
    }

    #[test]
    fn old_format_files_report_32_bit() {
        let source = SyntheticSource::new(TIME_BASE).with_32bit();
        let session =
            open_recording("rat1_preinfusion.smr", source, ExtractOptions::default()).unwrap();
        assert_eq!(session.metadata().bitrate, 32);
    }

    #[test]
    fn chunked_read_is_chunk_size_invariant() {
        // 8 B available at fraction 0.5 over 4 B items: one item per chunk
        let mut one = open(mixed_source()).with_available_memory(8);
        one.extract(&[ExtractKind::Waves]).unwrap();
        // plenty of memory: the whole channel in a single chunk
        let mut whole = open(mixed_source()).with_available_memory(1 << 30);
        whole.extract(&[ExtractKind::Waves]).unwrap();

        for key in ["U1", "LFP1", "resp"] {
            let (a, b) = (&one.dataset().data[key], &whole.dataset().data[key]);
            match (a, b) {
                (ChannelData::Wave(a), ChannelData::Wave(b)) => {
                    assert_eq!(a.samples, b.samples);
                    assert_eq!(a.times, b.times);
                    assert_eq!(a.samples.len(), a.times.len());
                }
                _ => panic!("expected waveform records"),
            }
        }
        assert!(one.source().floats_reads() > whole.source().floats_reads());
    }

    #[test]
    fn wave_times_follow_the_sampling_rate() {
        let mut session = open(mixed_source());
        session.extract(&[ExtractKind::Waves]).unwrap();
        match &session.dataset().data["U1"] {
            ChannelData::Wave(record) => {
                assert_eq!(record.times[0], 0.0);
                // 100 Hz sampling: 10 ms between samples
                assert!((record.times[1] - 0.01).abs() < 1e-12);
            }
            _ => panic!("expected waveform record"),
        }
    }

    #[test]
    fn non_printable_markers_are_dropped() {
        let mut session = open(mixed_source());
        session.extract(&[ExtractKind::Events]).unwrap();
        match &session.dataset().data["Keyboard"] {
            ChannelData::Events(record) => {
                assert_eq!(record.codes, vec!["ABCD"]);
                // tick 10 at 1 ms per tick, rounded to 3 decimals
                assert_eq!(record.times.to_vec(), vec![0.01]);
                assert_eq!(record.codes.len(), record.times.len());
            }
            _ => panic!("expected event record"),
        }
    }

    #[test]
    fn void_marker_policy_is_configurable() {
        let mut source = SyntheticSource::new(TIME_BASE);
        source.push_markers(
            "Keyboard",
            vec![
                Marker { tick: 10, codes: [65, 0, 0, 0] },
                Marker { tick: 30, codes: [0, 0, 0, 0] },
            ],
        );

        let mut dropping = open_recording(
            "rat1_preinfusion.smr",
            source.clone(),
            ExtractOptions::default(),
        )
        .unwrap();
        dropping.extract(&[ExtractKind::Events]).unwrap();
        match &dropping.dataset().data["Keyboard"] {
            ChannelData::Events(record) => assert_eq!(record.codes, vec!["A"]),
            _ => panic!("expected event record"),
        }

        let options = ExtractOptions {
            void_markers: VoidMarkerPolicy::Keep,
            ..ExtractOptions::default()
        };
        let mut keeping = open_recording("rat1_preinfusion.smr", source, options).unwrap();
        keeping.extract(&[ExtractKind::Events]).unwrap();
        match &keeping.dataset().data["Keyboard"] {
            ChannelData::Events(record) => {
                assert_eq!(record.codes, vec!["A", ""]);
                assert_eq!(record.times.to_vec(), vec![0.01, 0.03]);
            }
            _ => panic!("expected event record"),
        }
    }

    #[test]
    fn corrupt_size_report_skips_only_that_channel() {
        let mut source = mixed_source();
        let bad = source.push_channel(crate::source::SyntheticChannel {
            title: "U9".to_string(),
            kind: ChannelKind::Adc,
            divide: 10,
            units: "V".to_string(),
            samples: wave_samples(10),
            // 4 B items cannot tile 10 bytes
            reported_bytes: Some(10),
            markers: Vec::new(),
        });
        let mut session = open(source);
        session.extract(&[ExtractKind::Waves]).unwrap();

        assert!(!session.dataset().data.contains_key("U9"));
        assert!(session.dataset().data.contains_key("U1"));
        let key = format!("{bad}_U9_Adc");
        assert!(matches!(
            session.errors().get(&key),
            Some(Spike2Error::ChannelRead { .. })
        ));
    }

    #[test]
    fn mid_stream_failure_abandons_the_channel() {
        let mut source = mixed_source();
        source.fail_floats_after(0, 50);
        let mut session = open(source).with_available_memory(8);
        session.extract(&[ExtractKind::Waves]).unwrap();

        // U1 abandoned with nothing partial; the other waves survive
        assert!(!session.dataset().data.contains_key("U1"));
        assert!(session.dataset().data.contains_key("LFP1"));
        assert!(session.dataset().data.contains_key("resp"));
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn marker_failure_yields_an_empty_record_and_continues() {
        let mut source = mixed_source();
        source.fail_markers_on(3);
        let mut session = open(source);
        session.extract(&[ExtractKind::Events, ExtractKind::Waves]).unwrap();

        match &session.dataset().data["Keyboard"] {
            ChannelData::Events(record) => assert!(record.is_empty()),
            _ => panic!("expected event record"),
        }
        assert_eq!(session.errors().len(), 1);
        // waveform extraction is unaffected
        assert!(session.dataset().data.contains_key("U1"));
    }

    #[test]
    fn repeated_extraction_is_served_from_the_cache() {
        let mut session = open(mixed_source());
        session.extract(&[ExtractKind::Waves]).unwrap();
        let reads = session.source().floats_reads();
        session.extract(&[ExtractKind::Waves]).unwrap();
        assert_eq!(session.source().floats_reads(), reads);
    }

    #[test]
    fn chunk_size_never_drops_below_one_item() {
        assert_eq!(optimal_chunk_size(8, 0.5, 4), 1);
        assert_eq!(optimal_chunk_size(4, 0.5, 80), 10);
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use ndarray::{concatenate, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::Spike2Error;
use crate::util::contains_ci;

/// Channel kind codes used by the SON file format.
///
/// Every channel slot in a Spike2 file carries one of these type codes.
/// `Off` marks a disabled slot; the marker kinds carry discrete events with
/// attached code bytes; `Adc` carries equally-spaced analog samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Channel slot is disabled
    Off,
    /// Equally-spaced analog waveform samples
    Adc,
    /// Event times recorded on the falling edge
    EventFall,
    /// Event times recorded on the rising edge
    EventRise,
    /// Event times recorded on both edges
    EventBoth,
    /// Event times with four attached code bytes
    Marker,
    /// Marker with a captured waveform fragment
    AdcMark,
    /// Marker with attached real values
    RealMark,
    /// Marker with attached text
    TextMark,
    /// Equally-spaced floating-point waveform samples
    RealWave,
}

impl ChannelKind {
    /// Maps a raw SON type code to a channel kind.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ChannelKind::Off),
            1 => Some(ChannelKind::Adc),
            2 => Some(ChannelKind::EventFall),
            3 => Some(ChannelKind::EventRise),
            4 => Some(ChannelKind::EventBoth),
            5 => Some(ChannelKind::Marker),
            6 => Some(ChannelKind::AdcMark),
            7 => Some(ChannelKind::RealMark),
            8 => Some(ChannelKind::TextMark),
            9 => Some(ChannelKind::RealWave),
            _ => None,
        }
    }

    /// The raw SON type code for this kind.
    pub fn code(self) -> i32 {
        match self {
            ChannelKind::Off => 0,
            ChannelKind::Adc => 1,
            ChannelKind::EventFall => 2,
            ChannelKind::EventRise => 3,
            ChannelKind::EventBoth => 4,
            ChannelKind::Marker => 5,
            ChannelKind::AdcMark => 6,
            ChannelKind::RealMark => 7,
            ChannelKind::TextMark => 8,
            ChannelKind::RealWave => 9,
        }
    }

    /// Whether this kind carries marker records extracted as events.
    ///
    /// Covers `Marker`, `RealMark` and `TextMark`; plain edge-event kinds
    /// carry no code bytes and are not part of the event set.
    pub fn is_event(self) -> bool {
        matches!(
            self,
            ChannelKind::Marker | ChannelKind::RealMark | ChannelKind::TextMark
        )
    }

    /// Whether this kind carries analog waveform samples.
    pub fn is_wave(self) -> bool {
        matches!(self, ChannelKind::Adc)
    }
}

/// Waveform subtype derived from the channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveformClass {
    /// Isolated single-neuron spike activity
    Unit,
    /// Local field potential
    Lfp,
    /// Waveform with no recognized name tag
    Other,
}

/// Semantic class of a channel, derived from its kind and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelClass {
    /// Marker-kind channel extracted as (code, time) events
    Event,
    /// Analog waveform channel with its name-derived subtype
    Waveform(WaveformClass),
    /// Enabled channel that is neither marker-kind nor analog; surfaced
    /// rather than silently dropped
    Unclassified,
}

/// Metadata for a single channel, read once from the source file.
///
/// Replaces positional row unpacking with named fields; a descriptor is
/// immutable after the channel table is built and is uniquely identified by
/// `index` within one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Channel index as stored by the source library
    pub index: usize,
    /// Channel title
    pub name: String,
    /// SON type code for the channel
    pub kind: ChannelKind,
    /// Sampling rate in Hz, `0.0` for channels without a sample interval
    pub sampling_rate: f64,
    /// Physical units reported by the source
    pub units: String,
}

impl ChannelDescriptor {
    /// Classifies the channel. `None` for disabled (`Off`) channels, which
    /// are excluded from every partition; total and deterministic for all
    /// other kinds.
    ///
    /// Waveform subtypes match case-insensitively on the name, first match
    /// wins with Unit > Lfp precedence: a name containing both `"u"` and
    /// `"lfp"` classifies as Unit.
    pub fn classify(&self) -> Option<ChannelClass> {
        match self.kind {
            ChannelKind::Off => None,
            kind if kind.is_event() => Some(ChannelClass::Event),
            kind if kind.is_wave() => Some(ChannelClass::Waveform(self.waveform_class())),
            _ => Some(ChannelClass::Unclassified),
        }
    }

    fn waveform_class(&self) -> WaveformClass {
        if contains_ci(&self.name, "u") {
            WaveformClass::Unit
        } else if contains_ci(&self.name, "lfp") {
            WaveformClass::Lfp
        } else {
            WaveformClass::Other
        }
    }
}

/// A single marker record: an event time in clock ticks plus four code
/// bytes. Zero bytes are padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Event time in clock ticks
    pub tick: i64,
    /// ASCII code bytes; zero means unused
    pub codes: [u8; 4],
}

/// Extracted samples and times for one waveform channel.
///
/// `samples` and `times` always have the same length; `times` is derived
/// from the sample index and sampling rate and is non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformRecord {
    /// The channel this record was extracted from
    pub channel: ChannelDescriptor,
    /// Waveform samples in the channel's units
    pub samples: Array1<f64>,
    /// Per-sample times in seconds
    pub times: Array1<f64>,
}

impl WaveformRecord {
    /// Number of samples in the record.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Per-event spike waveforms for one unit channel, as produced by a
/// downstream sorting stage.
///
/// `waveforms` is shaped `[num_events, samples_per_event]`; `times` holds
/// one entry per event (row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpikeRecord {
    /// Name of the unit channel
    pub channel_name: String,
    /// One spike waveform per row
    pub waveforms: Array2<f64>,
    /// Per-event times in seconds
    pub times: Array1<f64>,
}

/// Extracted marker codes and times for one event channel.
///
/// `codes` and `times` always have the same length and only cover markers
/// whose decoded code passed the printable filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// The channel this record was extracted from
    pub channel: ChannelDescriptor,
    /// Decoded marker code strings
    pub codes: Vec<String>,
    /// Marker times in seconds
    pub times: Array1<f64>,
}

impl EventRecord {
    /// An event record with no markers, used when a channel's markers could
    /// not be decoded.
    pub fn empty(channel: ChannelDescriptor) -> Self {
        EventRecord {
            channel,
            codes: Vec::new(),
            times: Array1::zeros(0),
        }
    }

    /// Number of retained markers.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the record holds no markers.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Data extracted from one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChannelData {
    /// Continuous waveform samples
    Wave(WaveformRecord),
    /// Per-event spike waveforms from a sorting stage
    Spikes(SpikeRecord),
    /// Marker codes and times
    Events(EventRecord),
}

impl ChannelData {
    /// Short label for the contained shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ChannelData::Wave(_) => "waveform",
            ChannelData::Spikes(_) => "spikes",
            ChannelData::Events(_) => "events",
        }
    }
}

/// File-level metadata for one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Seconds per clock tick
    pub time_base: f64,
    /// 32 for the old file format, 64 for the new one
    pub bitrate: u32,
    /// Total recording length in seconds
    pub recording_length: f64,
}

/// Aggregate event codes and times for a whole recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStream {
    /// Decoded marker codes across all event channels
    pub codes: Vec<String>,
    /// Marker times in seconds, parallel to `codes`
    pub times: Array1<f64>,
}

/// One recording's extracted channels plus metadata.
///
/// Built by a single extraction session and immutable afterwards; merging
/// clones from it rather than mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Extracted channel data keyed by channel name
    pub data: BTreeMap<String, ChannelData>,
    /// The full channel table the data was extracted from
    pub channels: Vec<ChannelDescriptor>,
    /// File-level metadata
    pub metadata: FileMetadata,
}

impl Dataset {
    /// Aggregate event stream over all extracted event channels, in key
    /// order. Used for whole-recording event merging.
    pub fn event_stream(&self) -> EventStream {
        let mut codes = Vec::new();
        let mut times: Vec<Array1<f64>> = Vec::new();
        for channel in self.data.values() {
            if let ChannelData::Events(record) = channel {
                codes.extend(record.codes.iter().cloned());
                times.push(record.times.clone());
            }
        }
        let views: Vec<_> = times.iter().map(|t| t.view()).collect();
        let times = if views.is_empty() {
            Array1::zeros(0)
        } else {
            concatenate(Axis(0), &views).expect("1-D time arrays always concatenate")
        };
        EventStream { codes, times }
    }
}

/// Metadata halves of a merged recording pair, preserved for traceability
/// rather than combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedMetadata {
    /// Metadata of the pre-infusion recording
    pub pre: FileMetadata,
    /// Metadata of the post-infusion recording
    pub post: FileMetadata,
}

/// Result of merging a pre/post-infusion recording pair into one
/// continuous timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedDataset {
    /// Merged unit and LFP channels keyed by channel name
    pub data: BTreeMap<String, ChannelData>,
    /// Merged whole-recording event stream
    pub events: EventStream,
    /// Both metadata halves
    pub metadata: MergedMetadata,
    /// Channel table of the pre-infusion recording
    pub channels: Vec<ChannelDescriptor>,
}

impl MergedDataset {
    /// Re-packs the merged result as a plain dataset so it can be merged
    /// again with a later recording. The time base and bitrate come from
    /// the pre half; the recording length is the sum of both halves, so a
    /// follow-up merge offsets by the true final timestamps.
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            data: self.data.clone(),
            channels: self.channels.clone(),
            metadata: FileMetadata {
                time_base: self.metadata.pre.time_base,
                bitrate: self.metadata.pre.bitrate,
                recording_length: self.metadata.pre.recording_length
                    + self.metadata.post.recording_length,
            },
        }
    }
}

/// Policy for markers whose four code bytes are all zero.
///
/// Such markers decode to an empty string, which trivially passes the
/// printable filter but carries no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoidMarkerPolicy {
    /// Keep void markers as events with an empty code
    Keep,
    /// Drop void markers
    #[default]
    Drop,
}

/// Which channel partitions to materialize during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractKind {
    /// Marker channels, extracted as (code, time) tables
    Events,
    /// Waveform channels, extracted as (samples, times) pairs
    Waves,
}

impl FromStr for ExtractKind {
    type Err = Spike2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(ExtractKind::Events),
            "waves" => Ok(ExtractKind::Waves),
            other => Err(Spike2Error::InvalidKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Tunables for an extraction session.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Fraction of available system memory one waveform chunk may occupy
    pub memory_fraction: f64,
    /// Upper bound on markers read per event channel; the true count is not
    /// known from metadata alone
    pub max_markers: usize,
    /// What to do with all-zero marker codes
    pub void_markers: VoidMarkerPolicy,
    /// Decimal places event times are rounded to
    pub time_decimals: u32,
    /// Capacity of the per-session extracted-channel cache
    pub cache_entries: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            memory_fraction: 0.5,
            max_markers: 2_000_000_000,
            void_markers: VoidMarkerPolicy::default(),
            time_decimals: 3,
            cache_entries: 128,
        }
    }
}

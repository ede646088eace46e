//! Access to the underlying SON recording file.
//!
//! The proprietary reader library is kept behind the [`RecordingSource`]
//! trait: a session is constructed with a concrete source and fails fast if
//! the source reports an open error, instead of deferring the failure to the
//! first read. Read methods take `&mut self` because a source holds a single
//! read cursor; interleaved reads against one handle are not supported.

use crate::error::{Result, Spike2Error};
use crate::types::{ChannelKind, Marker};

/// Surface of an opened Spike2 file.
///
/// Channel arguments are the file's own channel indices, `0..channel_count()`.
pub trait RecordingSource {
    /// Number of channel slots in the file.
    fn channel_count(&self) -> usize;

    /// Title of a channel.
    fn channel_title(&self, channel: usize) -> Result<String>;

    /// Type code of a channel.
    fn channel_kind(&self, channel: usize) -> Result<ChannelKind>;

    /// Clock ticks between successive waveform samples; 0 for channels
    /// without a sample interval.
    fn channel_divide(&self, channel: usize) -> Result<i64>;

    /// Physical units of a channel.
    fn channel_units(&self, channel: usize) -> Result<String>;

    /// Seconds per clock tick for this file.
    fn time_base(&self) -> f64;

    /// Last time point in the file, in clock ticks.
    fn max_time(&self) -> i64;

    /// Whether the file uses the old 32-bit format.
    fn is_32bit(&self) -> bool;

    /// Raw open-error code; 0 means the file opened cleanly.
    fn open_error(&self) -> i32;

    /// Reads up to `max_count` marker records starting at tick `start`.
    fn read_markers(&mut self, channel: usize, max_count: usize, start: i64) -> Result<Vec<Marker>>;

    /// Reads `count` waveform samples starting at item `start`.
    fn read_floats(&mut self, channel: usize, count: usize, start: usize) -> Result<Vec<f32>>;

    /// Total bytes stored for a channel.
    fn channel_bytes(&self, channel: usize) -> Result<u64>;

    /// Bytes per stored item for a channel.
    fn item_size(&self, channel: usize) -> Result<u64>;
}

/// One channel of a [`SyntheticSource`].
#[derive(Debug, Clone)]
pub struct SyntheticChannel {
    /// Channel title
    pub title: String,
    /// Channel type code
    pub kind: ChannelKind,
    /// Ticks between waveform samples
    pub divide: i64,
    /// Physical units
    pub units: String,
    /// Waveform samples, for Adc channels
    pub samples: Vec<f32>,
    /// Marker records, for marker channels
    pub markers: Vec<Marker>,
    /// Overrides the reported byte count, to simulate a corrupt size report
    pub reported_bytes: Option<u64>,
}

/// An in-memory recording used by tests, the demo and the benchmark.
///
/// Waveform items are stored as 4-byte floats; the reported channel byte
/// count follows from the sample count unless overridden per channel.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    time_base: f64,
    max_time: i64,
    bit32: bool,
    open_error: i32,
    channels: Vec<SyntheticChannel>,
    fail_floats_after: Option<(usize, usize)>,
    fail_markers_on: Option<usize>,
    floats_reads: usize,
}

const ITEM_SIZE: u64 = 4;

impl SyntheticSource {
    /// A new empty source with the given seconds-per-tick time base.
    pub fn new(time_base: f64) -> Self {
        SyntheticSource {
            time_base,
            max_time: 0,
            bit32: false,
            open_error: 0,
            channels: Vec::new(),
            fail_floats_after: None,
            fail_markers_on: None,
            floats_reads: 0,
        }
    }

    /// Sets the reported open-error code.
    pub fn with_open_error(mut self, code: i32) -> Self {
        self.open_error = code;
        self
    }

    /// Sets the last time point of the file, in ticks.
    pub fn with_max_time(mut self, ticks: i64) -> Self {
        self.max_time = ticks;
        self
    }

    /// Marks the file as old 32-bit format.
    pub fn with_32bit(mut self) -> Self {
        self.bit32 = true;
        self
    }

    /// Adds an Adc waveform channel; returns its index.
    pub fn push_wave(&mut self, title: &str, divide: i64, samples: Vec<f32>) -> usize {
        self.push_channel(SyntheticChannel {
            title: title.to_string(),
            kind: ChannelKind::Adc,
            divide,
            units: "V".to_string(),
            samples,
            markers: Vec::new(),
            reported_bytes: None,
        })
    }

    /// Adds a marker channel; returns its index.
    pub fn push_markers(&mut self, title: &str, markers: Vec<Marker>) -> usize {
        self.push_channel(SyntheticChannel {
            title: title.to_string(),
            kind: ChannelKind::Marker,
            divide: 0,
            units: String::new(),
            samples: Vec::new(),
            markers,
            reported_bytes: None,
        })
    }

    /// Adds an arbitrary channel; returns its index.
    pub fn push_channel(&mut self, channel: SyntheticChannel) -> usize {
        self.channels.push(channel);
        self.channels.len() - 1
    }

    /// Makes `read_floats` on `channel` fail once `items` samples have been
    /// handed out, to exercise mid-stream failure handling.
    pub fn fail_floats_after(&mut self, channel: usize, items: usize) {
        self.fail_floats_after = Some((channel, items));
    }

    /// Makes `read_markers` on `channel` fail, to exercise marker decode
    /// failure handling.
    pub fn fail_markers_on(&mut self, channel: usize) {
        self.fail_markers_on = Some(channel);
    }

    /// Number of `read_floats` calls served so far.
    pub fn floats_reads(&self) -> usize {
        self.floats_reads
    }

    fn channel(&self, index: usize) -> Result<&SyntheticChannel> {
        self.channels.get(index).ok_or_else(|| Spike2Error::ChannelRead {
            index,
            name: String::new(),
            message: format!("no such channel (file has {})", self.channels.len()),
        })
    }
}

impl RecordingSource for SyntheticSource {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel_title(&self, channel: usize) -> Result<String> {
        Ok(self.channel(channel)?.title.clone())
    }

    fn channel_kind(&self, channel: usize) -> Result<ChannelKind> {
        Ok(self.channel(channel)?.kind)
    }

    fn channel_divide(&self, channel: usize) -> Result<i64> {
        Ok(self.channel(channel)?.divide)
    }

    fn channel_units(&self, channel: usize) -> Result<String> {
        Ok(self.channel(channel)?.units.clone())
    }

    fn time_base(&self) -> f64 {
        self.time_base
    }

    fn max_time(&self) -> i64 {
        self.max_time
    }

    fn is_32bit(&self) -> bool {
        self.bit32
    }

    fn open_error(&self) -> i32 {
        self.open_error
    }

    fn read_markers(&mut self, channel: usize, max_count: usize, start: i64) -> Result<Vec<Marker>> {
        if self.fail_markers_on == Some(channel) {
            return Err(Spike2Error::MarkerDecode {
                index: channel,
                name: self.channel(channel)?.title.clone(),
                message: "simulated marker failure".to_string(),
            });
        }
        let markers = &self.channel(channel)?.markers;
        Ok(markers
            .iter()
            .filter(|mark| mark.tick >= start)
            .take(max_count)
            .copied()
            .collect())
    }

    fn read_floats(&mut self, channel: usize, count: usize, start: usize) -> Result<Vec<f32>> {
        self.floats_reads += 1;
        if let Some((failing, after)) = self.fail_floats_after {
            if failing == channel && start + count > after {
                return Err(Spike2Error::ChannelRead {
                    index: channel,
                    name: self.channel(channel)?.title.clone(),
                    message: "simulated read failure".to_string(),
                });
            }
        }
        let synthetic = self.channel(channel)?;
        let end = start + count;
        if end > synthetic.samples.len() {
            return Err(Spike2Error::ChannelRead {
                index: channel,
                name: synthetic.title.clone(),
                message: format!(
                    "read past end of channel: items {start}..{end} of {}",
                    synthetic.samples.len()
                ),
            });
        }
        Ok(synthetic.samples[start..end].to_vec())
    }

    fn channel_bytes(&self, channel: usize) -> Result<u64> {
        let synthetic = self.channel(channel)?;
        Ok(synthetic
            .reported_bytes
            .unwrap_or(synthetic.samples.len() as u64 * ITEM_SIZE))
    }

    fn item_size(&self, channel: usize) -> Result<u64> {
        self.channel(channel)?;
        Ok(ITEM_SIZE)
    }
}

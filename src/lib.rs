//! Import, classify and merge Spike2 electrophysiology recordings.
//!
//! A recording's channels are partitioned into event (marker) channels and
//! analog waveform channels, with waveforms further tagged as unit or LFP by
//! name. Waveform data streams in memory-bounded chunks, marker codes are
//! filtered to printable ASCII, and clock-tick times convert to seconds
//! through the per-file time base. A pre/post-infusion recording pair of the
//! same subject can then be merged into one continuous timeline.
//!
//! The proprietary SON reader stays behind the [`RecordingSource`] trait;
//! sessions are constructed with any implementation of it.
//!
//! # Examples
//!
//! ```
//! use spike2_importer::{open_recording, ExtractKind, ExtractOptions, SyntheticSource};
//!
//! let mut source = SyntheticSource::new(1e-5);
//! source.push_wave("U1", 100, vec![0.5; 1000]);
//!
//! let mut session = open_recording("demo.smr", source, ExtractOptions::default())?;
//! let dataset = session.extract(&[ExtractKind::Waves])?;
//! assert_eq!(dataset.data.len(), 1);
//! # Ok::<(), spike2_importer::Spike2Error>(())
//! ```

pub mod cache;
pub mod error;
pub mod merge;
pub mod reader;
pub mod source;
pub mod store;
pub mod time;
pub mod types;
pub mod util;

// Re-export the working surface
pub use error::{Result, Spike2Error};
pub use reader::{open_recording, ChannelPartition, Spike2Session};
pub use source::{RecordingSource, SyntheticChannel, SyntheticSource};
pub use store::{DatasetStore, JsonStore};
pub use types::*;

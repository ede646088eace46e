//! Error types for Spike2 extraction and merging.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ChannelDescriptor;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Spike2Error>;

/// Errors that can occur while importing or merging recordings.
///
/// File-level and merge-identity errors are returned to the caller; the
/// per-channel variants (`ChannelRead`, `MarkerDecode`) are accumulated in a
/// session's error map so one malformed channel never aborts a whole file.
#[derive(Error, Debug)]
pub enum Spike2Error {
    /// The path does not carry a recognized Spike2 extension.
    #[error("{path}: extension {ext:?} is not a Spike2 recording (expected .smr or .smrx)")]
    UnsupportedExtension {
        /// Path that was rejected.
        path: PathBuf,
        /// The offending extension, empty when the path has none.
        ext: String,
    },

    /// The source library reported a failure opening the file.
    #[error("{path}: source library reported open error {code}")]
    OpenFailed {
        /// Path that failed to open.
        path: PathBuf,
        /// Raw error code from the source library.
        code: i32,
    },

    /// A single waveform channel could not be read consistently.
    #[error("channel {index} ({name}): {message}")]
    ChannelRead {
        /// Channel index within the file.
        index: usize,
        /// Channel title.
        name: String,
        /// Description of the read failure.
        message: String,
    },

    /// Marker records for one event channel could not be decoded.
    #[error("channel {index} ({name}): marker decode failed: {message}")]
    MarkerDecode {
        /// Channel index within the file.
        index: usize,
        /// Channel title.
        name: String,
        /// Description of the decode failure.
        message: String,
    },

    /// Pre/post filename stems do not resolve to the same subject.
    #[error("recording names do not match: {pre:?} vs {post:?}")]
    IdentityMismatch {
        /// Identity derived from the pre-infusion stem.
        pre: String,
        /// Identity derived from the post-infusion stem.
        post: String,
    },

    /// Arrays handed to a padding or merge operation differ by more than
    /// the allowed tolerance.
    #[error("array lengths differ by {diff}, more than the allowed {max_diff}")]
    LengthMismatch {
        /// Observed length difference.
        diff: usize,
        /// Maximum allowed difference.
        max_diff: usize,
    },

    /// Two channels with the same key hold incompatible data shapes.
    #[error("channel {key}: cannot merge {pre} data with {post} data")]
    ShapeMismatch {
        /// Channel key under merge.
        key: String,
        /// Shape found on the pre side.
        pre: &'static str,
        /// Shape found on the post side.
        post: &'static str,
    },

    /// An extraction kind other than "events" or "waves" was requested.
    #[error("invalid extraction kind {kind:?} (expected \"events\" or \"waves\")")]
    InvalidKind {
        /// The rejected kind string.
        kind: String,
    },

    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Spike2Error {
    /// Create a ChannelRead error for the given channel.
    pub fn channel_read(channel: &ChannelDescriptor, message: impl Into<String>) -> Self {
        Self::ChannelRead {
            index: channel.index,
            name: channel.name.clone(),
            message: message.into(),
        }
    }

    /// Create a MarkerDecode error for the given channel.
    pub fn marker_decode(channel: &ChannelDescriptor, message: impl Into<String>) -> Self {
        Self::MarkerDecode {
            index: channel.index,
            name: channel.name.clone(),
            message: message.into(),
        }
    }
}

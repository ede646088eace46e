//! Merging a pre/post-infusion recording pair into one continuous timeline.
//!
//! Both recordings must name the same subject: the file stems resolve to a
//! shared identity once the recognized pre/post suffix is removed. Merged
//! channels cover only the keys present on both sides; unit keys stack their
//! 2-D spike waveforms along the event axis, LFP keys append flat, and every
//! post-side timestamp is shifted by the pre side's final timestamp read at
//! merge time. Inputs are borrowed and never mutated, so either half stays
//! usable afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use ndarray::{concatenate, s, Array1, Array2, Axis};

use crate::error::{Result, Spike2Error};
use crate::types::{
    ChannelData, Dataset, EventStream, FileMetadata, MergedDataset, MergedMetadata, SpikeRecord,
    WaveformRecord,
};
use crate::util::{contains_ci, pad_arrays_to_same_length};

const PRE_SUFFIX: &str = "_preinfusion";
const POST_SUFFIX: &str = "_postinfusion";

/// Widest tolerated spike-waveform width mismatch between the two halves.
pub const PAD_MAX_DIFF: usize = 100;

/// Derives the shared subject identity from a pre/post pair of file stems.
///
/// Each stem is truncated at its recognized suffix; the remainders must
/// match exactly or the pair is rejected.
pub fn subject_identity(pre_stem: &str, post_stem: &str) -> Result<String> {
    let pre_key = pre_stem.split(PRE_SUFFIX).next().unwrap_or(pre_stem);
    let post_key = post_stem.split(POST_SUFFIX).next().unwrap_or(post_stem);
    if pre_key == post_key {
        Ok(pre_key.to_string())
    } else {
        Err(Spike2Error::IdentityMismatch {
            pre: pre_key.to_string(),
            post: post_key.to_string(),
        })
    }
}

/// [`subject_identity`] over file paths.
pub fn common_name(pre: &Path, post: &Path) -> Result<String> {
    subject_identity(&stem_of(pre), &stem_of(post))
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Validates subject identity and merges two extracted recordings.
///
/// Returns the shared identity together with the merged dataset.
pub fn merge_recordings(
    pre_path: &Path,
    pre: &Dataset,
    post_path: &Path,
    post: &Dataset,
) -> Result<(String, MergedDataset)> {
    let identity = common_name(pre_path, post_path)?;
    let merged = merge_datasets(pre, post)?;
    info!(
        "merged {} + {} into {} ({} channel(s), {} event(s))",
        pre_path.display(),
        post_path.display(),
        identity,
        merged.data.len(),
        merged.events.codes.len(),
    );
    Ok((identity, merged))
}

/// Merges two extracted recordings channel-by-channel.
///
/// Only unit and LFP keys present in both datasets are covered; a key
/// containing both name tags merges as a unit. Event channels merge at the
/// whole-recording level instead, and the metadata halves are kept side by
/// side rather than combined.
pub fn merge_datasets(pre: &Dataset, post: &Dataset) -> Result<MergedDataset> {
    let mut data = BTreeMap::new();

    for (key, pre_channel) in &pre.data {
        // event channels merge as one whole-recording stream below
        if matches!(pre_channel, ChannelData::Events(_)) {
            continue;
        }
        let Some(post_channel) = post.data.get(key) else {
            continue;
        };
        if contains_ci(key, "u") {
            data.insert(key.clone(), merge_unit(key, pre_channel, post_channel)?);
        } else if contains_ci(key, "lfp") {
            data.insert(key.clone(), merge_lfp(key, pre_channel, post_channel)?);
        }
    }

    let events = merge_events(&pre.event_stream(), &post.event_stream());

    Ok(MergedDataset {
        data,
        events,
        metadata: merge_metadata(&pre.metadata, &post.metadata),
        channels: pre.channels.clone(),
    })
}

/// Stacks a unit key: spike waveforms concatenate along the event axis and
/// post times shift by the pre side's final timestamp.
///
/// Continuous (not yet sorted) unit waveforms append flat like LFP data.
fn merge_unit(key: &str, pre: &ChannelData, post: &ChannelData) -> Result<ChannelData> {
    match (pre, post) {
        (ChannelData::Spikes(pre), ChannelData::Spikes(post)) => {
            let offset = last_time(&pre.times);
            let shifted = &post.times + offset;
            let times = concatenate![Axis(0), pre.times.view(), shifted.view()];
            let waveforms = stack_spike_waveforms(&pre.waveforms, &post.waveforms)?;
            Ok(ChannelData::Spikes(SpikeRecord {
                channel_name: key.to_string(),
                waveforms,
                times,
            }))
        }
        (ChannelData::Wave(_), ChannelData::Wave(_)) => merge_lfp(key, pre, post),
        _ => Err(Spike2Error::ShapeMismatch {
            key: key.to_string(),
            pre: pre.shape_name(),
            post: post.shape_name(),
        }),
    }
}

/// Appends an LFP key flat: 1-D samples concatenate and post times shift by
/// the pre side's final timestamp.
fn merge_lfp(key: &str, pre: &ChannelData, post: &ChannelData) -> Result<ChannelData> {
    match (pre, post) {
        (ChannelData::Wave(pre), ChannelData::Wave(post)) => {
            let offset = last_time(&pre.times);
            let shifted = &post.times + offset;
            Ok(ChannelData::Wave(WaveformRecord {
                channel: pre.channel.clone(),
                samples: concatenate![Axis(0), pre.samples.view(), post.samples.view()],
                times: concatenate![Axis(0), pre.times.view(), shifted.view()],
            }))
        }
        _ => Err(Spike2Error::ShapeMismatch {
            key: key.to_string(),
            pre: pre.shape_name(),
            post: post.shape_name(),
        }),
    }
}

/// Merges two whole-recording event streams: post times shift by the pre
/// stream's final timestamp, then codes and times concatenate.
pub fn merge_events(pre: &EventStream, post: &EventStream) -> EventStream {
    let offset = last_time(&pre.times);
    let shifted = &post.times + offset;
    let mut codes = pre.codes.clone();
    codes.extend(post.codes.iter().cloned());
    EventStream {
        codes,
        times: concatenate![Axis(0), pre.times.view(), shifted.view()],
    }
}

/// Keeps both metadata halves for traceability.
pub fn merge_metadata(pre: &FileMetadata, post: &FileMetadata) -> MergedMetadata {
    MergedMetadata {
        pre: pre.clone(),
        post: post.clone(),
    }
}

fn last_time(times: &Array1<f64>) -> f64 {
    times.last().copied().unwrap_or(0.0)
}

/// Stacks two spike-waveform matrices along the event axis.
///
/// Widths differing by at most [`PAD_MAX_DIFF`] samples are zero-padded to
/// the wider one; a larger mismatch fails the operation.
fn stack_spike_waveforms(pre: &Array2<f64>, post: &Array2<f64>) -> Result<Array2<f64>> {
    if pre.ncols() == post.ncols() {
        return Ok(concatenate![Axis(0), pre.view(), post.view()]);
    }

    let rows: Vec<Array1<f64>> = pre
        .rows()
        .into_iter()
        .chain(post.rows())
        .map(|row| row.to_owned())
        .collect();
    let padded = pad_arrays_to_same_length(&rows, PAD_MAX_DIFF)?;

    let width = pre.ncols().max(post.ncols());
    let mut stacked = Array2::zeros((padded.len(), width));
    for (index, row) in padded.iter().enumerate() {
        stacked.slice_mut(s![index, ..]).assign(row);
    }
    Ok(stacked)
}

//! Small shared helpers.

use ndarray::{s, Array1};

use crate::error::{Result, Spike2Error};

/// Case-insensitive substring check.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Zero-pads a list of arrays to the length of the longest one.
///
/// Fails with [`Spike2Error::LengthMismatch`] when the longest and shortest
/// array differ by more than `max_diff` elements, which signals misaligned
/// inputs rather than ordinary ragged edges.
pub fn pad_arrays_to_same_length(
    arrays: &[Array1<f64>],
    max_diff: usize,
) -> Result<Vec<Array1<f64>>> {
    if arrays.is_empty() {
        return Ok(Vec::new());
    }

    let lengths: Vec<usize> = arrays.iter().map(Array1::len).collect();
    let longest = *lengths.iter().max().expect("non-empty");
    let shortest = *lengths.iter().min().expect("non-empty");

    if longest - shortest > max_diff {
        return Err(Spike2Error::LengthMismatch {
            diff: longest - shortest,
            max_diff,
        });
    }

    Ok(arrays
        .iter()
        .map(|arr| {
            let mut padded = Array1::zeros(longest);
            padded.slice_mut(s![..arr.len()]).assign(arr);
            padded
        })
        .collect())
}

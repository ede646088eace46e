//! Conversion between the file clock-tick domain and seconds.
//!
//! Everything in a Spike2 file is quantified by the underlying clock tick;
//! the per-file time base gives the seconds each tick represents. Marker
//! times convert through the time base directly, waveform sample times
//! derive from the sample index and the channel's sampling rate. The two
//! must not be conflated.

use ndarray::Array1;

/// Converts clock ticks to seconds. `time_base` is seconds per tick.
pub fn ticks_to_seconds(ticks: &[i64], time_base: f64) -> Array1<f64> {
    ticks.iter().map(|&tick| tick as f64 * time_base).collect()
}

/// Per-sample time vector `[0, 1/rate, 2/rate, ...]` for `count` samples.
pub fn indices_to_seconds(count: usize, sampling_rate: f64) -> Array1<f64> {
    (0..count).map(|index| index as f64 / sampling_rate).collect()
}

/// Rounds to a fixed number of decimal places, for display-stable times.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

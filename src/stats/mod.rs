//! Descriptive statistics over a filtered [`TripTable`].
//!
//! Each reporter computes a plain result struct, then prints it as one
//! block followed by the elapsed time and a separator line.
//!
//! "Most frequent" always breaks ties towards the lowest value, so results do
//! not depend on row order.
//!
//! [`TripTable`]: crate::data::model::TripTable

use std::collections::BTreeMap;
use std::io;
use std::time::Instant;

use crate::console::{separator, Console};

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

/// Shown when a statistic is undefined for an empty table.
pub const NOT_AVAILABLE: &str = "n/a";

/// Count occurrences, ordered by ascending value.
pub fn counts<T: Ord>(values: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value; the lowest one wins a tie.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts(values) {
        // Ascending iteration: only a strictly higher count replaces.
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Frequencies in descending count order; equal counts stay in ascending
/// value order.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut ranked: Vec<(T, usize)> = counts(values).into_iter().collect();
    // Stable sort keeps the ascending value order among ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// [`mode`] for floats, ordered with `total_cmp`.
pub fn float_mode(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(f64, usize)> = None;
    for run in sorted.chunk_by(|a, b| a.total_cmp(b).is_eq()) {
        if best.map_or(true, |(_, c)| run.len() > c) {
            best = Some((run[0], run.len()));
        }
    }
    best.map(|(value, _)| value)
}

/// Format an optional statistic, using [`NOT_AVAILABLE`] for `None`.
pub fn or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Print the elapsed time since `started` and close the block.
pub fn finish_block<C: Console>(console: &mut C, started: Instant) -> io::Result<()> {
    console.say(&format!(
        "\nThis took {} seconds.",
        started.elapsed().as_secs_f64()
    ))?;
    console.say(&separator())
}

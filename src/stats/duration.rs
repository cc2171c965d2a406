use std::io;
use std::time::Instant;

use super::{finish_block, or_na};
use crate::console::Console;
use crate::data::model::TripTable;

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    /// `None` for an empty table.
    pub mean: Option<f64>,
}

pub fn compute(table: &TripTable) -> DurationStats {
    let total: f64 = table.trips.iter().map(|t| t.record.trip_duration).sum();
    let mean = (!table.is_empty()).then(|| total / table.len() as f64);
    DurationStats { total, mean }
}

pub fn report<C: Console>(console: &mut C, table: &TripTable) -> io::Result<DurationStats> {
    console.say("\nCalculating Trip Duration...\n")?;
    let started = Instant::now();

    let stats = compute(table);
    console.say(&format!("Total Travel Time: {}", stats.total))?;
    // Debug formatting keeps the decimal point on whole means (`120.0`).
    let mean = stats.mean.map(|m| format!("{m:?}"));
    console.say(&format!("Mean Travel Time: {}", or_na(mean)))?;

    finish_block(console, started)?;
    Ok(stats)
}

use std::io;
use std::time::Instant;

use super::{finish_block, mode, or_na};
use crate::console::Console;
use crate::data::model::TripTable;

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// (start, end) pair with the most trips.
    pub trip: Option<(String, String)>,
}

pub fn compute(table: &TripTable) -> StationStats {
    let records = || table.trips.iter().map(|t| &t.record);
    StationStats {
        start_station: mode(records().map(|r| r.start_station.as_str())).map(String::from),
        end_station: mode(records().map(|r| r.end_station.as_str())).map(String::from),
        trip: mode(records().map(|r| (r.start_station.as_str(), r.end_station.as_str())))
            .map(|(start, end)| (start.to_string(), end.to_string())),
    }
}

pub fn report<C: Console>(console: &mut C, table: &TripTable) -> io::Result<StationStats> {
    console.say("\nCalculating The Most Popular Stations and Trip...\n")?;
    let started = Instant::now();

    let stats = compute(table);
    console.say(&format!(
        "Most Popular Start Station: {}",
        or_na(stats.start_station.as_deref())
    ))?;
    console.say(&format!(
        "Most Popular End Station: {}",
        or_na(stats.end_station.as_deref())
    ))?;
    console.say(&format!(
        "Most Popular Trip: {}",
        or_na(stats.trip.as_ref().map(|(s, e)| format!("{s} >>> {e}")))
    ))?;

    finish_block(console, started)?;
    Ok(stats)
}

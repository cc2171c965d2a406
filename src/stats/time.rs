use std::io;
use std::time::Instant;

use super::{finish_block, mode, or_na};
use crate::config::ExplorerConfig;
use crate::console::Console;
use crate::data::model::TripTable;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Calendar month number, 1–12.
    pub month: Option<u32>,
    pub day_of_week: Option<&'static str>,
    pub hour: Option<u32>,
}

/// Reads the derived time columns only; they are attached when the table is
/// built, so nothing is recomputed here. Weekdays tie-break alphabetically.
pub fn compute(table: &TripTable) -> TimeStats {
    TimeStats {
        month: mode(table.trips.iter().map(|t| t.time.month)),
        day_of_week: mode(table.trips.iter().map(|t| t.time.day_name())),
        hour: mode(table.trips.iter().map(|t| t.time.hour)),
    }
}

pub fn report<C: Console>(
    console: &mut C,
    table: &TripTable,
    config: &ExplorerConfig,
) -> io::Result<TimeStats> {
    console.say("\nCalculating The Most Frequent Times of Travel...\n")?;
    let started = Instant::now();

    let stats = compute(table);
    console.say(&format!(
        "Most Popular Month: {}",
        or_na(stats.month.map(|m| config.month_name(m)))
    ))?;
    console.say(&format!("Most Popular Day of Week: {}", or_na(stats.day_of_week)))?;
    console.say(&format!("Most Popular Start Hour: {}", or_na(stats.hour)))?;

    finish_block(console, started)?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::scripted::ScriptedConsole;
    use crate::data::model::testing::{table, trip};

    #[test]
    fn test_uniform_table_reports_that_value() {
        // Every trip: March, Friday, 09h.
        let trips = table(vec![
            trip("2017-03-03 09:00:00"),
            trip("2017-03-03 09:15:00"),
            trip("2017-03-10 09:59:59"),
        ]);
        let stats = compute(&trips);
        assert_eq!(
            stats,
            TimeStats {
                month: Some(3),
                day_of_week: Some("Friday"),
                hour: Some(9),
            }
        );
    }

    #[test]
    fn test_ties_break_to_lowest() {
        let trips = table(vec![
            trip("2017-05-03 17:00:00"), // Wednesday
            trip("2017-02-03 08:00:00"), // Friday
        ]);
        let stats = compute(&trips);
        assert_eq!(stats.month, Some(2));
        assert_eq!(stats.day_of_week, Some("Friday"));
        assert_eq!(stats.hour, Some(8));
    }

    #[test]
    fn test_report_names_the_month() {
        let config = ExplorerConfig::default();
        let trips = table(vec![
            trip("2017-06-23 15:09:32"),
            trip("2017-06-23 15:40:00"),
            trip("2017-01-02 08:00:00"),
        ]);
        let mut console = ScriptedConsole::new(&[]);
        report(&mut console, &trips, &config).unwrap();

        let out = console.output();
        assert!(out.contains("Most Popular Month: June"));
        assert!(out.contains("Most Popular Day of Week: Friday"));
        assert!(out.contains("Most Popular Start Hour: 15"));
        assert!(out.contains("This took"));
    }

    #[test]
    fn test_month_outside_list_uses_calendar_name() {
        let config = ExplorerConfig::default();
        let trips = table(vec![trip("2017-09-12 10:00:00")]);
        let mut console = ScriptedConsole::new(&[]);
        report(&mut console, &trips, &config).unwrap();
        assert!(console.output().contains("Most Popular Month: September"));
    }

    #[test]
    fn test_empty_table() {
        let config = ExplorerConfig::default();
        let mut console = ScriptedConsole::new(&[]);
        let stats = report(&mut console, &table(Vec::new()), &config).unwrap();
        assert_eq!(stats.month, None);
        assert!(console.output().contains("Most Popular Month: n/a"));
    }
}

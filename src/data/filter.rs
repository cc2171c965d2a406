use chrono::Weekday;

use super::model::{parse_weekday, Trip, TripTable};
use crate::config::ExplorerConfig;
use crate::error::ExploreError;

/// The "no filter" choice at the month and day prompts.
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// FilterSelection – what the user picked
// ---------------------------------------------------------------------------

/// Title-cased answers to the city / month / day prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: String,
    /// A configured month name or [`ALL`].
    pub month: String,
    /// A weekday name or [`ALL`].
    pub day: String,
}

// ---------------------------------------------------------------------------
// TimeFilter – resolved predicate
// ---------------------------------------------------------------------------

/// Month / weekday predicate. `None` means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFilter {
    pub month: Option<u32>,
    pub day: Option<Weekday>,
}

impl TimeFilter {
    /// Turn prompt answers into a predicate. Months are numbered by their
    /// position in the configured month list.
    pub fn resolve(
        selection: &FilterSelection,
        config: &ExplorerConfig,
    ) -> Result<Self, ExploreError> {
        let month = if selection.month == ALL {
            None
        } else {
            let number = config
                .month_number(&selection.month)
                .ok_or_else(|| ExploreError::UnknownMonth(selection.month.clone()))?;
            Some(number)
        };
        let day = if selection.day == ALL {
            None
        } else {
            let weekday = parse_weekday(&selection.day)
                .ok_or_else(|| ExploreError::UnknownDay(selection.day.clone()))?;
            Some(weekday)
        };
        Ok(TimeFilter { month, day })
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.map_or(true, |m| trip.time.month == m)
            && self.day.map_or(true, |d| trip.time.day_of_week == d)
    }

    /// Keep only the matching trips, preserving order.
    pub fn apply(&self, mut table: TripTable) -> TripTable {
        table.trips.retain(|trip| self.matches(trip));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TripRecord;
    use chrono::NaiveDateTime;

    fn selection(month: &str, day: &str) -> FilterSelection {
        FilterSelection {
            city: "Chicago".to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }
    }

    fn table(starts: &[&str]) -> TripTable {
        let records = starts
            .iter()
            .enumerate()
            .map(|(row, s)| TripRecord {
                row,
                cells: Vec::new(),
                start_time: NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap(),
                trip_duration: 60.0,
                start_station: "A".to_string(),
                end_station: "B".to_string(),
                user_type: None,
                gender: None,
                birth_year: None,
            })
            .collect();
        TripTable::from_records(Vec::new(), records)
    }

    #[test]
    fn test_all_all_is_unconstrained() {
        let config = ExplorerConfig::default();
        let filter = TimeFilter::resolve(&selection(ALL, ALL), &config).unwrap();
        assert_eq!(filter, TimeFilter::default());
    }

    #[test]
    fn test_resolve_month_and_day() {
        let config = ExplorerConfig::default();
        let filter = TimeFilter::resolve(&selection("March", "Friday"), &config).unwrap();
        assert_eq!(filter.month, Some(3));
        assert_eq!(filter.day, Some(Weekday::Fri));
    }

    #[test]
    fn test_unsupported_month_is_rejected() {
        let config = ExplorerConfig::default();
        let err = TimeFilter::resolve(&selection("July", ALL), &config).unwrap_err();
        assert!(matches!(err, ExploreError::UnknownMonth(m) if m == "July"));
    }

    #[test]
    fn test_unknown_day_is_rejected() {
        let config = ExplorerConfig::default();
        let err = TimeFilter::resolve(&selection(ALL, "Someday"), &config).unwrap_err();
        assert!(matches!(err, ExploreError::UnknownDay(_)));
    }

    #[test]
    fn test_apply_intersects_month_and_day() {
        let trips = table(&[
            "2017-01-02 08:00:00", // Monday, January
            "2017-01-06 08:00:00", // Friday, January
            "2017-03-06 08:00:00", // Monday, March
            "2017-03-03 08:00:00", // Friday, March
        ]);
        let filter = TimeFilter {
            month: Some(3),
            day: Some(Weekday::Mon),
        };
        let filtered = filter.apply(trips.clone());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.trips[0].record.row, 2);

        let mondays = TimeFilter {
            month: None,
            day: Some(Weekday::Mon),
        }
        .apply(trips);
        let rows: Vec<usize> = mondays.trips.iter().map(|t| t.record.row).collect();
        assert_eq!(rows, vec![0, 2]);
    }
}

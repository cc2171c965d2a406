use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const START_TIME: &str = "Start Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [START_TIME, TRIP_DURATION, START_STATION, END_STATION, USER_TYPE];

// ---------------------------------------------------------------------------
// Weekday names
// ---------------------------------------------------------------------------

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Inverse of [`weekday_name`]; exact match only.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    WEEKDAYS.into_iter().find(|d| weekday_name(*d) == name)
}

// ---------------------------------------------------------------------------
// TripRecord – one parsed row of a city file
// ---------------------------------------------------------------------------

/// A single trip. `cells` keeps every source column as text, aligned with
/// [`TripTable::columns`]; the typed fields are parsed from those cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based position of the row in the source file.
    pub row: usize,
    pub cells: Vec<String>,
    pub start_time: NaiveDateTime,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` when the cell is empty.
    pub user_type: Option<String>,
    /// `None` when the column is absent or the cell is empty.
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
}

// ---------------------------------------------------------------------------
// TimeParts – derived columns
// ---------------------------------------------------------------------------

/// Month, weekday and hour derived from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// 1–12.
    pub month: u32,
    pub day_of_week: Weekday,
    /// 0–23.
    pub hour: u32,
}

impl TimeParts {
    pub fn from_start(start: &NaiveDateTime) -> Self {
        Self {
            month: start.month(),
            day_of_week: start.weekday(),
            hour: start.hour(),
        }
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// A trip together with its derived time columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub record: TripRecord,
    pub time: TimeParts,
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Self {
        let time = TimeParts::from_start(&record.start_time);
        Trip { record, time }
    }
}

// ---------------------------------------------------------------------------
// TripTable – the loaded (and possibly filtered) dataset
// ---------------------------------------------------------------------------

/// Trips of one city in source order, with the column layout they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    /// Source column names, in file order.
    pub columns: Vec<String>,
    pub trips: Vec<Trip>,
}

impl TripTable {
    /// Attach derived time columns to parsed records.
    pub fn from_records(columns: Vec<String>, records: Vec<TripRecord>) -> Self {
        TripTable {
            columns,
            trips: records.into_iter().map(Trip::from).collect(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

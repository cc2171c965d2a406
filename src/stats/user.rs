use std::io;
use std::time::Instant;

use super::{finish_block, float_mode, value_counts};
use crate::console::Console;
use crate::data::model::{TripTable, BIRTH_YEAR, GENDER};

/// Earliest, latest and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// Bikeshare user demographics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Descending by count.
    pub user_types: Vec<(String, usize)>,
    /// `None` when the city has no Gender column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the city has no Birth Year column or it holds no values.
    pub birth_years: Option<BirthYears>,
}

pub fn compute(table: &TripTable) -> UserStats {
    let records = || table.trips.iter().map(|t| &t.record);

    let user_types = owned(value_counts(
        records().filter_map(|r| r.user_type.as_deref()),
    ));
    let genders = table
        .has_column(GENDER)
        .then(|| owned(value_counts(records().filter_map(|r| r.gender.as_deref()))));
    let birth_years = if table.has_column(BIRTH_YEAR) {
        let years: Vec<f64> = records().filter_map(|r| r.birth_year).collect();
        birth_years(&years)
    } else {
        None
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn birth_years(years: &[f64]) -> Option<BirthYears> {
    let earliest = years.iter().copied().min_by(|a, b| a.total_cmp(b))?;
    let most_recent = years.iter().copied().max_by(|a, b| a.total_cmp(b))?;
    let most_common = float_mode(years)?;
    Some(BirthYears {
        earliest: earliest as i64,
        most_recent: most_recent as i64,
        most_common: most_common as i64,
    })
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn listing(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(value, count)| format!("  {value:12} {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn report<C: Console>(console: &mut C, table: &TripTable) -> io::Result<UserStats> {
    console.say("\nCalculating User Stats...\n")?;
    let started = Instant::now();

    let stats = compute(table);
    console.say(&format!("Counts of User Types:\n{}\n", listing(&stats.user_types)))?;
    match &stats.genders {
        Some(genders) => console.say(&format!("Counts of Genders:\n{}\n", listing(genders)))?,
        None => console.say("Gender data is not available\n")?,
    }
    match stats.birth_years {
        Some(years) => console.say(&format!(
            "Birth Year: Earliest - {}, Most Recent - {}, Most Common - {}",
            years.earliest, years.most_recent, years.most_common
        ))?,
        None => console.say("Birth Year data is not available")?,
    }

    finish_block(console, started)?;
    Ok(stats)
}

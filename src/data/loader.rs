use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::filter::{FilterSelection, TimeFilter};
use super::model::{TripRecord, TripTable, BIRTH_YEAR, GENDER, REQUIRED_COLUMNS, TRIP_DURATION};
use crate::config::ExplorerConfig;
use crate::error::ExploreError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the selected city's trips and apply the month / day filters.
///
/// The file is read on every call; nothing is cached between sessions.
pub fn load_data(config: &ExplorerConfig, selection: &FilterSelection) -> Result<TripTable> {
    let filter = TimeFilter::resolve(selection, config)?;
    let path = config.city_path(&selection.city)?;

    let source = load_file(&path).with_context(|| format!("loading {}", path.display()))?;
    let records = parse_trips(&source, &path)?;
    let table = TripTable::from_records(source.columns, records);
    let total = table.len();

    let table = filter.apply(table);
    log::info!(
        "{}: {} of {} trips match month={} day={}",
        selection.city,
        table.len(),
        total,
        selection.month,
        selection.day
    );
    Ok(table)
}

/// Column names plus every row as text, before any typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a city file, dispatching on its extension.
///
/// Supported formats:
/// * `.csv`            – header row followed by one trip per line
/// * `.parquet` / `.pq` – one column per field, any Arrow type
pub fn load_file(path: &Path) -> Result<SourceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(ExploreError::UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SourceTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    log::debug!("Read {} CSV rows from {}", rows.len(), path.display());
    Ok(SourceTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every column is rendered to text with Arrow's display formatting, nulls
/// become empty cells. Works with files written by Pandas, Polars or the
/// bundled sample generator.
fn load_parquet(path: &Path) -> Result<SourceTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        Ok(String::new())
                    } else {
                        array_value_to_string(col.as_ref(), row)
                    }
                })
                .collect::<Result<Vec<String>, _>>()
                .with_context(|| format!("Row {}: failed to render cells", rows.len()))?;
            rows.push(cells);
        }
    }

    log::debug!("Read {} parquet rows from {}", rows.len(), path.display());
    Ok(SourceTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

/// Check the required columns and parse each row into a [`TripRecord`].
/// `path` only labels errors.
pub fn parse_trips(source: &SourceTable, path: &Path) -> Result<Vec<TripRecord>, ExploreError> {
    let index_of = |name: &str| source.columns.iter().position(|c| c == name);
    let mut required = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = index_of(name).ok_or_else(|| ExploreError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })?;
    }
    let [start_idx, duration_idx, start_station_idx, end_station_idx, user_type_idx] = required;
    let gender_idx = index_of(GENDER);
    let birth_year_idx = index_of(BIRTH_YEAR);

    source
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| -> Result<TripRecord, ExploreError> {
            let cell = |idx: usize| cells.get(idx).map(|s| s.trim()).unwrap_or("");
            let optional = |idx: Option<usize>| {
                idx.map(|i| cell(i))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            let number = |idx: usize, column: &str| {
                let value = cell(idx);
                value.parse::<f64>().map_err(|_| ExploreError::InvalidNumber {
                    path: path.to_path_buf(),
                    row,
                    column: column.to_string(),
                    value: value.to_string(),
                })
            };

            let start_text = cell(start_idx);
            let start_time =
                parse_timestamp(start_text).ok_or_else(|| ExploreError::Timestamp {
                    path: path.to_path_buf(),
                    row,
                    value: start_text.to_string(),
                })?;

            let birth_year = birth_year_idx
                .filter(|&idx| !cell(idx).is_empty())
                .map(|idx| number(idx, BIRTH_YEAR))
                .transpose()?;

            Ok(TripRecord {
                row,
                cells: cells.clone(),
                start_time,
                trip_duration: number(duration_idx, TRIP_DURATION)?,
                start_station: cell(start_station_idx).to_string(),
                end_station: cell(end_station_idx).to_string(),
                user_type: optional(Some(user_type_idx)),
                gender: optional(gender_idx),
                birth_year,
            })
        })
        .collect()
}

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse the date-time layouts found in trip exports. Offsets are dropped,
/// keeping the local wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

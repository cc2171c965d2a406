use std::ops::Range;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::console::Console;
use crate::data::model::{Trip, TripTable};

// ---------------------------------------------------------------------------
// Pager state
// ---------------------------------------------------------------------------

/// Walks a table one page of rows at a time.
#[derive(Debug, Clone)]
pub struct Pager {
    total: usize,
    page_size: usize,
    offset: usize,
}

impl Pager {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            offset: 0,
        }
    }

    /// Row range of the next page, `None` once every row was handed out.
    pub fn next_page(&mut self) -> Option<Range<usize>> {
        if self.offset >= self.total {
            return None;
        }
        let end = (self.offset + self.page_size).min(self.total);
        let range = self.offset..end;
        self.offset += self.page_size;
        Some(range)
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.total
    }
}

// ---------------------------------------------------------------------------
// Interactive browsing
// ---------------------------------------------------------------------------

fn consents(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Offer the filtered rows page by page. Anything but "yes" stops; once the
/// last row is shown browsing ends without asking again.
///
/// Returns the number of pages printed.
pub fn browse<C: Console>(console: &mut C, table: &TripTable, page_size: usize) -> Result<usize> {
    let mut pager = Pager::new(table.len(), page_size);
    let mut answer = console.ask(&format!(
        "Would you like to see raw data (total = {})? Enter yes or no.\n",
        table.len()
    ))?;

    let mut pages = 0;
    while consents(&answer) {
        let Some(range) = pager.next_page() else {
            break;
        };
        console.say(&render_page(&table.columns, &table.trips[range])?)?;
        pages += 1;
        if pager.is_exhausted() {
            break;
        }
        answer = console.ask("Would you like to see more data? Enter yes or no.\n")?;
    }

    log::debug!("Raw data browser showed {pages} page(s) of {} rows", table.len());
    Ok(pages)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render trips as a full text table: source row number, every source
/// column, then the derived month / day_of_week / hour. Nothing is elided.
pub fn render_page(columns: &[String], trips: &[Trip]) -> Result<String> {
    let batch = page_batch(columns, trips)?;
    let table = pretty_format_batches(&[batch]).context("formatting raw data page")?;
    Ok(table.to_string())
}

fn page_batch(columns: &[String], trips: &[Trip]) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(columns.len() + 4);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len() + 4);

    fields.push(Field::new("#", DataType::UInt64, false));
    arrays.push(Arc::new(UInt64Array::from_iter_values(
        trips.iter().map(|t| t.record.row as u64),
    )));

    for (idx, name) in columns.iter().enumerate() {
        fields.push(Field::new(name.as_str(), DataType::Utf8, false));
        arrays.push(Arc::new(StringArray::from_iter_values(trips.iter().map(|t| {
            t.record.cells.get(idx).map(String::as_str).unwrap_or_default()
        }))));
    }

    fields.push(Field::new("month", DataType::UInt32, false));
    arrays.push(Arc::new(UInt32Array::from_iter_values(
        trips.iter().map(|t| t.time.month),
    )));
    fields.push(Field::new("day_of_week", DataType::Utf8, false));
    arrays.push(Arc::new(StringArray::from_iter_values(
        trips.iter().map(|t| t.time.day_name()),
    )));
    fields.push(Field::new("hour", DataType::UInt32, false));
    arrays.push(Arc::new(UInt32Array::from_iter_values(
        trips.iter().map(|t| t.time.hour),
    )));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).context("building raw data page")
}

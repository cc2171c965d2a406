use anyhow::Result;

use crate::browser;
use crate::config::ExplorerConfig;
use crate::console::Console;
use crate::data::loader::load_data;
use crate::input::collect_filters;
use crate::stats::{duration, station, time, user};

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

/// Run explorations until the user declines to restart. Each iteration
/// starts from scratch: prompts, a fresh file read, reports, raw rows.
pub fn run<C: Console>(console: &mut C, config: &ExplorerConfig) -> Result<()> {
    let mut round = 1;
    loop {
        explore_once(console, config)?;

        let restart = console.ask("\nWould you like to restart? Enter yes or no.\n")?;
        if !restart.trim().eq_ignore_ascii_case("yes") {
            log::info!("Session finished after {round} exploration(s)");
            return Ok(());
        }
        round += 1;
    }
}

/// One pass: filters, load, the four reports, raw data.
pub fn explore_once<C: Console>(console: &mut C, config: &ExplorerConfig) -> Result<()> {
    let selection = collect_filters(console, config)?;
    log::info!(
        "Exploring {} (month={}, day={})",
        selection.city,
        selection.month,
        selection.day
    );

    let table = load_data(config, &selection)?;

    time::report(console, &table, config)?;
    station::report(console, &table)?;
    duration::report(console, &table)?;
    user::report(console, &table)?;
    browser::browse(console, &table, config.page_size)?;
    Ok(())
}

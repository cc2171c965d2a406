mod browser;
mod config;
mod console;
mod data;
mod error;
mod input;
mod session;
mod stats;

use anyhow::Result;
use config::ExplorerConfig;
use console::Terminal;

fn main() -> Result<()> {
    env_logger::init();

    let config = ExplorerConfig::load()?;
    log::info!(
        "Bikeshare explorer v{} reading from {}",
        env!("CARGO_PKG_VERSION"),
        config.data_dir.display()
    );

    let mut console = Terminal::stdio();
    session::run(&mut console, &config)
}

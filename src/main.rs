#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use anyhow::Context;
use tracing::info;

use isopac::app::App;
use isopac::config;
use isopac::constants::LOOP_TIME;
use isopac::logging;

/// Loads the configuration, then runs the attract-mode demo until the game
/// ends or its tick budget is spent.
pub fn main() -> anyhow::Result<()> {
    logging::setup_logging().context("Could not install the tracing subscriber")?;

    let config = config::load_config().context("Could not load configuration")?;
    let mut app = App::new(&config).context("Could not start the game")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    app.report();
    Ok(())
}

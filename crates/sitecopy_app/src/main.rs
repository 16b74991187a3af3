mod app;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let config = config::load(std::path::Path::new(config::CONFIG_FILENAME));
    app::run(config).context("run the sitecopy client")
}

//! Terminal front end: wiring between the pure core, the engine and the screen.
mod app;
mod clipboard;
pub mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Context;

use config::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(&cli.log_settings());
    let settings = cli.classifier_settings()?;

    match cli.one_shot().context("invalid one-shot arguments")? {
        Some(input) => app::run_once(settings, input, cli.json),
        None => app::run_interactive(settings),
    }
}

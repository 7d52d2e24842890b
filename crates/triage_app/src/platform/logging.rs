//! Log setup for the triage binary.
//!
//! The interactive screen owns stdout, so terminal logging goes to stderr and
//! the default destination is a file next to where the binary was started.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// The log file only.
    File,
    /// Stderr only.
    Terminal,
    /// Stderr and the log file.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
    pub file: PathBuf,
    /// Module prefixes whose records are dropped.
    pub ignored_targets: Vec<&'static str>,
}

pub fn initialize(settings: &LogSettings) {
    let config = build_config(&settings.ignored_targets);
    let to_terminal = matches!(
        settings.destination,
        LogDestination::Terminal | LogDestination::Both
    );
    let to_file = matches!(
        settings.destination,
        LogDestination::File | LogDestination::Both
    );

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if to_terminal {
        loggers.push(TermLogger::new(
            settings.level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if to_file {
        match File::create(&settings.file) {
            Ok(file) => loggers.push(WriteLogger::new(settings.level, config, file)),
            Err(err) => eprintln!(
                "Warning: could not create log file {}: {err}",
                settings.file.display()
            ),
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config(ignored_targets: &[&'static str]) -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in ignored_targets {
        builder.add_filter_ignore_str(*target);
    }
    builder.build()
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use triage_engine::{parse_endpoint, ClassifierSettings, DEFAULT_ENDPOINT};

use super::logging::{LogDestination, LogSettings};

/// HTTP stack targets that are silenced unless `--log-transport` is given.
const TRANSPORT_TARGETS: [&str; 5] = ["hyper", "hyper_util", "h2", "rustls", "reqwest"];

#[derive(Parser, Debug)]
#[command(name = "triage", version)]
#[command(about = "Classify emails as productive or unproductive and draft a reply", long_about = None)]
pub struct Cli {
    /// Classification endpoint (multipart POST)
    #[arg(long, env = "TRIAGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Connect timeout in seconds (transport default when unset)
    #[arg(long, value_name = "SECS")]
    pub connect_timeout_secs: Option<u64>,

    /// Whole-request timeout in seconds (transport default when unset)
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Largest accepted response body
    #[arg(long, value_name = "BYTES", default_value_t = 1024 * 1024)]
    pub max_response_bytes: u64,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file used by the file destination
    #[arg(long, value_name = "PATH", default_value = "triage.log")]
    pub log_file: PathBuf,

    /// Keep log records from the HTTP stack
    #[arg(long)]
    pub log_transport: bool,

    /// Classify this text once and exit
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Classify this .txt/.pdf file once and exit
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the one-shot result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Input for non-interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    Text(String),
    File(PathBuf),
}

impl Cli {
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: self.log,
            level: self.log_level.into(),
            file: self.log_file.clone(),
            ignored_targets: if self.log_transport {
                Vec::new()
            } else {
                TRANSPORT_TARGETS.to_vec()
            },
        }
    }

    pub fn classifier_settings(&self) -> anyhow::Result<ClassifierSettings> {
        parse_endpoint(&self.endpoint)
            .with_context(|| format!("invalid --endpoint {}", self.endpoint))?;
        Ok(ClassifierSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
        })
    }

    pub fn one_shot(&self) -> anyhow::Result<Option<OneShot>> {
        match (&self.text, &self.file) {
            (Some(text), None) => Ok(Some(OneShot::Text(text.clone()))),
            (None, Some(path)) => Ok(Some(OneShot::File(path.clone()))),
            (None, None) if self.json => bail!("--json needs --text or --file"),
            (None, None) => Ok(None),
            (Some(_), Some(_)) => bail!("--text and --file are mutually exclusive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_timeouts_unset() {
        let cli = Cli::parse_from(["triage"]);
        let settings = cli.classifier_settings().unwrap();

        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
        assert_eq!(cli.one_shot().unwrap(), None);
        assert_eq!(cli.log, LogDestination::File);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Info);
    }

    #[test]
    fn one_shot_text() {
        let cli = Cli::parse_from([
            "triage",
            "--endpoint",
            "http://localhost:8000/api/classify",
            "--request-timeout-secs",
            "30",
            "--text",
            "Bom dia",
        ]);

        assert_eq!(
            cli.one_shot().unwrap(),
            Some(OneShot::Text("Bom dia".to_string()))
        );
        assert_eq!(
            cli.classifier_settings().unwrap().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn transport_logs_are_silenced_by_default() {
        let quiet = Cli::parse_from(["triage"]).log_settings();
        assert_eq!(quiet.file, PathBuf::from("triage.log"));
        assert!(quiet.ignored_targets.contains(&"hyper"));
        assert!(quiet.ignored_targets.contains(&"rustls"));

        let verbose = Cli::parse_from([
            "triage",
            "--log",
            "both",
            "--log-level",
            "trace",
            "--log-file",
            "/tmp/triage-debug.log",
            "--log-transport",
        ])
        .log_settings();
        assert_eq!(verbose.destination, LogDestination::Both);
        assert_eq!(verbose.level, LevelFilter::Trace);
        assert_eq!(verbose.file, PathBuf::from("/tmp/triage-debug.log"));
        assert!(verbose.ignored_targets.is_empty());
    }

    #[test]
    fn text_and_file_conflict() {
        assert!(Cli::try_parse_from(["triage", "--text", "a", "--file", "b.txt"]).is_err());
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let cli = Cli::parse_from(["triage", "--endpoint", "mailto:someone@example.com"]);
        assert!(cli.classifier_settings().is_err());
    }
}

//! Arguments and setup shared between the run and report commands.

use crate::Result;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::{IntoAppError, app_err};
use std::io::IsTerminal;

/// Record name used when `--name` is not given.
pub const DEFAULT_RECORD_NAME: &str = "default";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether to color output written to a stream with the given terminal status.
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal,
        }
    }

    #[must_use]
    pub fn for_stdout(self) -> bool {
        self.enabled(std::io::stdout().is_terminal())
    }

    #[must_use]
    pub fn for_stderr(self) -> bool {
        self.enabled(std::io::stderr().is_terminal())
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    const fn filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Error => Some("error"),
            Self::Warn => Some("warn"),
            Self::Info => Some("info"),
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Arguments naming a record and where its files live
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Name of the record; also the prefix of every report file
    #[arg(long, short = 'n', value_name = "NAME", default_value = DEFAULT_RECORD_NAME)]
    pub name: String,

    /// Directory where records are stored (default is the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<Utf8PathBuf>,

    /// Directory where CSV reports are written
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub output_dir: Utf8PathBuf,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl RecordArgs {
    /// The record directory: `--data-dir` if given, otherwise `lang-rank` under the platform data directory.
    pub fn resolve_data_dir(&self) -> Result<Utf8PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let base = BaseDirs::new().into_app_err("could not determine data directory")?;
        let dir = base.data_dir().join("lang-rank");
        Utf8PathBuf::from_path_buf(dir).map_err(|path| app_err!("data directory '{}' is not valid UTF-8", path.display()))
    }

    /// Reject record names that would escape the data directory.
    pub fn validate_name(&self) -> Result<()> {
        let name = self.name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(app_err!("invalid record name '{name}'"));
        }
        Ok(())
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let Some(level) = log_level.filter() else {
        return;
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a second command in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

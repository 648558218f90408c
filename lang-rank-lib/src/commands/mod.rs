//! Command-line interface and orchestration for lang-rank
//!
//! This module implements the CLI commands and wires configuration, the search client, the
//! record store, and the report generators together.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **run**: Load or create the named record, fetch every missing or failed count (baseline
//!   first, then each keyword), then print a summary and write one CSV per keyword
//! - **report**: Render the summary and CSV files of an existing record without fetching
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and that its language source is usable
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Record commands share the `RecordArgs` flags (name, data directory, report
//! directory, color, log level). Console output goes through [`Host`] so tests can capture it.

mod common;
mod host;
mod init;
mod progress_reporter;
mod report;
mod run;
mod update;
mod validate;

pub use common::{ColorMode, DEFAULT_RECORD_NAME, LogLevel, RecordArgs};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use report::{ReportArgs, report_record};
pub use run::run;
pub use update::{RunArgs, update_record};
pub use validate::{ValidateArgs, validate_config};

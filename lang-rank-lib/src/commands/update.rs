use super::common::{LogLevel, RecordArgs, init_logging};
use super::report::render;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::config::Config;
use crate::enumeration::Driver;
use crate::record::{JsonFileStore, RecordStore};
use crate::search::Client;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;
use tick::Clock;

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Path to configuration file (default is `lang-rank.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Update the record without writing CSV reports
    #[arg(long)]
    pub no_report: bool,
}

/// Bring the named record up to date, then render its reports.
///
/// An interrupted run leaves every completed lookup in the record, so running again resumes
/// where the last run stopped.
pub async fn update_record<H: Host>(host: &mut H, args: &RunArgs) -> Result<()> {
    init_logging(args.record.log_level);
    args.record.validate_name()?;

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let data_dir = args.record.resolve_data_dir()?;

    let mut store = JsonFileStore::open(&data_dir, &args.record.name)?;
    let mut record = store.load_or_init(true)?;

    let client = Client::new(args.github_token.as_deref(), config.api_base_url.clone())?;

    // log lines and a redrawn bar do not mix
    let reporter = ProgressReporter::new(args.record.log_level == LogLevel::None, args.record.color.for_stderr());

    let driver = Driver::new(&config, Clock::new_tokio(), client, config.language_source(), reporter);
    let summary = driver.run(&mut record, &mut store).await?;

    let _ = writeln!(
        host.output(),
        "Record '{}': {} fetched, {} already known, {} failed, {} approximate",
        args.record.name,
        summary.fetched,
        summary.skipped,
        summary.failed,
        summary.approximate
    );
    if summary.invalidated > 0 {
        let _ = writeln!(
            host.output(),
            "{} keyword result(s) were reset because their baseline lookup had failed",
            summary.invalidated
        );
    }

    render(host, &record, &args.record, !args.no_report)
}

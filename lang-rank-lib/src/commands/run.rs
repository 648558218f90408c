//! Command dispatch logic for lang-rank

use super::{InitArgs, ReportArgs, RunArgs, ValidateArgs, init_config, report_record, update_record, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "lang-rank", version, author, long_about = None)]
#[command(about = "Rank programming languages by GitHub repository counts per topic")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: LangRankSubcommand,
}

#[derive(Subcommand, Debug)]
enum LangRankSubcommand {
    /// Fetch missing repository counts, resuming any earlier run, and generate reports
    Run(Box<RunArgs>),
    /// Generate reports from an existing record without fetching
    Report(ReportArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        LangRankSubcommand::Run(run_args) => update_record(host, run_args).await,
        LangRankSubcommand::Report(report_args) => report_record(host, report_args),
        LangRankSubcommand::Init(init_args) => init_config(host, init_args),
        LangRankSubcommand::Validate(validate_args) => validate_config(host, validate_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::{ColorMode, DEFAULT_RECORD_NAME, LogLevel};
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["lang-rank", "run"]).unwrap();
        let LangRankSubcommand::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };

        assert_eq!(args.record.name, DEFAULT_RECORD_NAME);
        assert_eq!(args.record.output_dir, ".");
        assert_eq!(args.record.color, ColorMode::Auto);
        assert_eq!(args.record.log_level, LogLevel::None);
        assert!(args.record.data_dir.is_none());
        assert!(!args.no_report);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "lang-rank",
            "run",
            "--name",
            "survey",
            "--data-dir",
            "/tmp/data",
            "--output-dir",
            "/tmp/out",
            "--github-token",
            "secret",
            "--no-report",
            "--color",
            "never",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let LangRankSubcommand::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };

        assert_eq!(args.record.name, "survey");
        assert_eq!(args.record.data_dir.as_deref().map(camino::Utf8Path::as_str), Some("/tmp/data"));
        assert_eq!(args.record.output_dir, "/tmp/out");
        assert_eq!(args.github_token.as_deref(), Some("secret"));
        assert!(args.no_report);
        assert_eq!(args.record.color, ColorMode::Never);
        assert_eq!(args.record.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_report_rejects_run_only_flags() {
        assert!(Cli::try_parse_from(["lang-rank", "report", "--no-report"]).is_err());
        assert!(Cli::try_parse_from(["lang-rank", "report", "--name", "survey"]).is_ok());
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["lang-rank", "fetch"]).is_err());
    }
}

use super::Host;
use super::common::{RecordArgs, init_logging};
use crate::Result;
use crate::record::{JsonFileStore, Record, RecordStore};
use crate::reports::{generate_console, write_reports};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub record: RecordArgs,
}

/// Render the reports of an existing record without fetching anything.
pub fn report_record<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.record.log_level);
    args.record.validate_name()?;

    let data_dir = args.record.resolve_data_dir()?;
    let mut store = JsonFileStore::open(&data_dir, &args.record.name)?;
    let record = store.load_or_init(false)?;

    render(host, &record, &args.record, true)
}

/// Print the console summary and, when `write_csv` is set, write one CSV file per keyword.
pub(super) fn render<H: Host>(host: &mut H, record: &Record, args: &RecordArgs, write_csv: bool) -> Result<()> {
    let mut console_output = String::new();
    generate_console(record, args.color.for_stdout(), &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");

    if write_csv {
        let written = write_reports(record, &args.output_dir, &args.name)?;
        for path in &written {
            let _ = writeln!(host.output(), "Wrote {path}");
        }
    }

    Ok(())
}

use super::ranking::RankedRow;
use crate::Result;
use ohno::IntoAppError;
use std::io::Write;

const HEADER: [&str; 4] = ["position", "language", "repos_count", "ratio"];

/// Write ranked rows as CSV with a header line and CRLF line terminators.
pub fn generate<W: Write>(rows: &[RankedRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().terminator(csv::Terminator::CRLF).from_writer(writer);

    csv_writer.write_record(HEADER).into_app_err("writing CSV header")?;

    for row in rows {
        csv_writer
            .write_record([
                row.position.to_string(),
                row.language.clone(),
                row.repos_count.to_string(),
                format_ratio(row.ratio),
            ])
            .into_app_err_with(|| format!("writing CSV row for language '{}'", row.language))?;
    }

    csv_writer.flush().into_app_err("flushing CSV output")?;
    Ok(())
}

/// Decimal rendering that always carries a fractional part, so `0` reads as `0.0`.
fn format_ratio(ratio: f64) -> String {
    let text = ratio.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

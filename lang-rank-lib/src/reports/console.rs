use crate::Result;
use crate::record::{KeywordKey, Record};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Completeness counters for one keyword's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySummary {
    pub key: KeywordKey,
    pub entries: usize,
    pub exact: usize,
    pub approximate: usize,
    pub failed: usize,
}

/// Tally every keyword in the record, baseline first.
#[must_use]
pub fn summarize(record: &Record) -> Vec<KeySummary> {
    record
        .data
        .iter()
        .map(|(key, results)| {
            let mut summary = KeySummary {
                key: key.clone(),
                entries: results.len(),
                exact: 0,
                approximate: 0,
                failed: 0,
            };

            for result in results.values() {
                if result.is_failed() {
                    summary.failed += 1;
                } else if result.is_exact() {
                    summary.exact += 1;
                } else {
                    summary.approximate += 1;
                }
            }

            summary
        })
        .collect()
}

pub fn generate<W: Write>(record: &Record, use_colors: bool, writer: &mut W) -> Result<()> {
    let summaries = summarize(record);
    if summaries.is_empty() {
        writeln!(writer, "No results recorded yet")?;
        return Ok(());
    }

    let labels: Vec<String> = summaries.iter().map(|s| s.key.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0).max("Keyword".len());

    let header = format!("{:<width$}  {:>7}  {:>7}  {:>11}  {:>7}", "Keyword", "Entries", "Exact", "Approximate", "Failed");
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    for (summary, label) in summaries.iter().zip(&labels) {
        let failed = format!("{:>7}", summary.failed);
        let failed = if use_colors && summary.failed > 0 {
            failed.red().bold().to_string()
        } else {
            failed
        };

        writeln!(
            writer,
            "{label:<width$}  {:>7}  {:>7}  {:>11}  {failed}",
            summary.entries, summary.exact, summary.approximate
        )?;
    }

    let failed_total: usize = summaries.iter().map(|s| s.failed).sum();
    if failed_total > 0 {
        let note = format!("{failed_total} lookup(s) failed and will be retried on the next run");
        if use_colors {
            writeln!(writer, "\n{}", note.yellow())?;
        } else {
            writeln!(writer, "\n{note}")?;
        }
    }

    Ok(())
}

//! Report generation for a record
//!
//! Two outputs are produced from the same [`Record`]:
//!
//! - **CSV**: one file per keyword, `<name>_<slug>.csv`, ranking languages by repository count
//!   with the ratio against the baseline count for the same language.
//! - **Console**: a per-keyword summary of how many entries are exact, approximate, or failed,
//!   so an operator can tell whether another run is needed.
//!
//! Ranking is shared through [`rank`]. A partially enumerated record renders without error;
//! missing baseline entries yield a ratio of `0.0`.

mod console;
mod csv;
mod ranking;

pub use self::console::{KeySummary, generate as generate_console, summarize};
pub use self::csv::generate as generate_csv;
pub use self::ranking::{RankedRow, rank};

use crate::Result;
use crate::record::{KeywordKey, Record};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::fs;
use std::io::BufWriter;

const LOG_TARGET: &str = "   reports";

/// The report file name for one keyword of record `name`.
#[must_use]
pub fn report_file_name(name: &str, key: &KeywordKey) -> String {
    format!("{name}_{}.csv", key.slug())
}

/// Write one CSV file per keyword of `record` into `output_dir`, creating the directory if needed.
///
/// Returns the paths written, baseline first.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be created or written
pub fn write_reports(record: &Record, output_dir: &Utf8Path, name: &str) -> Result<Vec<Utf8PathBuf>> {
    fs::create_dir_all(output_dir).into_app_err_with(|| format!("creating report directory '{output_dir}'"))?;

    let mut written = Vec::with_capacity(record.data.len());
    for key in record.data.keys() {
        let path = output_dir.join(report_file_name(name, key));
        let rows = rank(record, key);

        let file = fs::File::create(&path).into_app_err_with(|| format!("creating report file '{path}'"))?;
        generate_csv(&rows, BufWriter::new(file)).into_app_err_with(|| format!("writing report file '{path}'"))?;

        log::info!(target: LOG_TARGET, "Wrote {} row(s) for {key} to '{path}'", rows.len());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CountResult, ResultMap};

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("languages", &KeywordKey::Baseline), "languages_all.csv");
        assert_eq!(
            report_file_name("languages", &KeywordKey::keyword("machine learning")),
            "languages_machine-learning.csv"
        );
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_reports() {
        let mut record = Record::default();
        let _ = record.data.insert(
            KeywordKey::Baseline,
            [
                ("Go".to_string(), CountResult::success(500, false)),
                ("C++".to_string(), CountResult::success(300, false)),
            ]
            .into_iter()
            .collect(),
        );
        let _ = record.data.insert(
            KeywordKey::keyword("web"),
            [
                ("Go".to_string(), CountResult::success(50, false)),
                ("C++".to_string(), CountResult::failed()),
            ]
            .into_iter()
            .collect(),
        );

        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().join("out")).unwrap();

        let written = write_reports(&record, &dir, "languages").unwrap();
        assert_eq!(written, vec![dir.join("languages_all.csv"), dir.join("languages_web.csv")]);

        let web = fs::read_to_string(dir.join("languages_web.csv")).unwrap();
        assert_eq!(web, "position,language,repos_count,ratio\r\n1,Go,50,0.1\r\n2,C++,0,0.0\r\n");

        let all = fs::read_to_string(dir.join("languages_all.csv")).unwrap();
        assert_eq!(all, "position,language,repos_count,ratio\r\n1,Go,500,1.0\r\n2,C++,300,1.0\r\n");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_reports_empty_record() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert!(write_reports(&Record::default(), &dir, "languages").unwrap().is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_write_reports_error_names_the_file() {
        let mut record = Record::default();
        let _ = record.data.insert(KeywordKey::Baseline, ResultMap::new());

        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let blocked = dir.join("languages_all.csv");
        fs::create_dir(&blocked).unwrap();

        let err = write_reports(&record, &dir, "languages").unwrap_err();
        assert!(err.to_string().contains(&format!("creating report file '{blocked}'")), "unexpected error: {err}");
    }
}

use crate::record::{CountResult, KeywordKey, Record};

/// One line of a keyword's ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    /// 1-based rank within the keyword
    pub position: usize,
    pub language: String,
    pub repos_count: u64,

    /// `repos_count` divided by the baseline count for the same language
    pub ratio: f64,
}

/// Rank every language recorded for `key` by descending repository count.
///
/// Ties keep alphabetical order. Failed entries rank with their zero count. The ratio is `0.0`
/// when the language has no baseline entry or a baseline count of zero.
#[must_use]
pub fn rank(record: &Record, key: &KeywordKey) -> Vec<RankedRow> {
    let Some(results) = record.data.get(key) else {
        return Vec::new();
    };

    let baseline = record.baseline();

    // result maps iterate alphabetically, and the sort is stable
    let mut entries: Vec<(&String, u64)> = results.iter().map(|(language, result)| (language, result.count())).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (language, repos_count))| {
            let baseline_count = baseline.and_then(|b| b.get(language)).map_or(0, CountResult::count);
            RankedRow {
                position: index + 1,
                language: language.clone(),
                repos_count,
                ratio: ratio(repos_count, baseline_count),
            }
        })
        .collect()
}

#[expect(clippy::cast_precision_loss, reason = "repository counts are far below 2^52")]
fn ratio(count: u64, baseline_count: u64) -> f64 {
    if baseline_count == 0 {
        0.0
    } else {
        count as f64 / baseline_count as f64
    }
}

use super::{Observer, RetryingFetcher};
use crate::Result;
use crate::record::{KeywordKey, RecordData, RecordStore, RecordUpdate, ResultMap};
use crate::search::SearchBackend;

/// Counters for one keyword's enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Languages looked up during this pass, whether the lookup succeeded or not.
    pub fetched: usize,

    /// Languages that already had a usable result.
    pub skipped: usize,

    /// Lookups that exhausted their retries.
    pub failed: usize,

    /// Lookups that succeeded with an approximate count.
    pub approximate: usize,
}

/// Whether `language` still needs a lookup: it is missing, or its previous lookup failed.
#[must_use]
pub fn needs_fetch(results: Option<&ResultMap>, language: &str) -> bool {
    !results.and_then(|map| map.get(language)).is_some_and(|result| !result.is_failed())
}

/// Fill in `data[key]` for every language in ranked order.
///
/// Languages with a successful result are left alone, so re-running after an interruption
/// picks up where the previous run stopped. After each lookup the result is stored and the
/// whole of `data` is checkpointed before the next lookup starts.
pub async fn enumerate<B, O, S>(
    fetcher: &RetryingFetcher<B>,
    observer: &O,
    key: &KeywordKey,
    languages: &[String],
    data: &mut RecordData,
    store: &mut S,
) -> Result<BatchStats>
where
    B: SearchBackend,
    O: Observer + ?Sized,
    S: RecordStore,
{
    let pending = languages.iter().filter(|language| needs_fetch(data.get(key), language)).count();
    observer.keyword_started(key, languages.len(), pending);

    let mut stats = BatchStats::default();

    for language in languages {
        if !needs_fetch(data.get(key), language) {
            stats.skipped += 1;
            continue;
        }

        let result = fetcher.fetch(key, language).await;
        let _ = data.entry(key.clone()).or_default().insert(language.clone(), result);

        stats.fetched += 1;
        if result.is_failed() {
            stats.failed += 1;
        } else if !result.is_exact() {
            stats.approximate += 1;
        }

        observer.outcome(key, language, &result);
        store.persist(RecordUpdate::Data(data))?;
    }

    Ok(stats)
}

use super::batch::{BatchStats, enumerate};
use super::invalidate::invalidate;
use super::{LOG_TARGET, LanguageSource, Observer, RetryingFetcher};
use crate::Result;
use crate::config::Config;
use crate::record::{KeywordKey, Record, RecordStore, RecordUpdate};
use crate::search::SearchBackend;
use ohno::bail;
use tick::Clock;

/// Totals for a whole run across all keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: usize,
    pub approximate: usize,

    /// Keyword entries reset because their baseline lookup had failed.
    pub invalidated: usize,
}

impl RunSummary {
    const fn absorb(&mut self, stats: BatchStats) {
        self.fetched += stats.fetched;
        self.skipped += stats.skipped;
        self.failed += stats.failed;
        self.approximate += stats.approximate;
    }
}

/// Runs the keyword loop over a record: the baseline first, then every configured keyword.
#[derive(Debug)]
pub struct Driver<B, L, O> {
    fetcher: RetryingFetcher<B>,
    language_source: L,
    observer: O,
    keywords: Vec<String>,
    language_limit: usize,
}

impl<B, L, O> Driver<B, L, O>
where
    B: SearchBackend,
    L: LanguageSource,
    O: Observer,
{
    /// Build a driver whose retry delays and timeouts run on `clock`.
    pub fn new(config: &Config, clock: Clock, backend: B, language_source: L, observer: O) -> Self {
        Self {
            fetcher: RetryingFetcher::new(backend, config.retry_policy(), clock),
            language_source,
            observer,
            keywords: config.keywords.clone(),
            language_limit: config.language_limit,
        }
    }

    /// The keys in the order they are enumerated.
    #[must_use]
    pub fn keys(&self) -> Vec<KeywordKey> {
        core::iter::once(KeywordKey::Baseline)
            .chain(self.keywords.iter().map(KeywordKey::keyword))
            .collect()
    }

    /// Bring `record` up to date, checkpointing every change through `store`.
    ///
    /// Lookups that keep failing are recorded as failed rather than reported as errors; only
    /// language list and store failures end the run early.
    pub async fn run<S: RecordStore>(&self, record: &mut Record, store: &mut S) -> Result<RunSummary> {
        let languages = self.languages(record, store).await?;
        let mut summary = RunSummary::default();

        for key in self.keys() {
            if key.is_baseline() {
                let _ = record.data.entry(key.clone()).or_default();
            } else {
                let mut target = record.data.remove(&key).unwrap_or_default();
                let marked = record.baseline().map_or(0, |baseline| invalidate(baseline, &mut target));
                let _ = record.data.insert(key.clone(), target);

                if marked > 0 {
                    log::info!(target: LOG_TARGET, "Invalidated {marked} result(s) for {key} with a failed baseline");
                }
                summary.invalidated += marked;

                store.persist(RecordUpdate::Data(&record.data))?;
            }

            let stats = enumerate(&self.fetcher, &self.observer, &key, &languages, &mut record.data, store).await?;
            log::debug!(
                target: LOG_TARGET,
                "Finished {key}: {} fetched, {} skipped, {} failed",
                stats.fetched,
                stats.skipped,
                stats.failed
            );
            summary.absorb(stats);
        }

        self.observer.done();

        log::info!(
            target: LOG_TARGET,
            "Run complete: {} fetched, {} already known, {} failed, {} approximate, {} invalidated",
            summary.fetched,
            summary.skipped,
            summary.failed,
            summary.approximate,
            summary.invalidated
        );

        Ok(summary)
    }

    /// The record's language list, acquiring and persisting it the first time.
    async fn languages<S: RecordStore>(&self, record: &mut Record, store: &mut S) -> Result<Vec<String>> {
        if let Some(languages) = &record.languages {
            return Ok(languages.clone());
        }

        let languages = self.language_source.top_languages(self.language_limit).await?;
        if languages.is_empty() {
            bail!("no languages to enumerate");
        }

        log::info!(target: LOG_TARGET, "Acquired {} ranked languages", languages.len());
        store.persist(RecordUpdate::Languages(&languages))?;
        record.languages = Some(languages.clone());
        Ok(languages)
    }
}

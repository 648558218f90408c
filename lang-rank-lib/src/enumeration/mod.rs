//! Resumable enumeration of repository counts
//!
//! The [`Driver`] walks every keyword, baseline first, and fills the record's result maps one
//! language at a time:
//!
//! - [`RetryingFetcher`] performs one throttled lookup with bounded retries and always yields a
//!   [`CountResult`](crate::record::CountResult), failed or not.
//! - [`enumerate`] skips languages that already have a successful result and checkpoints the
//!   record after every terminal outcome.
//! - [`invalidate`] resets a keyword's entries wherever the baseline lookup failed, so no ratio
//!   is ever computed against an unknown denominator.
//!
//! Failed lookups are data, not errors: they are recorded and retried on the next run. Only a
//! missing language list or a failing store aborts a run.

mod batch;
mod driver;
mod fetcher;
mod invalidate;
mod language_source;
mod observer;

#[cfg(test)]
mod test_support;

pub use batch::{BatchStats, enumerate, needs_fetch};
pub use driver::{Driver, RunSummary};
pub use fetcher::{DEFAULT_REQUEST_DELAY, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_LIMIT, RetryPolicy, RetryingFetcher};
pub use invalidate::invalidate;
pub use language_source::{ConfiguredLanguages, LanguageSource};
pub use observer::{NoOpObserver, Observer};

const LOG_TARGET: &str = " enumerate";

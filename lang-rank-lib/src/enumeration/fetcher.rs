use crate::Result;
use crate::record::{CountResult, KeywordKey};
use crate::search::{SearchBackend, SearchCount, encode};
use core::time::Duration;
use layered::{Service, Stack};
use ohno::app_err;
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use tick::Clock;

use super::LOG_TARGET;

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRY_LIMIT: u32 = 2;

/// Default pause after every request, sized for the unauthenticated search rate limit.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(8);

/// Default bound on a single search request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// How often to retry a lookup, how long to pause after each attempt, and how long one
/// attempt may take before it counts as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_limit: u32,
    pub delay: Duration,
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Total attempts made before a lookup is recorded as failed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retry_limit.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_limit: DEFAULT_RETRY_LIMIT,
            delay: DEFAULT_REQUEST_DELAY,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// One search, as handed to the resilience pipeline.
#[derive(Debug, Clone)]
struct Lookup {
    keyword: Option<String>,
    language_token: String,
}

/// Adapts a [`SearchBackend`] to the innermost service of the pipeline.
struct BackendService<'a, B> {
    backend: &'a B,
}

impl<B: SearchBackend> Service<Lookup> for BackendService<'_, B> {
    type Out = Result<SearchCount>;

    async fn execute(&self, lookup: Lookup) -> Self::Out {
        self.backend
            .count_repositories(lookup.keyword.as_deref(), &lookup.language_token)
            .await
    }
}

/// Every failure is worth another attempt, timeouts included.
fn classify(result: &Result<SearchCount>) -> RecoveryInfo {
    if result.is_ok() {
        RecoveryInfo::never()
    } else {
        RecoveryInfo::retry()
    }
}

/// Counts repositories for one (keyword, language) pair with bounded, throttled retries.
///
/// The delay is paid after every attempt, including a successful one, so consecutive lookups
/// never hit the search service faster than the policy allows. Retries wait the delay between
/// attempts; the delay after the final attempt is taken once the pipeline returns.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<B> {
    backend: B,
    policy: RetryPolicy,
    clock: Clock,
}

impl<B: SearchBackend> RetryingFetcher<B> {
    pub const fn new(backend: B, policy: RetryPolicy, clock: Clock) -> Self {
        Self { backend, policy, clock }
    }

    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Look up the repository count, returning a failed result once every attempt has failed.
    pub async fn fetch(&self, key: &KeywordKey, language: &str) -> CountResult {
        let max_attempts = self.policy.max_attempts();
        let label = format!("{key} in {language}");
        let context = ResilienceContext::new(&self.clock).name("search");

        let service = (
            Retry::layer("retry", &context)
                .clone_input()
                .recovery_with(|result: &Result<SearchCount>, _| classify(result))
                .max_retry_attempts(self.policy.retry_limit)
                .base_delay(self.policy.delay)
                .backoff(Backoff::Constant)
                .use_jitter(false)
                .on_retry(move |output, args| {
                    if let Err(e) = output {
                        log::debug!(
                            target: LOG_TARGET,
                            "Attempt {}/{max_attempts} for {label} failed, retrying in {}ms: {e:#}",
                            args.attempt().index() + 1,
                            args.retry_delay().as_millis()
                        );
                    }
                }),
            Timeout::layer("timeout", &context)
                .timeout_error(|args| app_err!("search request timed out after {}s", args.timeout().as_secs_f64()))
                .timeout(self.policy.timeout),
            BackendService { backend: &self.backend },
        ).into_service();

        let outcome = service
            .execute(Lookup {
                keyword: key.as_filter().map(str::to_string),
                language_token: encode(language),
            })
            .await;
        self.clock.delay(self.policy.delay).await;

        match outcome {
            Ok(count) => {
                if count.incomplete_results {
                    log::debug!(target: LOG_TARGET, "Count for {key} in {language} is approximate");
                }
                CountResult::success(count.total_count, count.incomplete_results)
            }
            Err(e) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Could not count repositories for {key} in {language} after {max_attempts} attempts: {e:#}"
                );
                CountResult::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::test_support::instant_clock;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Stalls, then fails, a fixed number of times before reporting a count.
    struct FlakyBackend {
        stalls: u32,
        failures: u32,
        calls: AtomicU32,
        count: SearchCount,
        seen: Mutex<Vec<(Option<String>, String)>>,
    }

    impl FlakyBackend {
        fn new(failures: u32, total_count: u64, incomplete_results: bool) -> Self {
            Self {
                stalls: 0,
                failures,
                calls: AtomicU32::new(0),
                count: SearchCount {
                    total_count,
                    incomplete_results,
                },
                seen: Mutex::new(Vec::new()),
            }
        }

        /// The first `stalls` calls never answer.
        const fn stalling(mut self, stalls: u32) -> Self {
            self.stalls = stalls;
            self
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SearchBackend for &FlakyBackend {
        async fn count_repositories(&self, keyword: Option<&str>, language_token: &str) -> Result<SearchCount> {
            self.seen
                .lock()
                .unwrap()
                .push((keyword.map(str::to_string), language_token.to_string()));
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.stalls {
                core::future::pending::<()>().await;
            }
            if call < self.stalls.saturating_add(self.failures) {
                Err(app_err!("transient failure {call}"))
            } else {
                Ok(self.count)
            }
        }
    }

    const POLICY: RetryPolicy = RetryPolicy {
        retry_limit: 2,
        delay: Duration::from_secs(8),
        timeout: Duration::from_secs(60),
    };

    #[tokio::test]
    async fn test_success_on_first_attempt_still_waits() {
        let backend = FlakyBackend::new(0, 500, false);
        let clock = instant_clock();
        let fetcher = RetryingFetcher::new(&backend, POLICY, clock.clone());

        let start = clock.instant();
        let result = fetcher.fetch(&KeywordKey::Baseline, "Go").await;

        assert_eq!(result, CountResult::success(500, false));
        assert_eq!(backend.calls(), 1);
        assert_eq!(clock.instant() - start, POLICY.delay);
    }

    #[tokio::test]
    async fn test_success_after_retry_limit_failures() {
        let backend = FlakyBackend::new(POLICY.retry_limit, 42, false);
        let clock = instant_clock();
        let fetcher = RetryingFetcher::new(&backend, POLICY, clock.clone());

        let start = clock.instant();
        let result = fetcher.fetch(&KeywordKey::keyword("web"), "Go").await;

        assert_eq!(result, CountResult::success(42, false));
        assert_eq!(backend.calls(), POLICY.max_attempts());
        assert_eq!(clock.instant() - start, POLICY.delay * POLICY.max_attempts());
    }

    #[tokio::test]
    async fn test_always_failing_backend() {
        let backend = FlakyBackend::new(u32::MAX, 0, false);
        let clock = instant_clock();
        let fetcher = RetryingFetcher::new(&backend, POLICY, clock.clone());

        let start = clock.instant();
        let result = fetcher.fetch(&KeywordKey::keyword("web"), "C++").await;

        assert_eq!(result, CountResult::failed());
        assert_eq!(backend.calls(), POLICY.retry_limit + 1);
        assert_eq!(clock.instant() - start, POLICY.delay * (POLICY.retry_limit + 1));
    }

    #[tokio::test]
    async fn test_stalled_attempt_times_out_and_is_retried() {
        let backend = FlakyBackend::new(0, 77, false).stalling(1);
        let clock = instant_clock();
        let fetcher = RetryingFetcher::new(&backend, POLICY, clock.clone());

        let start = clock.instant();
        let result = fetcher.fetch(&KeywordKey::keyword("iot"), "Rust").await;

        assert_eq!(result, CountResult::success(77, false));
        assert_eq!(backend.calls(), 2);
        assert_eq!(clock.instant() - start, POLICY.timeout + POLICY.delay * 2);
    }

    #[tokio::test]
    async fn test_backend_that_never_answers_fails_after_every_attempt_times_out() {
        let backend = FlakyBackend::new(0, 1, false).stalling(u32::MAX);
        let clock = instant_clock();
        let fetcher = RetryingFetcher::new(&backend, POLICY, clock.clone());

        let start = clock.instant();
        let result = fetcher.fetch(&KeywordKey::Baseline, "Go").await;

        assert!(result.is_failed());
        assert_eq!(backend.calls(), POLICY.max_attempts());
        assert_eq!(
            clock.instant() - start,
            (POLICY.timeout + POLICY.delay) * POLICY.max_attempts()
        );
    }

    #[tokio::test]
    async fn test_approximate_count_is_not_retried() {
        let backend = FlakyBackend::new(0, 1_000_000, true);
        let fetcher = RetryingFetcher::new(&backend, POLICY, instant_clock());

        let result = fetcher.fetch(&KeywordKey::Baseline, "JavaScript").await;

        assert_eq!(result, CountResult::success(1_000_000, true));
        assert!(!result.is_exact());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_retry_limit_makes_one_attempt() {
        let backend = FlakyBackend::new(u32::MAX, 0, false);
        let policy = RetryPolicy {
            retry_limit: 0,
            delay: Duration::from_secs(1),
            ..RetryPolicy::default()
        };
        let fetcher = RetryingFetcher::new(&backend, policy, instant_clock());

        let result = fetcher.fetch(&KeywordKey::Baseline, "Go").await;

        assert!(result.is_failed());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_passes_encoded_language_and_keyword() {
        let backend = FlakyBackend::new(0, 1, false);
        let fetcher = RetryingFetcher::new(&backend, POLICY, instant_clock());

        let _ = fetcher.fetch(&KeywordKey::keyword("web server"), "C#").await;
        let _ = fetcher.fetch(&KeywordKey::Baseline, "Vim script").await;

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0], (Some("web server".to_string()), "csharp".to_string()));
        assert_eq!(seen[1], (None, "vim-script".to_string()));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retry_limit, 2);
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay, Duration::from_secs(8));
        assert_eq!(policy.timeout, Duration::from_secs(60));
    }
}

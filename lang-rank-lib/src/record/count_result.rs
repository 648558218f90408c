use serde::{Deserialize, Serialize};

/// The outcome of counting repositories for one (keyword, language) pair.
///
/// A failed result always carries a zero, inexact count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCountResult")]
pub struct CountResult {
    count: u64,
    exact: bool,
    failed: bool,
}

impl CountResult {
    /// A successful lookup. Approximate counts are still successes, recorded as inexact.
    #[must_use]
    pub const fn success(count: u64, approximate: bool) -> Self {
        Self {
            count,
            exact: !approximate,
            failed: false,
        }
    }

    /// A lookup that should be retried on the next enumeration.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            count: 0,
            exact: false,
            failed: true,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.exact
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }
}

/// Wire shape of [`CountResult`], normalized on the way in.
#[derive(Deserialize)]
struct RawCountResult {
    count: u64,
    #[serde(default)]
    exact: bool,
    #[serde(default)]
    failed: bool,
}

impl From<RawCountResult> for CountResult {
    fn from(raw: RawCountResult) -> Self {
        if raw.failed {
            Self::failed()
        } else {
            Self::success(raw.count, !raw.exact)
        }
    }
}

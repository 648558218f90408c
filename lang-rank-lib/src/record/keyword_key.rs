use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Identifies one result map within a record.
///
/// `Baseline` is the unfiltered search across all repositories, used as the denominator of
/// every keyword's ratios. It sorts before every keyword.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeywordKey {
    Baseline,
    Keyword(String),
}

impl KeywordKey {
    /// The string the baseline is stored under. Never accepted as a configured keyword.
    pub const BASELINE_SENTINEL: &'static str = "*";

    #[must_use]
    pub fn keyword(word: impl Into<String>) -> Self {
        Self::Keyword(word.into())
    }

    #[must_use]
    pub const fn is_baseline(&self) -> bool {
        matches!(self, Self::Baseline)
    }

    /// The keyword filter to search with, `None` for the baseline.
    #[must_use]
    pub fn as_filter(&self) -> Option<&str> {
        match self {
            Self::Baseline => None,
            Self::Keyword(word) => Some(word),
        }
    }

    /// Name fragment used for report files: `all` for the baseline, spaces replaced by hyphens otherwise.
    #[must_use]
    pub fn slug(&self) -> String {
        match self {
            Self::Baseline => "all".to_string(),
            Self::Keyword(word) => word.replace(' ', "-"),
        }
    }
}

impl From<String> for KeywordKey {
    fn from(value: String) -> Self {
        if value == Self::BASELINE_SENTINEL {
            Self::Baseline
        } else {
            Self::Keyword(value)
        }
    }
}

impl From<KeywordKey> for String {
    fn from(value: KeywordKey) -> Self {
        match value {
            KeywordKey::Baseline => KeywordKey::BASELINE_SENTINEL.to_string(),
            KeywordKey::Keyword(word) => word,
        }
    }
}

impl Display for KeywordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Baseline => write!(f, "all languages"),
            Self::Keyword(word) => write!(f, "'{word}'"),
        }
    }
}

use super::{CountResult, KeywordKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Results for one keyword, keyed by language display name.
pub type ResultMap = BTreeMap<String, CountResult>;

/// Results for every keyword, including the baseline.
pub type RecordData = BTreeMap<KeywordKey, ResultMap>;

/// The full persisted state of a ranking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Ranked language list, fetched once and reused by every later run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    #[serde(default)]
    pub data: RecordData,

    /// When the record was last checkpointed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// The baseline results, if the baseline has been started.
    #[must_use]
    pub fn baseline(&self) -> Option<&ResultMap> {
        self.data.get(&KeywordKey::Baseline)
    }

    /// Apply a partial update the way the store applies it.
    pub fn apply(&mut self, update: &RecordUpdate<'_>) {
        match update {
            RecordUpdate::Languages(languages) => self.languages = Some(languages.to_vec()),
            RecordUpdate::Data(data) => self.data.clone_from(data),
        }
    }
}

/// A partial update of a [`Record`], as sent to a checkpoint store.
#[derive(Debug, Clone, Copy)]
pub enum RecordUpdate<'a> {
    Languages(&'a [String]),
    Data(&'a RecordData),
}

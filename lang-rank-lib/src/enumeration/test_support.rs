//! Scripted collaborators shared by the enumeration tests.

use crate::Result;
use crate::record::{Record, RecordStore, RecordUpdate};
use crate::search::{SearchBackend, SearchCount, search_query};
use ohno::app_err;
use std::collections::HashMap;
use std::sync::Mutex;
use tick::{Clock, ClockControl};

/// A clock that jumps straight to the next timer, so delays and timeouts take no real time.
pub fn instant_clock() -> Clock {
    ClockControl::new().auto_advance_timers(true).to_clock()
}

/// Answers searches from a fixed table; unscripted searches always fail.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    counts: HashMap<String, SearchCount>,
    failures: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, keyword: Option<&str>, language_token: &str, total_count: u64) -> Self {
        self.with_count(keyword, language_token, total_count, false)
    }

    pub fn with_count(mut self, keyword: Option<&str>, language_token: &str, total_count: u64, incomplete_results: bool) -> Self {
        let _ = self.counts.insert(
            search_query(keyword, language_token),
            SearchCount {
                total_count,
                incomplete_results,
            },
        );
        self
    }

    /// Fail the search `times` times before answering with `total_count`.
    pub fn with_failures(self, keyword: Option<&str>, language_token: &str, times: u32, total_count: u64) -> Self {
        let _ = self
            .failures
            .lock()
            .unwrap()
            .insert(search_query(keyword, language_token), times);
        self.with(keyword, language_token, total_count)
    }

    /// Every query issued so far, one entry per attempt.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchBackend for &ScriptedBackend {
    async fn count_repositories(&self, keyword: Option<&str>, language_token: &str) -> Result<SearchCount> {
        let query = search_query(keyword, language_token);
        self.calls.lock().unwrap().push(query.clone());

        if let Some(remaining) = self.failures.lock().unwrap().get_mut(&query)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(app_err!("scripted failure for '{query}'"));
        }

        self.counts
            .get(&query)
            .copied()
            .ok_or_else(|| app_err!("no scripted response for '{query}'"))
    }
}

/// Keeps the record in memory and counts checkpoints.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Option<Record>,
    persists: usize,
    fail: bool,
}

impl MemoryStore {
    pub fn with_record(record: Record) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// A store whose every write fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub const fn persist_count(&self) -> usize {
        self.persists
    }

    pub fn record(&self) -> Record {
        self.record.clone().unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    fn load_or_init(&mut self, initialize: bool) -> Result<Record> {
        if self.record.is_none() && initialize {
            self.record = Some(Record::default());
        }
        self.record.clone().ok_or_else(|| app_err!("no record in memory"))
    }

    fn persist(&mut self, update: RecordUpdate<'_>) -> Result<()> {
        if self.fail {
            return Err(app_err!("store unavailable"));
        }

        self.record.get_or_insert_with(Record::default).apply(&update);
        self.persists += 1;
        Ok(())
    }
}

//! The persisted state of a ranking run
//!
//! A [`Record`] holds the ranked language list and one [`ResultMap`] per [`KeywordKey`]. It is
//! loaded once when a run starts and checkpointed through a [`RecordStore`] after every change,
//! so an interrupted run loses at most the lookup that was in flight.

mod count_result;
mod document;
mod keyword_key;
mod record_lock;
mod store;

pub use count_result::CountResult;
pub use document::{Record, RecordData, RecordUpdate, ResultMap};
pub use keyword_key::KeywordKey;
pub use store::{JsonFileStore, RecordStore};

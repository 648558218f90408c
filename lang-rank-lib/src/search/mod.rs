//! Remote repository search
//!
//! [`encode`] turns language display names into the tokens GitHub's `language:` qualifier
//! understands, and [`Client`] issues one repository search per call through the
//! [`SearchBackend`] trait. Retrying and throttling live one level up, in
//! [`crate::enumeration`].

mod client;
mod language_param;

pub use client::{Client, GITHUB_API_URL, RateLimitInfo, SearchBackend, SearchCount};
pub use language_param::{encode, search_query};

#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for lang-rank
//!
//! This library consolidates all functionality for the lang-rank tool, which counts public
//! GitHub repositories for every (keyword, language) pair and ranks languages per keyword.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Configuration file handling
//! - [`search`]: Language token encoding and the GitHub search client
//! - [`record`]: The persisted record and its checkpoint store
//! - [`enumeration`]: Retrying fetches, batch enumeration, and baseline invalidation
//! - [`reports`]: CSV and console report generation

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod config;
pub mod enumeration;
pub mod record;
pub mod reports;
pub mod search;

pub use crate::commands::{Host, run};

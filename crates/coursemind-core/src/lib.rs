//! # Coursemind Core
//!
//! Platform-independent library for hybrid course recommendation.
//!
//! This crate provides the data preparation, model building and ranking
//! algorithms used by the Coursemind front ends (CLI, MCP).
//!
//! ## Modules
//!
//! - [`dataset`] - Raw records, CSV loading and preprocessing
//! - [`recommend`] - Hybrid recommendation (TF-IDF content + cosine kNN collaborative)
//! - [`catalog`] - Course catalog providers and the same-category matcher
//! - [`strategy`] - Strategy selector shared by the front ends
//! - [`config`] - Production configuration constants
//! - [`error`] - Error types for datasets, recommendation and catalog access

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod recommend;
pub mod strategy;

pub use strategy::Strategy;

#[cfg(test)]
pub(crate) mod test_utils;

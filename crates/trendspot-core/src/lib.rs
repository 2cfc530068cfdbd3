//! Core types and trait definitions for the Trendspot curation store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Query, aggregation and export logic live here as pure functions so every
//! backend shares the same semantics.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod credential;
pub mod error;
pub mod export;
pub mod projection;
pub mod query;
pub mod seed;
pub mod store;
pub mod summary;
pub mod trend;

pub use error::{Classify, Error, ErrorKind, Result};

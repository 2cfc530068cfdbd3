//! The `TrendStore` and `AccountStore` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `trendspot-store-sqlite`). Higher layers (`trendspot-server`) depend on
//! these abstractions, not on any concrete backend.

use std::future::Future;

use crate::{
  Classify,
  account::Account,
  query::{QueryResult, TrendQuery},
  seed::default_trends,
  trend::{NewTrend, TrendRecord, VelocityHistoryEntry},
};

// ─── Trends ──────────────────────────────────────────────────────────────────

/// Abstraction over a trend store backend.
///
/// Every successful write appends exactly one velocity history entry, and
/// the record write and history append are applied atomically. Reads return
/// owned snapshots.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TrendStore: Send + Sync {
  type Error: Classify + std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create the trend, or replace every field of the existing one with the
  /// same name except `created_at`.
  fn upsert(
    &self,
    trend: NewTrend,
  ) -> impl Future<Output = Result<TrendRecord, Self::Error>> + Send + '_;

  /// Like [`upsert`](Self::upsert), but fails with a not-found error (and
  /// writes nothing) if no trend with this name exists.
  fn update(
    &self,
    trend: NewTrend,
  ) -> impl Future<Output = Result<TrendRecord, Self::Error>> + Send + '_;

  /// Remove a trend. Its history is kept.
  fn delete<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn get<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<TrendRecord>, Self::Error>> + Send + 'a;

  /// Number of trends in the store.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Run a search/filter/sort query. Never mutates.
  fn query<'a>(
    &'a self,
    query: &'a TrendQuery,
  ) -> impl Future<Output = Result<QueryResult, Self::Error>> + Send + 'a;

  /// Velocity history for `name`, oldest first. Empty if none was recorded.
  fn history<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<VelocityHistoryEntry>, Self::Error>> + Send + 'a;

  // ── Provided ──────────────────────────────────────────────────────────

  /// Load the demo trends if the store is empty. Returns how many were
  /// written.
  fn seed_defaults(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_ {
    async move {
      if self.count().await? > 0 {
        return Ok(0);
      }
      let trends = default_trends();
      let n = trends.len();
      for trend in trends {
        self.upsert(trend).await?;
      }
      Ok(n)
    }
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Abstraction over the curator account store.
pub trait AccountStore: Send + Sync {
  type Error: Classify + std::error::Error + Send + Sync + 'static;

  /// Create a curator account. Fails with a validation error if the secret
  /// is too short and a conflict error if the username is taken; neither
  /// failure writes anything.
  fn register<'a>(
    &'a self,
    username: &'a str,
    secret: &'a str,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + 'a;

  /// `true` only if `username` exists and `secret` matches its digest. An
  /// unknown username and a wrong secret give the same answer.
  fn authenticate<'a>(
    &'a self,
    username: &'a str,
    secret: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Create the `admin` account with the default secret if it is missing.
  /// Returns `true` if an account was created.
  fn ensure_bootstrap_admin(
    &self,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn get_account<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + 'a;
}

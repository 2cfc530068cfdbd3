//! Filter, search and sort semantics for [`crate::store::TrendStore::query`].
//!
//! Search narrows the candidate set first, filters narrow it further, and the
//! sort is applied last. Every sort is stable: records that compare equal
//! keep the store's natural (insertion) order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::trend::{TrendRecord, TrendStatus};

// ─── Sort ────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortOrder {
  VelocityAsc,
  #[default]
  VelocityDesc,
  NameAsc,
  NameDesc,
  /// Most recently updated first.
  RecentlyUpdated,
}

impl SortOrder {
  pub fn sort(self, trends: &mut [TrendRecord]) {
    match self {
      Self::VelocityAsc => trends.sort_by(|a, b| a.velocity.total_cmp(&b.velocity)),
      Self::VelocityDesc => trends.sort_by(|a, b| b.velocity.total_cmp(&a.velocity)),
      Self::NameAsc => trends.sort_by(|a, b| a.name.cmp(&b.name)),
      Self::NameDesc => trends.sort_by(|a, b| b.name.cmp(&a.name)),
      Self::RecentlyUpdated => trends.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::TrendStore::query`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendQuery {
  /// Exact category match.
  pub category:     Option<String>,
  /// Exact status match.
  pub status:       Option<TrendStatus>,
  /// Inclusive lower bound on velocity.
  pub min_velocity: f64,
  /// Case-insensitive substring matched against name, description and
  /// category; any one field matching is enough.
  pub search:       Option<String>,
  pub sort:         SortOrder,
}

impl TrendQuery {
  pub fn matches_search(&self, trend: &TrendRecord) -> bool {
    let Some(needle) = self.search.as_deref() else {
      return true;
    };
    let needle = needle.to_lowercase();
    [&trend.name, &trend.description, &trend.category]
      .iter()
      .any(|field| field.to_lowercase().contains(&needle))
  }

  pub fn matches_filters(&self, trend: &TrendRecord) -> bool {
    self.category.as_deref().is_none_or(|c| trend.category == c)
      && self.status.is_none_or(|s| trend.status == s)
      && trend.velocity >= self.min_velocity
  }

  /// Apply this query to `trends`, which must be in natural store order.
  pub fn apply(&self, trends: Vec<TrendRecord>) -> Vec<TrendRecord> {
    let mut matched: Vec<TrendRecord> = trends
      .into_iter()
      .filter(|t| self.matches_search(t))
      .filter(|t| self.matches_filters(t))
      .collect();
    self.sort.sort(&mut matched);
    matched
  }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// The output of a query, together with the size of the whole store so an
/// empty store can be told apart from an empty match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
  pub total_in_store: usize,
  pub trends:         Vec<TrendRecord>,
}

impl QueryResult {
  pub fn is_store_empty(&self) -> bool { self.total_in_store == 0 }
}

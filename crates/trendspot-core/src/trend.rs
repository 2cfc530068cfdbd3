//! Trend records — the unit of curation.
//!
//! A trend is keyed by its exact, case-sensitive `name`. Writing a name that
//! already exists replaces the record in place; every write also appends a
//! [`VelocityHistoryEntry`] to an append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Categories offered to curators. The store accepts any string.
pub const CATEGORY_SUGGESTIONS: [&str; 5] = [
  "Home Decor",
  "Fashion",
  "Food & Beverage",
  "Technology",
  "Lifestyle",
];

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a trend as judged by the curator.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
pub enum TrendStatus {
  Rising,
  Stable,
  Declining,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
  pub name:        String,
  /// Score in `[0.0, 10.0]`; higher means faster-growing interest.
  pub velocity:    f64,
  pub category:    String,
  pub status:      TrendStatus,
  pub description: String,
  /// Supporting citations, in display order.
  pub evidence:    Vec<String>,
  /// Set once when the name is first written.
  pub created_at:  DateTime<Utc>,
  /// Refreshed on every write, including upserts of an existing name.
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::TrendStore::upsert`]. Timestamps are always
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrend {
  pub name:        String,
  pub velocity:    f64,
  pub category:    String,
  pub status:      TrendStatus,
  pub description: String,
  pub evidence:    Vec<String>,
}

impl NewTrend {
  /// Names of required fields that are empty or whitespace-only.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if self.name.trim().is_empty() {
      missing.push("name");
    }
    if self.category.trim().is_empty() {
      missing.push("category");
    }
    if self.description.trim().is_empty() {
      missing.push("description");
    }
    if self.evidence.iter().all(|e| e.trim().is_empty()) {
      missing.push("evidence");
    }
    missing
  }

  /// Reject input the store cannot persist.
  pub fn validate(&self) -> Result<()> {
    let missing = self.missing_fields();
    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }
    if !self.velocity.is_finite() {
      return Err(Error::NonFiniteVelocity(self.velocity));
    }
    Ok(())
  }
}

// ─── History ─────────────────────────────────────────────────────────────────

/// One velocity observation, appended on every successful write of a trend.
///
/// Entries are never mutated or deleted and may outlive the trend they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityHistoryEntry {
  pub trend_name:  String,
  pub velocity:    f64,
  pub recorded_at: DateTime<Utc>,
}

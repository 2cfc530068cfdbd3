//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with fixed microsecond
//! precision, so lexical order in SQL matches chronological order. Evidence
//! lists are stored as compact JSON arrays.

use std::str::FromStr as _;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use trendspot_core::{
  account::{Account, Role},
  trend::{TrendRecord, TrendStatus, VelocityHistoryEntry},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to the precision stored in the database.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_status(s: TrendStatus) -> &'static str { s.into() }

pub fn decode_status(s: &str) -> Result<TrendStatus> {
  TrendStatus::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "status",
    value:  s.to_owned(),
  })
}

pub fn encode_role(r: Role) -> &'static str { r.into() }

pub fn decode_role(s: &str) -> Result<Role> {
  Role::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "role",
    value:  s.to_owned(),
  })
}

// ─── Evidence ────────────────────────────────────────────────────────────────

pub fn encode_evidence(evidence: &[String]) -> Result<String> {
  Ok(serde_json::to_string(evidence)?)
}

pub fn decode_evidence(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawTrend::from_row`].
pub const TREND_COLUMNS: &str =
  "name, velocity, category, status, description, evidence, created_at, updated_at";

/// Raw values read directly from a `trends` row.
pub struct RawTrend {
  pub name:        String,
  pub velocity:    f64,
  pub category:    String,
  pub status:      String,
  pub description: String,
  pub evidence:    String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTrend {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      name:        row.get(0)?,
      velocity:    row.get(1)?,
      category:    row.get(2)?,
      status:      row.get(3)?,
      description: row.get(4)?,
      evidence:    row.get(5)?,
      created_at:  row.get(6)?,
      updated_at:  row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<TrendRecord> {
    Ok(TrendRecord {
      name:        self.name,
      velocity:    self.velocity,
      category:    self.category,
      status:      decode_status(&self.status)?,
      description: self.description,
      evidence:    decode_evidence(&self.evidence)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `velocity_history` row.
pub struct RawHistoryEntry {
  pub trend_name:  String,
  pub velocity:    f64,
  pub recorded_at: String,
}

impl RawHistoryEntry {
  pub fn into_entry(self) -> Result<VelocityHistoryEntry> {
    Ok(VelocityHistoryEntry {
      trend_name:  self.trend_name,
      velocity:    self.velocity,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from an `accounts` row.
pub struct RawAccount {
  pub username:        String,
  pub credential_hash: String,
  pub role:            String,
  pub created_at:      String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      username:        self.username,
      credential_hash: self.credential_hash,
      role:            decode_role(&self.role)?,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

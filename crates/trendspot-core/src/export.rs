//! Tabular export of query results.
//!
//! Both formats project the same five columns, in this order:
//! `name, velocity, category, status, description`.

use serde::Serialize;

use crate::{
  Error, Result,
  trend::{TrendRecord, TrendStatus},
};

pub const EXPORT_COLUMNS: [&str; 5] = ["name", "velocity", "category", "status", "description"];

/// One exported row. Field order is the column order.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
  pub name:        &'a str,
  pub velocity:    f64,
  pub category:    &'a str,
  pub status:      TrendStatus,
  pub description: &'a str,
}

impl<'a> From<&'a TrendRecord> for ExportRow<'a> {
  fn from(t: &'a TrendRecord) -> Self {
    Self {
      name:        &t.name,
      velocity:    t.velocity,
      category:    &t.category,
      status:      t.status,
      description: &t.description,
    }
  }
}

/// Header row plus one row per trend, with standard CSV quoting. The header is
/// written even when `trends` is empty.
pub fn to_csv(trends: &[TrendRecord]) -> Result<String> {
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(Vec::new());
  writer.write_record(EXPORT_COLUMNS)?;
  for trend in trends {
    writer.serialize(ExportRow::from(trend))?;
  }
  let bytes = writer
    .into_inner()
    .map_err(|e| Error::Csv(e.into_error().into()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A JSON array with one object per trend.
pub fn to_json(trends: &[TrendRecord]) -> Result<String> {
  let rows: Vec<ExportRow<'_>> = trends.iter().map(ExportRow::from).collect();
  Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn record(name: &str, description: &str) -> TrendRecord {
    let now = Utc::now();
    TrendRecord {
      name:        name.into(),
      velocity:    8.1,
      category:    "Home Decor".into(),
      status:      TrendStatus::Rising,
      description: description.into(),
      evidence:    vec!["not exported".into()],
      created_at:  now,
      updated_at:  now,
    }
  }

  #[test]
  fn csv_has_header_and_quotes_commas() {
    let csv = to_csv(&[record("Checkered Patterns", "rugs, blankets, and ceramics")]).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("name,velocity,category,status,description"));
    assert_eq!(
      lines.next(),
      Some("Checkered Patterns,8.1,Home Decor,Rising,\"rugs, blankets, and ceramics\"")
    );
    assert_eq!(lines.next(), None);
  }

  #[test]
  fn empty_csv_is_just_the_header() {
    assert_eq!(to_csv(&[]).unwrap(), "name,velocity,category,status,description\n");
  }

  #[test]
  fn json_keeps_column_order() {
    let json = to_json(&[record("A", "d")]).unwrap();
    let positions: Vec<usize> = EXPORT_COLUMNS
      .iter()
      .map(|c| json.find(&format!("\"{c}\"")).unwrap())
      .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!json.contains("evidence"));

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["status"], "Rising");
  }
}

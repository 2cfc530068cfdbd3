//! Route handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/accounts` | Unauthenticated registration |
//! | `GET`  | `/session` | The authenticated account |
//! | `GET`  | `/trends` | [`QueryParams`] |
//! | `POST` | `/trends` | Upsert; body [`trends::TrendBody`] |
//! | `GET` `PUT` `DELETE` | `/trends/{name}` | `PUT` only edits an existing trend |
//! | `GET`  | `/trends/{name}/history` | Oldest first |
//! | `GET`  | `/trends/{name}/projection` | Synthetic demo series |
//! | `GET`  | `/summary` | Overview and per-category stats |
//! | `GET`  | `/export.csv`, `/export.json` | Export of a query result |

pub mod accounts;
pub mod export;
pub mod summary;
pub mod trends;

use std::str::FromStr as _;

use serde::Deserialize;
use trendspot_core::{
  query::{SortOrder, TrendQuery},
  trend::TrendStatus,
};

use crate::error::ApiError;

/// Query-string form of [`TrendQuery`], shared by listing, summary and
/// export. Empty strings are treated as absent.
#[derive(Debug, Deserialize, Default)]
pub struct QueryParams {
  pub category:     Option<String>,
  pub status:       Option<String>,
  pub min_velocity: Option<String>,
  pub search:       Option<String>,
  pub sort:         Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> { s.filter(|v| !v.is_empty()) }

impl TryFrom<QueryParams> for TrendQuery {
  type Error = ApiError;

  fn try_from(p: QueryParams) -> Result<Self, ApiError> {
    let status = non_empty(p.status)
      .map(|v| {
        TrendStatus::from_str(&v).map_err(|_| ApiError::BadRequest(format!("unknown status {v:?}")))
      })
      .transpose()?;

    let sort = non_empty(p.sort)
      .map(|v| {
        SortOrder::from_str(&v).map_err(|_| ApiError::BadRequest(format!("unknown sort {v:?}")))
      })
      .transpose()?
      .unwrap_or_default();

    let min_velocity = match non_empty(p.min_velocity) {
      None => 0.0,
      Some(v) => v
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ApiError::BadRequest(format!("min_velocity must be a number, got {v:?}")))?,
    };

    Ok(TrendQuery {
      category: non_empty(p.category),
      status,
      min_velocity,
      search: non_empty(p.search),
      sort,
    })
  }
}

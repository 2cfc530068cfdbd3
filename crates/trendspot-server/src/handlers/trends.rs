//! Handlers for `/trends` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use serde::Deserialize;
use trendspot_core::{
  projection::{Projection, synthetic},
  query::{QueryResult, TrendQuery},
  trend::{NewTrend, TrendRecord, TrendStatus, VelocityHistoryEntry},
};

use crate::{AppState, Backend, auth::Authenticated, error::ApiError, handlers::QueryParams};

const PROJECTION_PAST_DAYS: usize = 30;
const PROJECTION_FUTURE_DAYS: usize = 14;

// ─── Body ────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /trends` and `PUT /trends/{name}`.
///
/// Every field is optional at the wire level so a missing one is reported
/// by name instead of as a generic parse failure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TrendBody {
  pub name:        Option<String>,
  pub velocity:    Option<f64>,
  pub category:    Option<String>,
  pub status:      Option<TrendStatus>,
  pub description: Option<String>,
  pub evidence:    Vec<String>,
}

impl TrendBody {
  /// Build a [`NewTrend`]; `path_name`, when given, overrides `name`.
  pub fn into_new_trend(self, path_name: Option<String>) -> Result<NewTrend, trendspot_core::Error> {
    let mut missing = Vec::new();
    if self.velocity.is_none() {
      missing.push("velocity");
    }
    if self.status.is_none() {
      missing.push("status");
    }

    let trend = NewTrend {
      name:        path_name.or(self.name).unwrap_or_default(),
      velocity:    self.velocity.unwrap_or_default(),
      category:    self.category.unwrap_or_default(),
      status:      self.status.unwrap_or(TrendStatus::Stable),
      description: self.description.unwrap_or_default(),
      evidence:    self.evidence,
    };

    missing.extend(trend.missing_fields());
    if !missing.is_empty() {
      return Err(trendspot_core::Error::MissingFields(missing));
    }
    Ok(trend)
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /trends[?category=..][&status=..][&min_velocity=..][&search=..][&sort=..]`
pub async fn list<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<QueryParams>,
) -> Result<Json<QueryResult>, ApiError> {
  let query = TrendQuery::try_from(params)?;
  let result = state.store.query(&query).await.map_err(ApiError::store)?;
  Ok(Json(result))
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// `POST /trends` — create or replace by name.
pub async fn create<S: Backend>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<TrendBody>,
) -> Result<Json<TrendRecord>, ApiError> {
  let trend = body.into_new_trend(None)?;
  let record = state.store.upsert(trend).await.map_err(ApiError::store)?;
  tracing::info!(trend = %record.name, curator = %auth.username, "trend saved");
  Ok(Json(record))
}

/// `PUT /trends/{name}` — edit an existing trend; 404 if it is gone.
pub async fn update_one<S: Backend>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
  Json(body): Json<TrendBody>,
) -> Result<Json<TrendRecord>, ApiError> {
  let trend = body.into_new_trend(Some(name))?;
  let record = state.store.update(trend).await.map_err(ApiError::store)?;
  tracing::info!(trend = %record.name, curator = %auth.username, "trend updated");
  Ok(Json(record))
}

/// `DELETE /trends/{name}`
pub async fn delete_one<S: Backend>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
  state.store.delete(&name).await.map_err(ApiError::store)?;
  tracing::info!(trend = %name, curator = %auth.username, "trend deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Reads ───────────────────────────────────────────────────────────────────

async fn require<S: Backend>(state: &AppState<S>, name: &str) -> Result<TrendRecord, ApiError> {
  state
    .store
    .get(name)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("trend {name:?} is no longer available")))
}

/// `GET /trends/{name}`
pub async fn get_one<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<TrendRecord>, ApiError> {
  Ok(Json(require(&state, &name).await?))
}

/// `GET /trends/{name}/history` — empty for names never written.
pub async fn history<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<VelocityHistoryEntry>>, ApiError> {
  let entries = state.store.history(&name).await.map_err(ApiError::store)?;
  Ok(Json(entries))
}

/// `GET /trends/{name}/projection` — illustrative synthetic series.
pub async fn projection<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Projection>, ApiError> {
  let trend = require(&state, &name).await?;
  Ok(Json(synthetic(
    &trend.name,
    trend.velocity,
    PROJECTION_PAST_DAYS,
    PROJECTION_FUTURE_DAYS,
  )))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_body_fields_are_all_named() {
    let err = TrendBody::default().into_new_trend(None).unwrap_err();
    let trendspot_core::Error::MissingFields(fields) = err else {
      panic!("expected MissingFields");
    };
    for f in ["name", "velocity", "status", "category", "description", "evidence"] {
      assert!(fields.contains(&f), "{f} not reported");
    }
  }

  #[test]
  fn path_name_overrides_body() {
    let body = TrendBody {
      name:        Some("Body Name".into()),
      velocity:    Some(4.2),
      category:    Some("Lifestyle".into()),
      status:      Some(TrendStatus::Rising),
      description: Some("d".into()),
      evidence:    vec!["e".into()],
    };
    let trend = body.into_new_trend(Some("Path Name".into())).unwrap();
    assert_eq!(trend.name, "Path Name");
  }
}

//! Handler for `GET /summary`.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Serialize;
use trendspot_core::{
  query::TrendQuery,
  summary::{CategorySummary, Overview, aggregate_by_category, overview},
};

use crate::{AppState, Backend, auth::Authenticated, error::ApiError, handlers::QueryParams};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
  pub total_in_store: usize,
  pub overview:       Overview,
  pub categories:     Vec<CategorySummary>,
}

/// Aggregates over the trends matching the same parameters as `GET /trends`.
pub async fn handler<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<QueryParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
  let query = TrendQuery::try_from(params)?;
  let result = state.store.query(&query).await.map_err(ApiError::store)?;

  Ok(Json(SummaryResponse {
    total_in_store: result.total_in_store,
    overview:       overview(&result.trends),
    categories:     aggregate_by_category(&result.trends),
  }))
}

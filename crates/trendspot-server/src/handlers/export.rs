//! Handlers for `GET /export.csv` and `GET /export.json`.

use axum::{
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use trendspot_core::{export, query::TrendQuery, trend::TrendRecord};

use crate::{AppState, Backend, auth::Authenticated, error::ApiError, handlers::QueryParams};

async fn matching<S: Backend>(
  state: &AppState<S>,
  params: QueryParams,
) -> Result<Vec<TrendRecord>, ApiError> {
  let query = TrendQuery::try_from(params)?;
  let result = state.store.query(&query).await.map_err(ApiError::store)?;
  Ok(result.trends)
}

pub async fn csv<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
  let body = export::to_csv(&matching(&state, params).await?)?;
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
      (header::CONTENT_DISPOSITION, "attachment; filename=\"trends.csv\""),
    ],
    body,
  ))
}

pub async fn json<S: Backend>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, ApiError> {
  let body = export::to_json(&matching(&state, params).await?)?;
  Ok((
    [
      (header::CONTENT_TYPE, "application/json"),
      (header::CONTENT_DISPOSITION, "attachment; filename=\"trends.json\""),
    ],
    body,
  ))
}

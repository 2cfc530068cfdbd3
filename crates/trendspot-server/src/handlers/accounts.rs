//! Handlers for account registration and the current session.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use trendspot_core::account::Account;

use crate::{AppState, Backend, auth::Authenticated, error::ApiError};

/// Body of `POST /accounts`. Fields are optional at the wire level so a
/// missing one is reported by name.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RegisterBody {
  pub username: Option<String>,
  pub secret:   Option<String>,
}

impl RegisterBody {
  pub fn into_credentials(self) -> Result<(String, String), trendspot_core::Error> {
    let mut missing = Vec::new();
    if self.username.as_deref().is_none_or(|u| u.trim().is_empty()) {
      missing.push("username");
    }
    if self.secret.is_none() {
      missing.push("secret");
    }
    match (self.username, self.secret) {
      (Some(username), Some(secret)) if missing.is_empty() => Ok((username, secret)),
      _ => Err(trendspot_core::Error::MissingFields(missing)),
    }
  }
}

/// `POST /accounts` — returns 201 + the new account (without its digest).
pub async fn register<S: Backend>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
  let (username, secret) = body.into_credentials()?;
  let account = state
    .store
    .register(&username, &secret)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(account)))
}

/// `GET /session` — the account behind the request's credentials.
pub async fn session<S: Backend>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Account>, ApiError> {
  let account = state
    .store
    .get_account(&auth.username)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("account {:?}", auth.username)))?;
  Ok(Json(account))
}

//! HTTP Basic-auth extractor backed by the account store.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};

use crate::{AppState, Backend, error::ApiError};

/// Present in a handler's arguments means the request carried valid
/// credentials. Holds the authenticated username for this request only.
#[derive(Debug, Clone)]
pub struct Authenticated {
  pub username: String,
}

/// Split a `Basic` Authorization header into `(username, secret)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;

  let decoded = B64.decode(encoded).ok()?;
  let creds   = String::from_utf8(decoded).ok()?;
  let (username, secret) = creds.split_once(':')?;
  Some((username.to_owned(), secret.to_owned()))
}

impl<S: Backend> FromRequestParts<AppState<S>> for Authenticated {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (username, secret) = basic_credentials(&parts.headers).ok_or(ApiError::Unauthorized)?;

    let ok = state
      .store
      .authenticate(&username, &secret)
      .await
      .map_err(ApiError::store)?;

    if !ok {
      tracing::debug!(%username, "rejected credentials");
      return Err(ApiError::Unauthorized);
    }
    Ok(Authenticated { username })
  }
}

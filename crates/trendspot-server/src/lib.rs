//! JSON-over-HTTP surface for the Trendspot stores.
//!
//! Exposes an axum [`Router`] backed by any type implementing both
//! [`TrendStore`] and [`AccountStore`]. Every route except registration
//! requires HTTP Basic credentials checked against the account store.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use trendspot_core::store::{AccountStore, TrendStore};

use handlers::{accounts, export, summary, trends};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `trendspot.toml` and
/// `TRENDSPOT_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// The SQLite file holding trends, history and accounts.
  pub store_path:     PathBuf,
  /// Load the demo trends into an empty store at startup.
  pub seed_demo_data: bool,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything a handler needs from its store.
pub trait Backend: TrendStore + AccountStore + Clone + 'static {}

impl<T> Backend for T where T: TrendStore + AccountStore + Clone + 'static {}

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: Backend> {
  pub store: Arc<S>,
}

impl<S: Backend> AppState<S> {
  pub fn new(store: S) -> Self { Self { store: Arc::new(store) } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the server.
pub fn router<S: Backend>(state: AppState<S>) -> Router {
  Router::new()
    // Accounts
    .route("/accounts", post(accounts::register::<S>))
    .route("/session", get(accounts::session::<S>))
    // Trends
    .route("/trends", get(trends::list::<S>).post(trends::create::<S>))
    .route(
      "/trends/{name}",
      get(trends::get_one::<S>)
        .put(trends::update_one::<S>)
        .delete(trends::delete_one::<S>),
    )
    .route("/trends/{name}/history", get(trends::history::<S>))
    .route("/trends/{name}/projection", get(trends::projection::<S>))
    // Views
    .route("/summary", get(summary::handler::<S>))
    .route("/export.csv", get(export::csv::<S>))
    .route("/export.json", get(export::json::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use trendspot_core::account::DEFAULT_ADMIN_SECRET;
  use trendspot_store_sqlite::SqliteStore;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.ensure_bootstrap_admin().await.unwrap();
    AppState::new(store)
  }

  fn admin() -> String { auth_header("admin", DEFAULT_ADMIN_SECRET) }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn send(
    state:  &AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    auth:   Option<&str>,
    body:   Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(a) = auth {
      builder = builder.header(header::AUTHORIZATION, a);
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    router(state.clone()).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn trend_json(name: &str, velocity: f64) -> Value {
    json!({
      "name": name,
      "velocity": velocity,
      "category": "Home Decor",
      "status": "Rising",
      "description": "Fungi-inspired home goods.",
      "evidence": ["Pinterest Trends Report"],
    })
  }

  // ── Auth ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state().await;
    let resp = send(&state, "GET", "/trends", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn unknown_user_and_wrong_secret_look_the_same() {
    let state = make_state().await;
    let unknown = send(&state, "GET", "/session", Some(&auth_header("nouser", "x")), None).await;
    let wrong = send(&state, "GET", "/session", Some(&auth_header("admin", "wrongpass")), None).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
  }

  #[tokio::test]
  async fn bootstrap_admin_session() {
    let state = make_state().await;
    let resp = send(&state, "GET", "/session", Some(&admin()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let account = body_json(resp).await;
    assert_eq!(account["username"], "admin");
    assert_eq!(account["role"], "admin");
    assert!(account.get("credential_hash").is_none());
  }

  // ── Accounts ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_then_log_in() {
    let state = make_state().await;
    let resp = send(
      &state,
      "POST",
      "/accounts",
      None,
      Some(json!({ "username": "bob", "secret": "longenough" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["role"], "curator");

    let resp = send(&state, "GET", "/session", Some(&auth_header("bob", "longenough")), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn register_errors_map_to_status_codes() {
    let state = make_state().await;

    let short = send(
      &state,
      "POST",
      "/accounts",
      None,
      Some(json!({ "username": "bob", "secret": "abc" })),
    )
    .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let taken = send(
      &state,
      "POST",
      "/accounts",
      None,
      Some(json!({ "username": "admin", "secret": "longenough" })),
    )
    .await;
    assert_eq!(taken.status(), StatusCode::CONFLICT);

    // The original admin secret still works.
    let resp = send(&state, "GET", "/session", Some(&admin()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  // ── Trends ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn upsert_then_search() {
    let state = make_state().await;
    let auth = admin();
    for (name, v) in [("Mushroom Decor", 9.8), ("Checkered Patterns", 8.1)] {
      let resp = send(&state, "POST", "/trends", Some(&auth), Some(trend_json(name, v))).await;
      assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = send(&state, "GET", "/trends?search=mushroom", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let result = body_json(resp).await;
    assert_eq!(result["total_in_store"], 2);
    let trends = result["trends"].as_array().unwrap();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0]["name"], "Mushroom Decor");
  }

  #[tokio::test]
  async fn query_parameters_filter_and_sort() {
    let state = make_state().await;
    state.store.seed_defaults().await.unwrap();

    let resp = send(
      &state,
      "GET",
      "/trends?category=Fashion&status=Rising&min_velocity=8&sort=name_asc",
      Some(&admin()),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let result = body_json(resp).await;
    let names: Vec<&str> = result["trends"]
      .as_array()
      .unwrap()
      .iter()
      .map(|t| t["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Maximalist Jewelry"]);
  }

  #[tokio::test]
  async fn empty_form_values_mean_no_filter() {
    let state = make_state().await;
    state.store.seed_defaults().await.unwrap();

    for uri in [
      "/trends?status=&category=&min_velocity=&search=&sort=",
      "/summary?status=&sort=",
      "/export.json?min_velocity=",
    ] {
      let resp = send(&state, "GET", uri, Some(&admin()), None).await;
      assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }

    let resp = send(&state, "GET", "/trends?status=&sort=", Some(&admin()), None).await;
    let result = body_json(resp).await;
    let trends = result["trends"].as_array().unwrap();
    assert_eq!(trends.len(), 8);
    assert_eq!(trends[0]["name"], "Mushroom Decor");
  }

  #[tokio::test]
  async fn malformed_query_values_are_json_errors() {
    let state = make_state().await;
    for uri in [
      "/trends?status=Exploding",
      "/trends?sort=loudest",
      "/trends?min_velocity=fast",
      "/export.csv?min_velocity=NaN",
    ] {
      let resp = send(&state, "GET", uri, Some(&admin()), None).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
      assert!(body_json(resp).await["error"].is_string(), "{uri}");
    }
  }

  #[tokio::test]
  async fn registration_names_missing_fields() {
    let state = make_state().await;
    let resp = send(&state, "POST", "/accounts", None, Some(json!({ "username": "bob" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let message = body_json(resp).await["error"].as_str().unwrap().to_owned();
    assert!(message.contains("secret"), "{message:?}");
    assert!(!message.contains("username"), "{message:?}");

    let resp = send(&state, "POST", "/accounts", None, Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let message = body_json(resp).await["error"].as_str().unwrap().to_owned();
    assert!(message.contains("username") && message.contains("secret"), "{message:?}");

    let resp = send(&state, "GET", "/session", Some(&auth_header("bob", "")), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn missing_fields_are_reported() {
    let state = make_state().await;
    let resp = send(
      &state,
      "POST",
      "/trends",
      Some(&admin()),
      Some(json!({ "name": "Half Done", "velocity": 3.0 })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let message = body_json(resp).await["error"].as_str().unwrap().to_owned();
    for field in ["status", "category", "description", "evidence"] {
      assert!(message.contains(field), "{field} missing from {message:?}");
    }
  }

  #[tokio::test]
  async fn history_counts_every_write() {
    let state = make_state().await;
    let auth = admin();
    send(&state, "POST", "/trends", Some(&auth), Some(trend_json("Mushroom Decor", 9.8))).await;
    send(&state, "POST", "/trends", Some(&auth), Some(trend_json("Mushroom Decor", 9.1))).await;

    let resp = send(&state, "GET", "/trends/Mushroom%20Decor/history", Some(&auth), None).await;
    let history = body_json(resp).await;
    let velocities: Vec<f64> = history
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["velocity"].as_f64().unwrap())
      .collect();
    assert_eq!(velocities, [9.8, 9.1]);

    let resp = send(&state, "GET", "/trends", Some(&auth), None).await;
    assert_eq!(body_json(resp).await["trends"].as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn update_and_delete_lifecycle() {
    let state = make_state().await;
    let auth = admin();
    let uri = "/trends/Vintage%20Denim";

    // Editing something that does not exist.
    let resp = send(&state, "PUT", uri, Some(&auth), Some(trend_json("ignored", 6.9))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    send(&state, "POST", "/trends", Some(&auth), Some(trend_json("Vintage Denim", 6.9))).await;
    let resp = send(&state, "PUT", uri, Some(&auth), Some(trend_json("ignored", 7.3))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let record = body_json(resp).await;
    assert_eq!(record["name"], "Vintage Denim");
    assert_eq!(record["velocity"], 7.3);

    let resp = send(&state, "DELETE", uri, Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&state, "GET", uri, Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&state, "DELETE", uri, Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn projection_is_labelled_synthetic() {
    let state = make_state().await;
    let auth = admin();
    send(&state, "POST", "/trends", Some(&auth), Some(trend_json("Mushroom Decor", 9.8))).await;

    let resp = send(&state, "GET", "/trends/Mushroom%20Decor/projection", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let projection = body_json(resp).await;
    assert_eq!(projection["synthetic"], true);
    assert_eq!(projection["past"].as_array().unwrap().len(), 30);

    let resp = send(&state, "GET", "/trends/Nope/projection", Some(&auth), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Views ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn summary_over_seeded_store() {
    let state = make_state().await;
    state.store.seed_defaults().await.unwrap();

    let resp = send(&state, "GET", "/summary", Some(&admin()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary = body_json(resp).await;
    assert_eq!(summary["overview"]["total"], 8);
    assert_eq!(summary["overview"]["top_trend"], "Mushroom Decor");

    let categories = summary["categories"].as_array().unwrap();
    let home = categories
      .iter()
      .find(|c| c["category"] == "Home Decor")
      .unwrap();
    assert_eq!(home["count"], 2);
    assert_eq!(home["rising_pct"], 100.0);
  }

  #[tokio::test]
  async fn csv_export_of_filtered_query() {
    let state = make_state().await;
    state.store.seed_defaults().await.unwrap();

    let resp = send(&state, "GET", "/export.csv?category=Lifestyle", Some(&admin()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
      resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv")
    );
    let csv = body_text(resp).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "name,velocity,category,status,description");
    assert!(lines[1].starts_with("Cottagecore Crafts,5.4,Lifestyle,Declining,"));
  }

  #[tokio::test]
  async fn json_export_rows() {
    let state = make_state().await;
    state.store.seed_defaults().await.unwrap();

    let resp = send(&state, "GET", "/export.json?sort=velocity_asc", Some(&admin()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = body_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0]["name"], "Cottagecore Crafts");
    assert!(rows[0].get("evidence").is_none());
  }
}

//! Curator accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Shortest secret accepted by registration, in characters.
pub const MIN_SECRET_LEN: usize = 6;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Secret of the bootstrap account created on first startup.
pub const DEFAULT_ADMIN_SECRET: &str = "admin123";

/// Stored alongside the account but never consulted to gate behaviour.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  Curator,
  Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub username:        String,
  /// Argon2 PHC string. Never leaves the process.
  #[serde(skip_serializing, default)]
  pub credential_hash: String,
  pub role:            Role,
  pub created_at:      DateTime<Utc>,
}

/// Check the registration constraints that do not need the store.
pub fn validate_registration(username: &str, secret: &str) -> Result<()> {
  if username.trim().is_empty() {
    return Err(Error::MissingFields(vec!["username"]));
  }
  if secret.chars().count() < MIN_SECRET_LEN {
    return Err(Error::SecretTooShort);
  }
  Ok(())
}

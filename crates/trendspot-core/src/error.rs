//! Error types for `trendspot-core`.

use thiserror::Error;

use crate::account::MIN_SECRET_LEN;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field(s): {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("velocity must be a finite number, got {0}")]
  NonFiniteVelocity(f64),

  #[error("secret must be at least {} characters", MIN_SECRET_LEN)]
  SecretTooShort,

  #[error("username already taken: {0}")]
  UsernameTaken(String),

  #[error("trend not found: {0:?}")]
  TrendNotFound(String),

  #[error("credential digest error: {0}")]
  Credential(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// The four failure kinds a caller must be able to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Caller-supplied data is missing or too short; fix the input and retry.
  Validation,
  /// A uniqueness rule was violated (duplicate username).
  Conflict,
  /// The referenced record no longer exists.
  NotFound,
  /// The persistence layer failed; prior state is unchanged.
  Storage,
}

/// Implemented by every error type a store backend may return.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::MissingFields(_) | Self::NonFiniteVelocity(_) | Self::SecretTooShort => {
        ErrorKind::Validation
      }
      Self::UsernameTaken(_) => ErrorKind::Conflict,
      Self::TrendNotFound(_) => ErrorKind::NotFound,
      Self::Credential(_) | Self::Serialization(_) | Self::Csv(_) => ErrorKind::Storage,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_fields_message_lists_every_field() {
    let err = Error::MissingFields(vec!["name", "evidence"]);
    assert_eq!(err.to_string(), "missing required field(s): name, evidence");
    assert_eq!(err.kind(), ErrorKind::Validation);
  }

  #[test]
  fn kinds() {
    assert_eq!(Error::SecretTooShort.kind(), ErrorKind::Validation);
    assert_eq!(Error::UsernameTaken("admin".into()).kind(), ErrorKind::Conflict);
    assert_eq!(Error::TrendNotFound("x".into()).kind(), ErrorKind::NotFound);
  }
}

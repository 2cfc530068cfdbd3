//! Credential digests.
//!
//! Secrets are hashed with Argon2id and a fresh random salt per account; the
//! PHC string carries the salt and parameters. Verification goes through
//! `argon2`, which compares digests in constant time.

use std::sync::LazyLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Digest verified when the username is unknown, so both negative paths do
/// the same amount of work.
static DUMMY_DIGEST: LazyLock<Option<String>> =
  LazyLock::new(|| hash_secret("trendspot-unknown-account").ok());

/// Produce a salted PHC digest for `secret`.
pub fn hash_secret(secret: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Credential(e.to_string()))
}

/// `true` if `secret` matches the stored PHC `digest`. A malformed digest
/// never verifies.
pub fn verify_secret(secret: &str, digest: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(digest) else {
    return false;
  };
  Argon2::default()
    .verify_password(secret.as_bytes(), &parsed)
    .is_ok()
}

/// Burn one verification for an account that does not exist. Always `false`.
pub fn reject_unknown(secret: &str) -> bool {
  if let Some(digest) = DUMMY_DIGEST.as_deref() {
    let _ = verify_secret(secret, digest);
  }
  false
}

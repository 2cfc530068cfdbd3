//! [`SqliteStore`] — the SQLite implementation of [`TrendStore`] and
//! [`AccountStore`].

use std::{path::Path, time::Duration};

use rusqlite::{OptionalExtension as _, params};

use trendspot_core::{
  account::{Account, DEFAULT_ADMIN_SECRET, DEFAULT_ADMIN_USERNAME, Role, validate_registration},
  credential::{hash_secret, reject_unknown, verify_secret},
  query::{QueryResult, TrendQuery},
  store::{AccountStore, TrendStore},
  trend::{NewTrend, TrendRecord, VelocityHistoryEntry},
};

use crate::{
  Error, Result,
  encode::{
    RawAccount, RawHistoryEntry, RawTrend, TREND_COLUMNS, encode_dt, encode_evidence, encode_role,
    encode_status, now,
  },
  schema::SCHEMA,
};

/// How long a write waits for another process holding the file lock before
/// failing with a storage error.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// Trend and account stores backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Raw access for tests that need to tamper with the schema.
  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write `trend` and append its history entry in one transaction.
  ///
  /// With `must_exist`, fails with [`TrendNotFound`] without writing if the
  /// name is absent.
  ///
  /// [`TrendNotFound`]: trendspot_core::Error::TrendNotFound
  async fn write_trend(&self, trend: NewTrend, must_exist: bool) -> Result<TrendRecord> {
    trend.validate()?;

    let evidence_str = encode_evidence(&trend.evidence)?;
    let status_str   = encode_status(trend.status);
    let NewTrend { name, velocity, category, description, .. } = trend;
    let name_str = name.clone();

    let raw: Option<RawTrend> = self
      .conn
      .call(move |conn| {
        // Stamped on the connection thread so timestamps follow commit order.
        let at_str = encode_dt(now());
        let tx = conn.transaction()?;

        if must_exist {
          let exists = tx
            .query_row("SELECT 1 FROM trends WHERE name = ?1", params![name_str], |_| Ok(()))
            .optional()?
            .is_some();
          if !exists {
            return Ok(None);
          }
        }

        tx.execute(
          "INSERT INTO trends (
             name, velocity, category, status, description, evidence,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
           ON CONFLICT(name) DO UPDATE SET
             velocity    = excluded.velocity,
             category    = excluded.category,
             status      = excluded.status,
             description = excluded.description,
             evidence    = excluded.evidence,
             updated_at  = excluded.updated_at",
          params![name_str, velocity, category, status_str, description, evidence_str, at_str],
        )?;

        tx.execute(
          "INSERT INTO velocity_history (trend_name, velocity, recorded_at)
           VALUES (?1, ?2, ?3)",
          params![name_str, velocity, at_str],
        )?;

        let raw = tx.query_row(
          &format!("SELECT {TREND_COLUMNS} FROM trends WHERE name = ?1"),
          params![name_str],
          RawTrend::from_row,
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    // `None` only comes back when `must_exist` found nothing.
    let record = raw
      .ok_or(trendspot_core::Error::TrendNotFound(name))?
      .into_record()?;
    tracing::debug!(trend = %record.name, velocity = record.velocity, "trend written");
    Ok(record)
  }

  /// Insert an account unless the username is taken. Returns whether a row
  /// was written.
  async fn insert_account(&self, account: &Account) -> Result<bool> {
    let username = account.username.clone();
    let hash     = account.credential_hash.clone();
    let role_str = encode_role(account.role);
    let at_str   = encode_dt(account.created_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO accounts (username, credential_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(username) DO NOTHING",
          params![username, hash, role_str, at_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }
}

// ─── TrendStore impl ─────────────────────────────────────────────────────────

impl TrendStore for SqliteStore {
  type Error = Error;

  async fn upsert(&self, trend: NewTrend) -> Result<TrendRecord> {
    self.write_trend(trend, false).await
  }

  async fn update(&self, trend: NewTrend) -> Result<TrendRecord> {
    self.write_trend(trend, true).await
  }

  async fn delete(&self, name: &str) -> Result<()> {
    let name_str = name.to_owned();

    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM trends WHERE name = ?1", params![name_str])?))
      .await?;

    if deleted == 0 {
      return Err(trendspot_core::Error::TrendNotFound(name.to_owned()).into());
    }
    tracing::debug!(trend = %name, "trend deleted");
    Ok(())
  }

  async fn get(&self, name: &str) -> Result<Option<TrendRecord>> {
    let name_str = name.to_owned();

    let raw: Option<RawTrend> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {TREND_COLUMNS} FROM trends WHERE name = ?1"),
            params![name_str],
            RawTrend::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawTrend::into_record).transpose()
  }

  async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM trends", [], |r| r.get(0))?))
      .await?;
    Ok(n as usize)
  }

  async fn query(&self, query: &TrendQuery) -> Result<QueryResult> {
    let raws: Vec<RawTrend> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {TREND_COLUMNS} FROM trends ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawTrend::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let all: Vec<TrendRecord> = raws
      .into_iter()
      .map(RawTrend::into_record)
      .collect::<Result<_>>()?;

    Ok(QueryResult { total_in_store: all.len(), trends: query.apply(all) })
  }

  async fn history(&self, name: &str) -> Result<Vec<VelocityHistoryEntry>> {
    let name_str = name.to_owned();

    let raws: Vec<RawHistoryEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT trend_name, velocity, recorded_at
           FROM velocity_history
           WHERE trend_name = ?1
           ORDER BY recorded_at, id",
        )?;
        let rows = stmt
          .query_map(params![name_str], |row| {
            Ok(RawHistoryEntry {
              trend_name:  row.get(0)?,
              velocity:    row.get(1)?,
              recorded_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryEntry::into_entry).collect()
  }
}

// ─── AccountStore impl ───────────────────────────────────────────────────────

impl AccountStore for SqliteStore {
  type Error = Error;

  async fn register(&self, username: &str, secret: &str) -> Result<Account> {
    validate_registration(username, secret)?;

    let account = Account {
      username:        username.to_owned(),
      credential_hash: hash_secret(secret)?,
      role:            Role::Curator,
      created_at:      now(),
    };

    if !self.insert_account(&account).await? {
      return Err(trendspot_core::Error::UsernameTaken(account.username).into());
    }
    tracing::info!(username = %account.username, "account registered");
    Ok(account)
  }

  async fn authenticate(&self, username: &str, secret: &str) -> Result<bool> {
    let username_str = username.to_owned();

    let digest: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT credential_hash FROM accounts WHERE username = ?1",
            params![username_str],
            |r| r.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(match digest {
      Some(d) => verify_secret(secret, &d),
      None => reject_unknown(secret),
    })
  }

  async fn ensure_bootstrap_admin(&self) -> Result<bool> {
    if self.get_account(DEFAULT_ADMIN_USERNAME).await?.is_some() {
      return Ok(false);
    }

    let account = Account {
      username:        DEFAULT_ADMIN_USERNAME.to_owned(),
      credential_hash: hash_secret(DEFAULT_ADMIN_SECRET)?,
      role:            Role::Admin,
      created_at:      now(),
    };

    let created = self.insert_account(&account).await?;
    if created {
      tracing::info!(username = DEFAULT_ADMIN_USERNAME, "created bootstrap admin account");
    }
    Ok(created)
  }

  async fn get_account(&self, username: &str) -> Result<Option<Account>> {
    let username_str = username.to_owned();

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT username, credential_hash, role, created_at
             FROM accounts WHERE username = ?1",
            params![username_str],
            |row| {
              Ok(RawAccount {
                username:        row.get(0)?,
                credential_hash: row.get(1)?,
                role:            row.get(2)?,
                created_at:      row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }
}

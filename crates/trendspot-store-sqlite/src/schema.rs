//! SQL schema for the Trendspot SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per unique name. `id` gives the natural (insertion) order and is
-- kept across upserts.
CREATE TABLE IF NOT EXISTS trends (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    velocity    REAL NOT NULL,
    category    TEXT NOT NULL,
    status      TEXT NOT NULL,   -- 'Rising' | 'Stable' | 'Declining'
    description TEXT NOT NULL,
    evidence    TEXT NOT NULL,   -- JSON array of strings
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; set once
    updated_at  TEXT NOT NULL
);

-- Strictly append-only. No UPDATE or DELETE is ever issued against this
-- table, and rows are not tied to `trends` by a foreign key.
CREATE TABLE IF NOT EXISTS velocity_history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    trend_name  TEXT NOT NULL,
    velocity    REAL NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS accounts (
    username        TEXT PRIMARY KEY,
    credential_hash TEXT NOT NULL,   -- argon2 PHC string
    role            TEXT NOT NULL DEFAULT 'curator',
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS velocity_history_trend_idx
    ON velocity_history(trend_name, recorded_at);

PRAGMA user_version = 1;
";

//! SQL schema for the Loja Social SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Snapshot collections. Owned by the surrounding application; the alert
-- engine only reads them.
CREATE TABLE IF NOT EXISTS products (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    quantity    INTEGER NOT NULL DEFAULT 0,
    expire_date INTEGER          -- epoch milliseconds, NULL when unset
);

CREATE TABLE IF NOT EXISTS deliveries (
    id               TEXT PRIMARY KEY,
    beneficiary_name TEXT NOT NULL DEFAULT '',
    state            INTEGER NOT NULL DEFAULT 0,  -- 1 once delivered
    date             TEXT NOT NULL DEFAULT '',    -- free-form, day-granular
    items            TEXT NOT NULL DEFAULT '[]'   -- JSON list of items
);

CREATE TABLE IF NOT EXISTS alerts (
    alert_id    TEXT PRIMARY KEY,
    kind        TEXT NOT NULL,      -- AlertKind discriminant
    entity_id   TEXT NOT NULL,
    title       TEXT NOT NULL,
    message     TEXT NOT NULL,
    severity    TEXT NOT NULL,      -- 'INFO' | 'AVISO' | 'PERIGO' | 'CRITICO'
    created_at  TEXT NOT NULL,      -- ISO 8601 UTC; store-assigned
    resolved    INTEGER NOT NULL DEFAULT 0,
    resolved_at TEXT
);

-- At most one unresolved alert per (kind, entity_id). Admission relies on
-- this index: a conflicting insert is a no-op, so check and insert are one
-- atomic unit.
CREATE UNIQUE INDEX IF NOT EXISTS alerts_active_fingerprint
    ON alerts(kind, entity_id) WHERE resolved = 0;

CREATE INDEX IF NOT EXISTS alerts_resolved_idx ON alerts(resolved);
CREATE INDEX IF NOT EXISTS alerts_created_idx  ON alerts(created_at);

PRAGMA user_version = 1;
";

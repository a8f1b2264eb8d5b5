//! SQL DDL for initializing the lead storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users` for panel accounts, `email` UNIQUE
/// - `leads` for captured contacts
/// - `consumption` 1:1 with `leads`, cascading on delete
/// - index on `consumption(lead_id)` for the admin LEFT JOIN
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    cpf TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS consumption (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lead_id INTEGER NOT NULL REFERENCES leads(id) ON DELETE CASCADE,
    monthly_bill_value REAL NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    supply_type TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_consumption_lead_id ON consumption(lead_id);
"#;

//! Database schema and migrations for stile.
//!
//! Migrations are applied sequentially when the database is opened.

/// Database migrations.
///
/// Each migration is a SQL script executed in order. The schema_version
/// table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- User records for credential authentication
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL,
    password    TEXT NOT NULL,           -- Argon2 hash, never plaintext
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Storage-level uniqueness backstop: the registration pre-check and the
-- insert are not atomic, so a concurrent duplicate must fail here.
CREATE UNIQUE INDEX idx_users_username_nocase ON users(username COLLATE NOCASE);
"#,
];

//! SQL DDL for the record store.
//! SQLite-first design; every statement is safe to re-run.

/// Base tables as the first release laid them out:
/// - `users.username` is the primary key (case-sensitive)
/// - `issues.id` / `wiki.id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `wiki.title` UNIQUE, which is what upserts key on
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject TEXT,
    status TEXT,
    priority TEXT,
    description TEXT,
    created_at TEXT
);

CREATE TABLE IF NOT EXISTS wiki (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT UNIQUE,
    content TEXT
);
"#;

/// A column added by a later release: `(table, column, declared type)`.
pub type ColumnSpec = (&'static str, &'static str, &'static str);

/// Columns the running binary expects on top of [`SQLITE_INIT`].
/// Order carries no meaning; each entry is applied independently.
pub const EVOLVED_COLUMNS: &[ColumnSpec] = &[
    ("issues", "tracker", "TEXT"),
    ("issues", "assignee", "TEXT"),
    ("issues", "start_date", "TEXT"),
    ("issues", "due_date", "TEXT"),
    ("issues", "percent_done", "INTEGER DEFAULT 0"),
    ("issues", "estimated_hours", "REAL"),
    ("issues", "created_by", "TEXT"),
    ("wiki", "updated_by", "TEXT"),
];

//! Lazy schema evolution: base tables plus additive, idempotent columns.
//!
//! There is no version ledger. The current schema is whatever columns the
//! running binary asks for, so two binaries of different vintage sharing one
//! file end up with the union of their columns.

use crate::db::schema::{EVOLVED_COLUMNS, SQLITE_INIT};
use crate::db::sqlite::SqlitePool;
use crate::error::TrackerError;
use tracing::{debug, info};

pub struct SchemaManager<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SchemaManager<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create `users`, `issues` and `wiki` if absent. Existing tables are left untouched.
    pub async fn ensure_base_tables(&self) -> Result<(), TrackerError> {
        // one statement per query
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(self.pool).await?;
        }
        Ok(())
    }

    /// Column names of `table` in declaration order. Empty if the table does not exist.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<String>, TrackerError> {
        check_identifier(table)?;
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Add `column` to `table` unless it is already there.
    ///
    /// Returns `true` when the column was added. A missing table is not
    /// special-cased: the ALTER fails and the error propagates.
    pub async fn ensure_column(
        &self,
        table: &str,
        column: &str,
        decl: &str,
    ) -> Result<bool, TrackerError> {
        check_identifier(column)?;
        check_declaration(decl)?;
        let existing = self.table_columns(table).await?;
        if existing.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            debug!(table, column, "column already present");
            return Ok(false);
        }

        let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
        sqlx::query(&sql).execute(self.pool).await?;
        info!(table, column, decl, "added column");
        Ok(true)
    }

    /// Apply every column in [`EVOLVED_COLUMNS`]. Returns how many were added.
    pub async fn apply_evolution(&self) -> Result<usize, TrackerError> {
        let mut added = 0;
        for (table, column, decl) in EVOLVED_COLUMNS {
            if self.ensure_column(table, column, decl).await? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Full startup routine: base tables, then evolution.
    pub async fn migrate(&self) -> Result<usize, TrackerError> {
        self.ensure_base_tables().await?;
        let added = self.apply_evolution().await?;
        info!(added, "schema up to date");
        Ok(added)
    }
}

/// Identifiers are spliced into DDL, so only plain SQL names pass.
fn check_identifier(name: &str) -> Result<(), TrackerError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TrackerError::InvalidInput("table and column names must be plain identifiers"))
    }
}

/// A column declaration: one or more type-name words, optionally followed by
/// `DEFAULT` and a single literal (number, `NULL`, or a quoted string without
/// embedded quotes).
fn check_declaration(decl: &str) -> Result<(), TrackerError> {
    let invalid = || {
        TrackerError::InvalidInput(
            "column declaration must be a type name with an optional literal default",
        )
    };

    let upper = decl.to_ascii_uppercase();
    let (type_part, default_part) = match upper.find(" DEFAULT ") {
        Some(at) => (&decl[..at], Some(decl[at + " DEFAULT ".len()..].trim())),
        None => (decl, None),
    };

    let mut words = type_part.split_whitespace().peekable();
    if words.peek().is_none() {
        return Err(invalid());
    }
    for word in words {
        if word.eq_ignore_ascii_case("DEFAULT") {
            return Err(invalid());
        }
        check_identifier(word).map_err(|_| invalid())?;
    }

    match default_part {
        None => Ok(()),
        Some(literal) if is_literal(literal) => Ok(()),
        Some(_) => Err(invalid()),
    }
}

fn is_literal(value: &str) -> bool {
    if value.eq_ignore_ascii_case("NULL") {
        return true;
    }
    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return !inner.contains('\'');
    }
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits != "."
}

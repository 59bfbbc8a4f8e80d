use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TrackerError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("wiki page already exists: {0}")]
    DuplicatePage(String),

    #[error("record store {url} unavailable: {reason}")]
    StorageUnavailable { url: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl TrackerError {
    /// Whether the underlying store rejected a write on a UNIQUE or PRIMARY KEY constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, TrackerError::Database(SqlxError::Database(db)) if db.is_unique_violation())
    }

    /// Whether SQLite reported the file itself as unreadable (`SQLITE_CORRUPT`, `SQLITE_NOTADB`).
    pub fn is_unreadable_store(&self) -> bool {
        match self {
            TrackerError::Database(SqlxError::Database(db)) => db
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                // extended result codes keep the primary code in the low byte
                .is_some_and(|code| matches!(code & 0xff, 11 | 26)),
            _ => false,
        }
    }
}

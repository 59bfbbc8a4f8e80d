use crate::db::migrate::SchemaManager;
use crate::db::models::{Issue, IssueFields, WikiPage};
use crate::error::TrackerError;
use chrono::Local;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// `created_at` format shown in the issue list.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

const ISSUE_COLUMNS: &str = "id, subject, status, priority, description, created_at, \
     tracker, assignee, start_date, due_date, percent_done, estimated_hours, created_by";

/// Handle on the local record store. Opened once at startup and kept for the
/// life of the process; clones share the same single connection.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open (creating if missing) the store at `database_url` and bring its schema up to date.
    pub async fn open(database_url: &str) -> Result<Self, TrackerError> {
        let unavailable = |e: sqlx::Error| TrackerError::StorageUnavailable {
            url: database_url.to_string(),
            reason: e.to_string(),
        };

        let connect_opts = SqliteConnectOptions::from_str(database_url)
            .map_err(unavailable)?
            .create_if_missing(true);
        // One connection for the whole session; an in-memory store lives as long as it does.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await
            .map_err(unavailable)?;

        let store = Self::new(pool);
        // a file that is not a database only fails once the first statement runs
        store.schema().migrate().await.map_err(|e| {
            if e.is_unreadable_store() {
                TrackerError::StorageUnavailable {
                    url: database_url.to_string(),
                    reason: e.to_string(),
                }
            } else {
                e
            }
        })?;
        info!(database_url, "record store ready");
        Ok(store)
    }

    /// Wrap an existing pool without touching its schema.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn schema(&self) -> SchemaManager<'_> {
        SchemaManager::new(&self.pool)
    }

    /// Insert a new issue stamped with the current local time.
    /// An empty subject is silently ignored and yields `None`.
    pub async fn create_issue(
        &self,
        fields: &IssueFields,
        created_by: Option<&str>,
    ) -> Result<Option<i64>, TrackerError> {
        if fields.subject.is_empty() {
            debug!("ignoring issue without subject");
            return Ok(None);
        }
        let created_at = Local::now().format(CREATED_AT_FORMAT).to_string();

        let res = sqlx::query(
            r#"
            INSERT INTO issues (
                subject, status, priority, description, created_at,
                tracker, assignee, start_date, due_date,
                percent_done, estimated_hours, created_by
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.subject)
        .bind(&fields.status)
        .bind(&fields.priority)
        .bind(&fields.description)
        .bind(&created_at)
        .bind(&fields.tracker)
        .bind(&fields.assignee)
        .bind(&fields.start_date)
        .bind(&fields.due_date)
        .bind(fields.percent_done)
        .bind(fields.estimated_hours)
        .bind(created_by)
        .execute(&self.pool)
        .await?;

        let id = res.last_insert_rowid();
        debug!(id, subject = %fields.subject, "created issue");
        Ok(Some(id))
    }

    /// Overwrite every editable field of issue `id`.
    /// Returns `false` when no such issue exists; that case is not an error.
    pub async fn update_issue(&self, id: i64, fields: &IssueFields) -> Result<bool, TrackerError> {
        let res = sqlx::query(
            r#"UPDATE issues SET
                subject = ?,
                status = ?,
                priority = ?,
                description = ?,
                tracker = ?,
                assignee = ?,
                start_date = ?,
                due_date = ?,
                percent_done = ?,
                estimated_hours = ?
              WHERE id = ?"#,
        )
        .bind(&fields.subject)
        .bind(&fields.status)
        .bind(&fields.priority)
        .bind(&fields.description)
        .bind(&fields.tracker)
        .bind(&fields.assignee)
        .bind(&fields.start_date)
        .bind(&fields.due_date)
        .bind(fields.percent_done)
        .bind(fields.estimated_hours)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let touched = res.rows_affected() > 0;
        debug!(id, touched, "updated issue");
        Ok(touched)
    }

    pub async fn get_issue(&self, id: i64) -> Result<Option<Issue>, TrackerError> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?");
        let issue = sqlx::query_as::<_, Issue>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(issue)
    }

    /// All issues, newest first.
    pub async fn list_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues ORDER BY id DESC");
        let issues = sqlx::query_as::<_, Issue>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(issues)
    }

    /// Create an empty page. Fails with `DuplicatePage` if the title is taken;
    /// an empty title is ignored and yields `None`.
    pub async fn create_wiki_page(&self, title: &str) -> Result<Option<i64>, TrackerError> {
        if title.is_empty() {
            return Ok(None);
        }
        let res = sqlx::query("INSERT INTO wiki (title, content) VALUES (?, '')")
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(TrackerError::from)
            .map_err(|e| {
                if e.is_unique_violation() {
                    TrackerError::DuplicatePage(title.to_string())
                } else {
                    e
                }
            })?;
        let id = res.last_insert_rowid();
        debug!(id, title, "created wiki page");
        Ok(Some(id))
    }

    /// Upsert by unique title. Returns the row id, or `None` for an empty title.
    /// Uses SQLite `INSERT ... ON CONFLICT(title) DO UPDATE`.
    pub async fn upsert_wiki_page(
        &self,
        title: &str,
        content: &str,
        editor: Option<&str>,
    ) -> Result<Option<i64>, TrackerError> {
        if title.is_empty() {
            debug!("ignoring wiki save without title");
            return Ok(None);
        }
        sqlx::query(
            r#"
            INSERT INTO wiki (title, content, updated_by) VALUES (?, ?, ?)
            ON CONFLICT(title) DO UPDATE SET
                content=excluded.content,
                updated_by=excluded.updated_by
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(editor)
        .execute(&self.pool)
        .await?;

        // last_insert_rowid is stale after the update branch
        let rec: (i64,) = sqlx::query_as("SELECT id FROM wiki WHERE title = ?")
            .bind(title)
            .fetch_one(&self.pool)
            .await?;
        debug!(id = rec.0, title, editor, "saved wiki page");
        Ok(Some(rec.0))
    }

    pub async fn get_wiki_page(&self, title: &str) -> Result<Option<WikiPage>, TrackerError> {
        let page = sqlx::query_as::<_, WikiPage>(
            "SELECT id, title, content, updated_by FROM wiki WHERE title = ?",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(page)
    }

    /// All pages in whatever order SQLite returns them.
    pub async fn list_wiki_pages(&self) -> Result<Vec<WikiPage>, TrackerError> {
        let pages = sqlx::query_as::<_, WikiPage>("SELECT id, title, content, updated_by FROM wiki")
            .fetch_all(&self.pool)
            .await?;
        Ok(pages)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbUser {
    pub username: String,
    pub password_hash: String,
}

/// One row of `issues`. Columns added by later releases are `None` on rows
/// written before they existed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Issue {
    pub id: i64,
    pub subject: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub tracker: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub percent_done: Option<i64>,
    pub estimated_hours: Option<f64>,
    pub created_by: Option<String>,
}

/// Editable part of an issue, as a form would submit it.
///
/// Storage does not validate `status`, `priority` or `tracker` against any
/// enumerated set, and `percent_done` is stored as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueFields {
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub description: String,
    pub tracker: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub percent_done: Option<i64>,
    pub estimated_hours: Option<f64>,
}

impl IssueFields {
    pub fn new(
        subject: impl Into<String>,
        status: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            status: status.into(),
            priority: priority.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<Issue> for IssueFields {
    fn from(i: Issue) -> Self {
        Self {
            subject: i.subject.unwrap_or_default(),
            status: i.status.unwrap_or_default(),
            priority: i.priority.unwrap_or_default(),
            description: i.description.unwrap_or_default(),
            tracker: i.tracker,
            assignee: i.assignee,
            start_date: i.start_date,
            due_date: i.due_date,
            percent_done: i.percent_done,
            estimated_hours: i.estimated_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct WikiPage {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub updated_by: Option<String>,
}

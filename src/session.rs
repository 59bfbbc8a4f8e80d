use crate::db::models::IssueFields;
use crate::db::sqlite::RecordStore;
use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// Screens reachable once logged in. Being logged out is the absence of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Issues,
    Wiki,
}

/// Context for one logged-in user. Obtained from
/// [`CredentialStore::authenticate`](crate::service::CredentialStore::authenticate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    screen: Screen,
}

impl Session {
    pub(crate) fn new(username: String) -> Self {
        Self {
            username,
            screen: Screen::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn show(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Create an issue attributed to this session's user.
    pub async fn create_issue(
        &self,
        store: &RecordStore,
        fields: &IssueFields,
    ) -> Result<Option<i64>, TrackerError> {
        store.create_issue(fields, Some(self.username.as_str())).await
    }

    /// Save a wiki page with this session's user as the editor.
    pub async fn save_wiki_page(
        &self,
        store: &RecordStore,
        title: &str,
        content: &str,
    ) -> Result<Option<i64>, TrackerError> {
        store
            .upsert_wiki_page(title, content, Some(self.username.as_str()))
            .await
    }
}

pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod session;

pub use db::{Issue, IssueFields, RecordStore, WikiPage};
pub use error::TrackerError;
pub use service::CredentialStore;
pub use session::{Screen, Session};

pub mod credentials;

pub use credentials::{CredentialStore, hash_password};

use redmine_lite::service::hash_password;
use redmine_lite::{CredentialStore, RecordStore, Screen, TrackerError};

async fn fresh_store() -> RecordStore {
    RecordStore::open("sqlite::memory:")
        .await
        .expect("failed to open in-memory store")
}

#[tokio::test]
async fn register_then_authenticate_succeeds() {
    let store = fresh_store().await;
    let creds = CredentialStore::new(&store);

    creds.register("alice", "s3cret").await.expect("register");
    let session = creds
        .authenticate("alice", "s3cret")
        .await
        .expect("login with registered pair");

    assert_eq!(session.username(), "alice");
    assert_eq!(session.screen(), Screen::Issues);
}

#[tokio::test]
async fn stored_password_is_the_digest_not_the_plaintext() {
    let store = fresh_store().await;
    CredentialStore::new(&store)
        .register("alice", "s3cret")
        .await
        .unwrap();

    let (stored,): (String,) =
        sqlx::query_as("SELECT password_hash FROM users WHERE username = 'alice'")
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_ne!(stored, "s3cret");
    assert_eq!(stored, hash_password("s3cret"));
}

#[tokio::test]
async fn duplicate_username_is_rejected_regardless_of_password() {
    let store = fresh_store().await;
    let creds = CredentialStore::new(&store);
    creds.register("bob", "first").await.unwrap();

    for password in ["first", "second"] {
        let err = creds.register("bob", password).await.unwrap_err();
        assert!(
            matches!(&err, TrackerError::DuplicateUser(name) if name == "bob"),
            "{err:?}"
        );
    }

    // original password still works
    creds.authenticate("bob", "first").await.unwrap();
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let store = fresh_store().await;
    let creds = CredentialStore::new(&store);
    creds.register("carol", "pw").await.unwrap();
    creds.register("Carol", "other").await.unwrap();

    creds.authenticate("Carol", "other").await.unwrap();
    let err = creds.authenticate("Carol", "pw").await.unwrap_err();
    assert!(matches!(err, TrackerError::InvalidCredentials));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_fail_the_same_way() {
    let store = fresh_store().await;
    let creds = CredentialStore::new(&store);
    creds.register("dave", "correct").await.unwrap();

    let wrong = creds.authenticate("dave", "incorrect").await.unwrap_err();
    let unknown = creds.authenticate("nobody", "correct").await.unwrap_err();

    assert!(matches!(wrong, TrackerError::InvalidCredentials));
    assert!(matches!(unknown, TrackerError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn empty_fields_are_rejected_before_storage() {
    let store = fresh_store().await;
    let creds = CredentialStore::new(&store);

    for (user, pass) in [("", "pw"), ("erin", ""), ("", "")] {
        let err = creds.register(user, pass).await.unwrap_err();
        assert!(matches!(err, TrackerError::InvalidInput(_)), "{err:?}");
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);

    let err = creds.authenticate("", "").await.unwrap_err();
    assert!(matches!(err, TrackerError::InvalidCredentials));
}

use mimalloc::MiMalloc;
use redmine_lite::RecordStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &redmine_lite::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(database_url = %cfg.database_url, loglevel = %cfg.loglevel);

    // Startup sequence a front end runs before showing the login screen.
    let store = RecordStore::open(&cfg.database_url).await?;
    let issues = store.list_issues().await?;
    let pages = store.list_wiki_pages().await?;
    info!(
        issues = issues.len(),
        wiki_pages = pages.len(),
        "record store opened"
    );
    if let Some(latest) = issues.first() {
        info!(
            id = latest.id,
            subject = latest.subject.as_deref().unwrap_or(""),
            created_at = latest.created_at.as_deref().unwrap_or(""),
            "latest issue"
        );
    }
    Ok(())
}

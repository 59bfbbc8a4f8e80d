use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::TrackerError;

/// Default on-disk record store, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:redmine_lite.db";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `REDMINE_*` environment variables.
    pub fn load() -> Result<Self, TrackerError> {
        Ok(Self::figment().extract()?)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("REDMINE_"))
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| {
        eprintln!("invalid configuration, falling back to defaults: {e}");
        Config::default()
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_file() {
        let cfg: Config = Config::figment().extract().expect("defaults extract");
        assert!(cfg.database_url.starts_with("sqlite:"));
        assert!(!cfg.loglevel.is_empty());
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REDMINE_DATABASE_URL", "sqlite::memory:");
            jail.set_env("REDMINE_LOGLEVEL", "debug");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database_url, "sqlite::memory:");
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }
}

//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable prefix, e.g. `SGF_DATABASE_URL`.
pub const ENV_PREFIX: &str = "SGF";

#[derive(Clone, Debug, Deserialize)]
/// Settings needed to open the client store.
pub struct StoreConfig {
    /// SQLite database path or URL backing the durable storage.
    pub database_url: String,
    /// Install the demo dataset when no snapshot has been saved yet.
    #[serde(default = "default_seed_when_empty")]
    pub seed_when_empty: bool,
}

fn default_seed_when_empty() -> bool {
    true
}

impl StoreConfig {
    /// Loads `.env`, then the optional YAML file at `path`, then `SGF_*`
    /// environment variables (highest precedence).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_yaml_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "database_url: sgf.db\n").unwrap();

        let config = Config::builder()
            .add_source(File::from(path.as_path()))
            .build()
            .unwrap()
            .try_deserialize::<StoreConfig>()
            .unwrap();

        assert_eq!(config.database_url, "sgf.db");
        assert!(config.seed_when_empty);
    }

    // The only test reading `SGF_*` variables.
    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "database_url: from_file.db\nseed_when_empty: true\n").unwrap();
        let path = path.to_str().unwrap();
        let absent = dir.path().join("absent.yaml");

        // no file and no `SGF_DATABASE_URL`: the url is missing
        assert!(StoreConfig::load(absent.to_str().unwrap()).is_err());

        let from_file = StoreConfig::load(path).unwrap();
        assert_eq!(from_file.database_url, "from_file.db");
        assert!(from_file.seed_when_empty);

        unsafe {
            std::env::set_var("SGF_DATABASE_URL", "from_env.db");
            std::env::set_var("SGF_SEED_WHEN_EMPTY", "false");
        }
        let overridden = StoreConfig::load(path);
        unsafe {
            std::env::remove_var("SGF_DATABASE_URL");
            std::env::remove_var("SGF_SEED_WHEN_EMPTY");
        }

        let overridden = overridden.unwrap();
        assert_eq!(overridden.database_url, "from_env.db");
        assert!(!overridden.seed_when_empty);
    }
}

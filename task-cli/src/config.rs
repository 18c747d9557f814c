use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use todo_list::store::DEFAULT_STORAGE_KEY;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "todo.toml";
/// Prefix of the environment variables overriding the config file.
pub const ENV_PREFIX: &str = "TODO";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads `todo.toml` if present, then applies `TODO_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(
            Path::new(CONFIG_FILE),
            config::Environment::with_prefix(ENV_PREFIX),
        )
    }

    pub fn load_with(file: &Path, environment: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".todo")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

use crate::models::CheckpointDefinition;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    pub courses: CourseSettings,
    /// Race categories with their provider endpoints and checkpoint
    /// definitions. Owned by the external admin tooling; this service
    /// only reads them.
    #[serde(default)]
    pub categories: Vec<CategorySettings>,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimingSettings {
    pub fetch_timeout_secs: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
    pub max_cached_categories: Option<u64>,
    pub refresh_queue_depth: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseSettings {
    /// Directory holding one GPX file per course, named {course_id}.gpx
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySettings {
    pub id: String,
    pub name: String,
    pub endpoint_url: String,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with RACEBOARD_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with RACEBOARD_)
            // e.g., RACEBOARD_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("RACEBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("RACEBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Look up a configured category by id
    pub fn category(&self, id: &str) -> Option<&CategorySettings> {
        self.categories.iter().find(|c| c.id == id)
    }
}

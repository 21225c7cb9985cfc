//! Application configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`moodcomic.toml` shipped with the crate)
//! 2. `~/.config/moodcomic/moodcomic.toml`
//! 3. `./moodcomic.toml`, or the file given with `--config`
//! 4. `MOODCOMIC__<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use moodcomic_cache::CacheConfig;
use moodcomic_core::CostModel;
use moodcomic_error::ConfigError;
use moodcomic_models::OpenAiConfig;
use moodcomic_panels::SynthesisSettings;
use moodcomic_rate_limit::RetryPolicy;
use moodcomic_story::StorySettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../moodcomic.toml");

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ServerSettings {
    /// Listen address
    #[serde(default = "default_bind")]
    bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AppConfig {
    /// HTTP server
    #[serde(default)]
    server: ServerSettings,
    /// Model provider connection
    #[serde(default)]
    provider: OpenAiConfig,
    /// Story generation tuning
    #[serde(default)]
    story: StorySettings,
    /// Image and audio synthesis
    #[serde(default)]
    synthesis: SynthesisSettings,
    /// Synthesis cache
    #[serde(default)]
    cache: CacheConfig,
    /// Retry policy shared by every model call
    #[serde(default)]
    retry: RetryPolicy,
    /// Cost estimate coefficients
    #[serde(default)]
    cost: CostModel,
    /// Story generation deadline in seconds, 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    90
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            provider: OpenAiConfig::default(),
            story: StorySettings::default(),
            synthesis: SynthesisSettings::default(),
            cache: CacheConfig::default(),
            retry: RetryPolicy::default(),
            cost: CostModel::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from every source.
    ///
    /// An explicit `path` replaces `./moodcomic.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the merged result does
    /// not deserialize.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration");

        let mut builder = Self::defaults();

        if let Some(dir) = dirs::config_dir() {
            let user_config = dir.join("moodcomic").join("moodcomic.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("moodcomic").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("MOODCOMIC")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Parse a TOML document layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or has values of
    /// the wrong type.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Story generation deadline, `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Replace the server listen address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }
}

//! Runtime configuration and wiring.

use crate::generator::ArtifactGenerator;
use crate::orchestrator::Orchestrator;
use crate::preference::{PreferenceError, PreferenceStore};
use openrouter::{OpenRouter, API_KEY_VAR};
use std::path::PathBuf;
use thiserror::Error;

/// Overrides the OpenRouter endpoint, mainly for local proxies and tests.
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";

/// Default directory holding the structure templates.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Errors from building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY not found. Please add it to your .env file or environment.")]
    MissingApiKey,

    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

/// Everything needed to run generations.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// OpenRouter API key.
    pub api_key: String,

    /// Custom API base URL.
    pub base_url: Option<String>,

    /// Directory containing `<kind>.json` structure templates.
    pub data_dir: PathBuf,

    /// Directory under which per-idea output directories are created.
    pub output_root: PathBuf,

    /// Preference file location.
    pub preferences_path: PathBuf,
}

impl ForgeConfig {
    /// Create a config with the given API key and default locations.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let preferences_path =
            PreferenceStore::default_path().ok_or(PreferenceError::NoHomeDir)?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_root: PathBuf::from("."),
            preferences_path,
        })
    }

    /// Read the API key and optional base URL from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key)?;
        if let Some(url) = std::env::var(BASE_URL_VAR).ok().filter(|u| !u.is_empty()) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_root = dir.into();
        self
    }

    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = path.into();
        self
    }

    pub fn client(&self) -> OpenRouter {
        let client = OpenRouter::new(&self.api_key);
        match &self.base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }

    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(&self.preferences_path)
    }

    /// Wire the OpenRouter client, preference store and generator together.
    pub fn orchestrator(&self) -> Orchestrator<OpenRouter> {
        let generator = ArtifactGenerator::new(self.client(), self.preference_store());
        Orchestrator::new(generator, &self.data_dir, &self.output_root)
    }
}

//! Persisted model preference.
//!
//! A single JSON object `{ "model": "<id>" }` kept in a per-user file.
//! Reading never fails: a missing, unreadable or malformed file yields the
//! default model. Writing reports its failures to the caller.

use crate::catalog::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// File name of the preference file inside the home directory.
pub const PREFERENCE_FILE: &str = ".ijismithrc";

/// Errors from preference operations.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The user's saved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Provider-qualified model id.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Preference {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

/// Reads and writes the preference file.
///
/// The store is passed explicitly to whatever needs it; nothing reaches for
/// the file on its own.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// A store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store backed by `~/.ijismithrc`.
    pub fn in_home_dir() -> Result<Self, PreferenceError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(PreferenceError::NoHomeDir)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(PREFERENCE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the preference, falling back to the default on any problem.
    pub async fn load(&self) -> Preference {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), error = %e, "preference file unreadable, using default");
                }
                return Preference::default();
            }
        };

        match serde_json::from_str::<Preference>(&content) {
            Ok(pref) if !pref.model.trim().is_empty() => pref,
            Ok(_) => Preference::default(),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "preference file malformed, using default");
                Preference::default()
            }
        }
    }

    /// Overwrite the preference file.
    ///
    /// The content goes to a sibling temporary file first and is renamed
    /// over the target, so a failed write leaves the old file intact.
    pub async fn save(&self, preference: &Preference) -> Result<(), PreferenceError> {
        let content = serde_json::to_string_pretty(preference)?;
        let tmp = self.temp_path();

        let write_err = |source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        };

        fs::write(&tmp, content).await.map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| PREFERENCE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

//! Generation of a single artifact.
//!
//! The generator loads the current model preference, builds the prompt,
//! streams the completion and hands back the cleaned text. Each fragment goes
//! to two independent consumers: the echo sink (live feedback on stdout by
//! default) and the accumulated result.

use crate::artifact::{strip_fences, ArtifactKind};
use crate::completion::{CompletionClient, CompletionError};
use crate::preference::PreferenceStore;
use crate::prompt;
use futures::StreamExt;
use std::io::{self, Write};
use thiserror::Error;

/// Errors from generating one artifact.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("the model returned no content")]
    EmptyResponse,
}

/// Generates one artifact at a time.
pub struct ArtifactGenerator<C> {
    client: C,
    preferences: PreferenceStore,
    echo: Box<dyn Write + Send>,
}

impl<C: CompletionClient> ArtifactGenerator<C> {
    /// Create a generator that echoes fragments to stdout.
    pub fn new(client: C, preferences: PreferenceStore) -> Self {
        Self {
            client,
            preferences,
            echo: Box::new(io::stdout()),
        }
    }

    /// Send streamed fragments somewhere other than stdout.
    pub fn with_echo(mut self, echo: impl Write + Send + 'static) -> Self {
        self.echo = Box::new(echo);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Generate one artifact, or `None` if anything went wrong.
    ///
    /// Failures are logged here and never propagate, so one failing kind
    /// cannot stop the others.
    pub async fn generate(
        &mut self,
        idea: &str,
        kind: ArtifactKind,
        structure: &str,
        history: &[String],
    ) -> Option<String> {
        let file = kind.file_name();
        tracing::info!("Generating {file}...");

        match self.try_generate(idea, kind, structure, history).await {
            Ok(text) => {
                tracing::info!("Finished generating {file}.");
                Some(text)
            }
            Err(e) => {
                tracing::error!("Failed to generate {file}: {e}");
                None
            }
        }
    }

    /// Generate one artifact, returning the failure instead of logging it.
    pub async fn try_generate(
        &mut self,
        idea: &str,
        kind: ArtifactKind,
        structure: &str,
        history: &[String],
    ) -> Result<String, GenerateError> {
        let model = self.preferences.load().await.model;
        let prompt = prompt::build(idea, history, kind, structure);
        tracing::debug!(%model, kind = %kind, prompt_len = prompt.len(), "requesting completion");

        let mut fragments = self.client.complete(&model, &prompt).await?;
        let mut full = String::new();

        let result = loop {
            match fragments.next().await {
                Some(Ok(fragment)) => {
                    self.echo_fragment(&fragment);
                    full.push_str(&fragment);
                }
                Some(Err(e)) => break Err(e),
                None => break Ok(()),
            }
        };
        self.echo_fragment("\n");
        result?;

        let cleaned = strip_fences(&full);
        if cleaned.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }
        Ok(cleaned)
    }

    fn echo_fragment(&mut self, fragment: &str) {
        let written = self
            .echo
            .write_all(fragment.as_bytes())
            .and_then(|_| self.echo.flush());
        if let Err(e) = written {
            // Live output is best effort; the accumulated text is what counts.
            tracing::debug!(error = %e, "failed to echo fragment");
        }
    }
}

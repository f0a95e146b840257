//! Runs the generator over every artifact kind for one idea.

use crate::artifact::{output_dir_name, ArtifactKind};
use crate::completion::CompletionClient;
use crate::generator::ArtifactGenerator;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What happened to one artifact kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was written to this path.
    Written(PathBuf),
    /// The structure template could not be read; the kind was skipped.
    TemplateUnreadable(String),
    /// Generation failed; nothing was written.
    GenerationFailed,
    /// The generated text could not be written.
    WriteFailed(String),
}

/// Per-kind outcomes of one run. Kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Output directory, if it could be created.
    pub output_dir: Option<PathBuf>,
    pub outcomes: Vec<(ArtifactKind, Outcome)>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Written(_)))
            .map(|(kind, _)| *kind)
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn outcome(&self, kind: ArtifactKind) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }
}

/// Generates all artifacts for an idea.
pub struct Orchestrator<C> {
    generator: ArtifactGenerator<C>,
    data_dir: PathBuf,
    output_root: PathBuf,
}

impl<C: CompletionClient> Orchestrator<C> {
    /// Templates are read from `data_dir`, output lands under `output_root`.
    pub fn new(
        generator: ArtifactGenerator<C>,
        data_dir: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            data_dir: data_dir.into(),
            output_root: output_root.into(),
        }
    }

    pub fn generator(&self) -> &ArtifactGenerator<C> {
        &self.generator
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Directory an idea's artifacts are written to.
    pub fn output_dir_for(&self, idea: &str) -> PathBuf {
        self.output_root.join(output_dir_name(idea))
    }

    /// Generate every artifact kind for `idea`.
    ///
    /// Never fails: problems are logged and recorded in the report. A
    /// directory that cannot be created ends the run before any kind is
    /// attempted; anything else only affects its own kind.
    pub async fn generate_all(&mut self, idea: &str, history: &[String]) -> GenerationReport {
        let output_dir = self.output_dir_for(idea);
        let mut report = GenerationReport::default();

        if let Err(e) = fs::create_dir_all(&output_dir).await {
            tracing::error!("Failed to create directory {}: {e}", output_dir.display());
            return report;
        }
        report.output_dir = Some(output_dir.clone());

        for kind in ArtifactKind::ALL {
            let outcome = self.generate_one(idea, kind, history, &output_dir).await;
            report.outcomes.push((kind, outcome));
        }

        tracing::info!(
            "Game structure for \"{idea}\" generated in {} ({} of {} files written)",
            output_dir.display(),
            report.written_count(),
            ArtifactKind::ALL.len()
        );
        report
    }

    async fn generate_one(
        &mut self,
        idea: &str,
        kind: ArtifactKind,
        history: &[String],
        output_dir: &Path,
    ) -> Outcome {
        let file = kind.file_name();
        let template_path = self.data_dir.join(&file);

        let structure = match fs::read_to_string(&template_path).await {
            Ok(structure) => structure,
            Err(e) => {
                tracing::error!(
                    "Failed to process {file}: cannot read template {}: {e}",
                    template_path.display()
                );
                return Outcome::TemplateUnreadable(e.to_string());
            }
        };

        let Some(text) = self.generator.generate(idea, kind, &structure, history).await else {
            return Outcome::GenerationFailed;
        };

        let output_path = output_dir.join(&file);
        match fs::write(&output_path, text).await {
            Ok(()) => {
                tracing::info!("Successfully wrote {file} to {}", output_path.display());
                Outcome::Written(output_path)
            }
            Err(e) => {
                tracing::error!("Failed to write {}: {e}", output_path.display());
                Outcome::WriteFailed(e.to_string())
            }
        }
    }
}

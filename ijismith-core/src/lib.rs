//! Game world forging from a one-line idea.
//!
//! This crate provides:
//! - Prompt construction from an idea, earlier ideas and a structure template
//! - Streaming generation through OpenRouter, with live echo of each fragment
//! - One output directory per idea holding `story`, `characters`, `items`
//!   and `npcs` JSON
//! - A persisted model preference and the interactive session around it
//!
//! # Quick Start
//!
//! ```ignore
//! use ijismith_core::ForgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ForgeConfig::from_env()?.with_output_root("games");
//!     let mut orchestrator = config.orchestrator();
//!
//!     let report = orchestrator.generate_all("a haunted lighthouse", &[]).await;
//!     println!("{} files written", report.written_count());
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod generator;
pub mod orchestrator;
pub mod preference;
pub mod prompt;
pub mod session;
pub mod testing;

// Primary public API
pub use artifact::{output_dir_name, strip_fences, ArtifactKind};
pub use catalog::{CatalogEntry, DEFAULT_MODEL, MODEL_CATALOG};
pub use completion::{CompletionClient, CompletionError, FragmentStream};
pub use config::{ConfigError, ForgeConfig};
pub use generator::{ArtifactGenerator, GenerateError};
pub use orchestrator::{GenerationReport, Orchestrator, Outcome};
pub use preference::{Preference, PreferenceError, PreferenceStore};
pub use session::{Command, LineSource, ModelPicker, Session, SessionError, SessionState, FAREWELL};
pub use testing::{MockCompletion, ScriptedLines, ScriptedPicker, SharedBuffer};

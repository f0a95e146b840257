//! ijismith: forge a game world from a single idea.
//!
//! Each idea becomes a directory of `story`, `characters`, `items` and `npcs`
//! JSON files, generated through OpenRouter from the templates in `data/`.
//!
//! ```bash
//! ijismith                                   # Interactive session
//! ijismith generate "a haunted lighthouse"   # One idea, then exit
//! ```

mod logging;
mod terminal;

use clap::{Parser, Subcommand};
use console::style;
use ijismith_core::config::DEFAULT_DATA_DIR;
use ijismith_core::{ForgeConfig, Session};
use std::path::PathBuf;

use terminal::{MenuPicker, StdinLines};

#[derive(Debug, Parser)]
#[command(name = "ijismith", version)]
#[command(about = "A CLI for brainstorming and structuring game ideas")]
struct Cli {
    /// Directory holding the structure templates
    #[arg(long, global = true, env = "IJISMITH_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory under which each idea's folder is created
    #[arg(long, global = true, env = "IJISMITH_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Model preference file (defaults to ~/.ijismithrc)
    #[arg(long, global = true, env = "IJISMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the interactive session
    Run,

    /// Generate a game structure from an idea
    Generate {
        /// The game idea; starts the interactive session when omitted
        idea: Option<String>,
    },
}

impl Cli {
    /// Layer command line options over the environment configuration.
    fn apply(&self, mut config: ForgeConfig) -> ForgeConfig {
        config = config
            .with_data_dir(&self.data_dir)
            .with_output_root(&self.output_dir);
        if let Some(path) = &self.config {
            config = config.with_preferences_path(path);
        }
        config
    }

    /// The idea for a single generation pass. A missing or blank idea means
    /// the interactive session.
    fn one_shot_idea(&self) -> Option<&str> {
        match &self.command {
            Some(Commands::Generate { idea: Some(idea) }) if !idea.trim().is_empty() => {
                Some(idea.as_str())
            }
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match ForgeConfig::from_env() {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("{}", style(e).red());
            std::process::exit(1);
        }
    };

    tracing::debug!(
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_root.display(),
        preferences = %config.preferences_path.display(),
        "resolved configuration"
    );

    match cli.one_shot_idea() {
        Some(idea) => {
            config.orchestrator().generate_all(idea, &[]).await;
        }
        None => run_session(config).await?,
    }

    Ok(())
}

async fn run_session(config: ForgeConfig) -> anyhow::Result<()> {
    let model = config.preference_store().load().await.model;
    terminal::print_banner(&model);

    let mut session = Session::new(config.orchestrator(), StdinLines::new(), MenuPicker);
    session.run().await?;
    Ok(())
}

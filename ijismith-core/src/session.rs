//! The interactive session.
//!
//! A small state machine driven one line at a time:
//!
//! ```text
//! Idle --"exit" / end of input--> Closed
//! Idle --"model"--> SelectingModel --> Idle
//! Idle --idea--> Generating --> Idle   (idea appended to history)
//! Idle --blank--> Idle
//! ```
//!
//! The next line is only read once the previous one has been fully handled,
//! so two generations never overlap.

use crate::catalog::{self, CatalogEntry, MODEL_CATALOG};
use crate::completion::CompletionClient;
use crate::orchestrator::Orchestrator;
use crate::preference::{Preference, PreferenceStore};
use async_trait::async_trait;
use std::io;
use thiserror::Error;

pub const FAREWELL: &str = "Exiting ijismith. Happy game making!";

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}

/// Where the session gets its lines from.
#[async_trait]
pub trait LineSource: Send {
    /// The next line, or `None` at end of input.
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Presents the model catalog and returns the chosen index.
pub trait ModelPicker: Send {
    /// `Ok(None)` means the user backed out without choosing.
    fn pick(&mut self, catalog: &[CatalogEntry], current: Option<usize>) -> io::Result<Option<usize>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Generating,
    SelectingModel,
    Closed,
}

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    SelectModel,
    Generate(String),
    Blank,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        if input.is_empty() {
            Command::Blank
        } else if input.eq_ignore_ascii_case("exit") {
            Command::Exit
        } else if input.eq_ignore_ascii_case("model") {
            Command::SelectModel
        } else {
            Command::Generate(input.to_string())
        }
    }
}

pub struct Session<C, L, P> {
    orchestrator: Orchestrator<C>,
    preferences: PreferenceStore,
    lines: L,
    picker: P,
    history: Vec<String>,
    state: SessionState,
}

impl<C, L, P> Session<C, L, P>
where
    C: CompletionClient,
    L: LineSource,
    P: ModelPicker,
{
    /// Model selection writes through the same preference store the
    /// orchestrator's generator reads from.
    pub fn new(orchestrator: Orchestrator<C>, lines: L, picker: P) -> Self {
        let preferences = orchestrator.generator().preferences().clone();
        Self {
            orchestrator,
            preferences,
            lines,
            picker,
            history: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ideas submitted so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn orchestrator(&self) -> &Orchestrator<C> {
        &self.orchestrator
    }

    /// Read and handle lines until the session closes.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        while self.state != SessionState::Closed {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    self.handle_line(&line).await;
                }
                Ok(None) => self.close(),
                Err(e) => {
                    self.close();
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Handle one line of input and return the state it leaves the session in.
    pub async fn handle_line(&mut self, line: &str) -> SessionState {
        if self.state == SessionState::Closed {
            return self.state;
        }

        match Command::parse(line) {
            Command::Exit => self.close(),
            Command::SelectModel => self.select_model().await,
            Command::Generate(idea) => self.generate(idea).await,
            Command::Blank => {}
        }
        self.state
    }

    async fn generate(&mut self, idea: String) {
        self.state = SessionState::Generating;
        self.orchestrator.generate_all(&idea, &self.history).await;
        // Even a fully failed run becomes context for the next idea.
        self.history.push(idea);
        self.state = SessionState::Idle;
    }

    async fn select_model(&mut self) {
        self.state = SessionState::SelectingModel;

        let current = catalog::position_of(&self.preferences.load().await.model);
        match self.picker.pick(MODEL_CATALOG, current) {
            Ok(Some(index)) => match MODEL_CATALOG.get(index) {
                Some(entry) => match self.preferences.save(&Preference::new(entry.id)).await {
                    Ok(()) => println!("Model set to: {}", entry.name),
                    Err(e) => tracing::error!("Failed to save model preference: {e}"),
                },
                None => tracing::error!("Model selection returned an unknown entry ({index})"),
            },
            Ok(None) => println!("Model selection cancelled."),
            Err(e) => tracing::error!("Model selection failed: {e}"),
        }

        // Selecting a model never ends the session.
        self.state = SessionState::Idle;
    }

    fn close(&mut self) {
        if self.state != SessionState::Closed {
            println!("{FAREWELL}");
            self.state = SessionState::Closed;
        }
    }
}

//! Test doubles for running the pipeline without a network or terminal.
//!
//! - `MockCompletion` returns scripted text and records every call
//! - `ScriptedLines` feeds the session a fixed list of lines
//! - `ScriptedPicker` answers model menus from a queue
//! - `SharedBuffer` captures echoed fragments

use crate::artifact::ArtifactKind;
use crate::catalog::CatalogEntry;
use crate::completion::{CompletionClient, CompletionError, FragmentStream};
use crate::session::{LineSource, ModelPicker};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Fragment size used when replaying a scripted response.
const FRAGMENT_CHARS: usize = 7;

/// One recorded completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCall {
    pub model: String,
    pub prompt: String,
}

impl CompletionCall {
    /// The artifact kind this prompt asks for.
    pub fn kind(&self) -> Option<ArtifactKind> {
        kind_in_prompt(&self.prompt)
    }
}

fn kind_in_prompt(prompt: &str) -> Option<ArtifactKind> {
    ArtifactKind::ALL
        .into_iter()
        .find(|kind| prompt.contains(&format!("generate a JSON for {}", kind.file_name())))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A completion client with scripted behaviour.
///
/// Clones share their call log, so a test can keep one handle and move the
/// other into a generator.
#[derive(Clone, Default)]
pub struct MockCompletion {
    response: Option<String>,
    failing: HashSet<ArtifactKind>,
    breaking: HashSet<ArtifactKind>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
}

impl MockCompletion {
    /// Answers every kind with a small fenced JSON document naming the kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with this text.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.response = Some(text.into());
        self
    }

    /// Fail requests for this kind before any fragment is produced.
    pub fn failing_for(mut self, kind: ArtifactKind) -> Self {
        self.failing.insert(kind);
        self
    }

    /// Produce the first fragment for this kind, then fail.
    pub fn breaking_stream_for(mut self, kind: ArtifactKind) -> Self {
        self.breaking.insert(kind);
        self
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<CompletionCall> {
        lock(&self.calls).clone()
    }

    fn response_for(&self, kind: Option<ArtifactKind>) -> String {
        if let Some(text) = &self.response {
            return text.clone();
        }
        let stem = kind.map(|k| k.stem()).unwrap_or("unknown");
        format!("```json\n{{\"artifact\": \"{stem}\"}}\n```")
    }
}

fn fragments_of(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(FRAGMENT_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, model: &str, prompt: &str) -> Result<FragmentStream, CompletionError> {
        lock(&self.calls).push(CompletionCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        let kind = kind_in_prompt(prompt);
        if kind.is_some_and(|k| self.failing.contains(&k)) {
            return Err(openrouter::Error::Api {
                status: 429,
                message: "rate limited".to_string(),
            }
            .into());
        }

        let mut items: Vec<Result<String, CompletionError>> = fragments_of(&self.response_for(kind))
            .into_iter()
            .map(Ok)
            .collect();

        if kind.is_some_and(|k| self.breaking.contains(&k)) {
            items.truncate(1);
            items.push(Err(CompletionError::Stream("connection reset".to_string())));
        }

        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// A line source that replays fixed lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// A model picker that answers from a queue of choices.
///
/// An exhausted queue behaves like a cancelled menu.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    choices: Arc<Mutex<VecDeque<Option<usize>>>>,
    shown: Arc<Mutex<usize>>,
}

impl ScriptedPicker {
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = Option<usize>>,
    {
        Self {
            choices: Arc::new(Mutex::new(choices.into_iter().collect())),
            shown: Arc::default(),
        }
    }

    /// Pick the catalog entry with this id.
    pub fn choosing(id: &str) -> Self {
        Self::new([crate::catalog::position_of(id)])
    }

    /// How many times the menu was shown.
    pub fn times_shown(&self) -> usize {
        *lock(&self.shown)
    }
}

impl ModelPicker for ScriptedPicker {
    fn pick(&mut self, _catalog: &[CatalogEntry], _current: Option<usize>) -> io::Result<Option<usize>> {
        *lock(&self.shown) += 1;
        Ok(lock(&self.choices).pop_front().flatten())
    }
}

/// An in-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.bytes)).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

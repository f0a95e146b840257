//! The seam between the generator and a remote model.

use async_trait::async_trait;
use futures::StreamExt;
use openrouter::{Message, OpenRouter, Request, StreamEvent};
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Errors from a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OpenRouter error: {0}")]
    OpenRouter(#[from] openrouter::Error),

    #[error("stream error: {0}")]
    Stream(String),
}

/// Text fragments in the order the model produced them. Consumed once.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send>>;

/// Something that turns a prompt into a stream of text fragments.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<FragmentStream, CompletionError>;
}

#[async_trait]
impl CompletionClient for OpenRouter {
    async fn complete(&self, model: &str, prompt: &str) -> Result<FragmentStream, CompletionError> {
        let request = Request::new(vec![Message::user(prompt)]).with_model(model);
        let events = self.stream(request).await?;

        let fragments = events.filter_map(|event| {
            let item = match event {
                Ok(StreamEvent::TextDelta { text }) => Some(Ok(text)),
                Ok(StreamEvent::Error { message }) => Some(Err(CompletionError::Stream(message))),
                Ok(StreamEvent::Finish { .. } | StreamEvent::Done) => None,
                Err(e) => Some(Err(e.into())),
            };
            futures::future::ready(item)
        });

        Ok(Box::pin(fragments))
    }
}

//! The text-generation collaborator boundary.
//!
//! The pipeline only ever sees a plain completion string. Extracting a color
//! or a stress figure from it happens on the consuming side (`color`, `stress`).

mod chat;

pub use chat::{ChatClient, ChatConfig};

use crate::core::ChromaError;
use async_trait::async_trait;

/// System instruction sent with every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Something that turns an instruction into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the completion for `user`, framed by the `system` instruction.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChromaError>;
}

/// Instruction asking for the HTML color of an emotion.
pub fn color_prompt(emotion: &str) -> String {
    format!("Please generate an HTML color code that best represents the emotion: {}.", emotion)
}

/// Instruction asking for the stress level of a text.
pub fn stress_prompt(text: &str) -> String {
    format!("Analyze the following text for stress level: {}", text)
}

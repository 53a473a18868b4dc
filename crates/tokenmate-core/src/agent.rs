//! Chat Pipeline
//!
//! One request, one pass: validate, sanitize history, consult the context
//! source, assemble the prompt, call the provider, shape the reply.

use std::sync::Arc;

use serde_json::Value;

use crate::context::ContextSource;
use crate::error::{ChatError, Result};
use crate::history::{MAX_HISTORY_MESSAGES, sanitize_history_with_limit};
use crate::message::Message;
use crate::prompt::{TOKENMATE_SYSTEM_PROMPT, assemble_prompt};
use crate::provider::{GenerationOptions, LlmProvider};

/// Reply used when the provider answers without usable text
pub const NO_REPLY: &str = "No reply";

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Persona system prompt
    pub system_prompt: String,

    /// Maximum trailing history messages forwarded
    pub history_limit: usize,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: TOKENMATE_SYSTEM_PROMPT.into(),
            history_limit: MAX_HISTORY_MESSAGES,
            generation: GenerationOptions::default(),
        }
    }
}

/// The chat pipeline
pub struct ChatAgent {
    provider: Arc<dyn LlmProvider>,
    context: Option<Arc<dyn ContextSource>>,
    config: AgentConfig,
}

impl ChatAgent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        context: Option<Arc<dyn ContextSource>>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            context,
            config,
        }
    }

    /// Start a builder
    pub fn builder() -> ChatAgentBuilder {
        ChatAgentBuilder::new()
    }

    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub const fn has_context_source(&self) -> bool {
        self.context.is_some()
    }

    /// Answer `message`, using `history` (any JSON value) as prior turns.
    pub async fn reply(&self, message: &str, history: &Value) -> Result<String> {
        let messages = self.build_prompt(message, history).await?;

        let completion = self
            .provider
            .complete(&messages, &self.config.generation)
            .await?;

        if let Some(usage) = completion.usage {
            tracing::debug!(
                model = %completion.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }

        Ok(completion.text().unwrap_or(NO_REPLY).to_string())
    }

    /// Validate the request and assemble the outbound message sequence.
    pub async fn build_prompt(&self, message: &str, history: &Value) -> Result<Vec<Message>> {
        if message.trim().is_empty() {
            return Err(ChatError::InvalidRequest("Message is required".into()));
        }

        let history = sanitize_history_with_limit(history, self.config.history_limit);
        let context = self.gather_context(message).await;

        Ok(assemble_prompt(
            &self.config.system_prompt,
            context.as_deref(),
            history,
            message,
        ))
    }

    /// Ask the context source for enrichment; errors degrade to `None`.
    async fn gather_context(&self, message: &str) -> Option<String> {
        let source = self.context.as_ref()?;

        match source.context_for(message).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(source = source.name(), "Context enrichment failed: {}", e);
                None
            }
        }
    }
}

/// Builder for creating agents
#[derive(Default)]
pub struct ChatAgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    context: Option<Arc<dyn ContextSource>>,
    config: AgentConfig,
}

impl ChatAgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn context_source(mut self, source: Arc<dyn ContextSource>) -> Self {
        self.context = Some(source);
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn build(self) -> Result<ChatAgent> {
        let provider = self
            .provider
            .ok_or_else(|| ChatError::Config("Provider is required".into()))?;

        Ok(ChatAgent::new(provider, self.context, self.config))
    }
}

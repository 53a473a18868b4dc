//! # tokenmate-runtime
//!
//! Runtime providers for the TokenMate chat pipeline.
//!
//! ## Providers
//!
//! - **OpenAI** (default): chat-completions API over HTTPS
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tokenmate_runtime::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let agent = ChatAgent::builder()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use tokenmate_core::{ChatAgent, ChatError, LlmProvider, Message, Result, Role};

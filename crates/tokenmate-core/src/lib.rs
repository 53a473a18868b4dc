//! # tokenmate-core
//!
//! Provider-agnostic chat pipeline for the TokenMate assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ChatAgent                             │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │   History   │  │  ContextSource   │  │   LlmProvider   │  │
//! │  │  Sanitizer  │──│   (optional)     │──│   (Strategy)    │  │
//! │  └─────────────┘  └──────────────────┘  └─────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One request is one linear pass: sanitize the caller's history, ask the
//! context source (if any) for extra system context, assemble the prompt and
//! hand it to the provider. Context failures never fail the request.

pub mod agent;
pub mod context;
pub mod error;
pub mod history;
pub mod message;
pub mod prompt;
pub mod provider;

pub use agent::{AgentConfig, ChatAgent, ChatAgentBuilder};
pub use context::ContextSource;
pub use error::{ChatError, Result};
pub use message::{Message, Role};
pub use provider::LlmProvider;

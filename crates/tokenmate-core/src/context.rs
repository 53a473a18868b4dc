//! Context Sources
//!
//! A context source looks at the user's message and may contribute one line
//! of extra system context (live market data, for instance). The agent treats
//! every error from a source as "no context".

use async_trait::async_trait;

use crate::error::Result;

/// Optional prompt enrichment, consulted once per request
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Source name, for logging
    fn name(&self) -> &str;

    /// Context text for this message, or `None` when nothing applies
    async fn context_for(&self, message: &str) -> Result<Option<String>>;
}

//! Prompt Assembly
//!
//! Outbound order is fixed: persona system message, optional context system
//! message, trailing history, then the user's message.

use crate::message::Message;

/// Persona and standing constraints for the assistant
pub const TOKENMATE_SYSTEM_PROMPT: &str = "You are TokenMate AI, a crypto education assistant. \
Be clear and helpful. Never give financial advice. Always include a brief reminder: \
'This is educational, not financial advice.' If the user asks what to buy/sell, provide \
general factors to consider and risk management instead of telling them what to do.";

/// Wrap context text into the instruction injected as the second system message.
pub fn context_instruction(context: &str) -> String {
    format!(
        "Market data (use in your answer): {context} \
If user asked for price, lead with the live price. Keep it concise."
    )
}

/// Build the message sequence sent to the provider.
///
/// Empty context is treated as absent.
pub fn assemble_prompt(
    system_prompt: &str,
    context: Option<&str>,
    history: Vec<Message>,
    message: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 3);
    messages.push(Message::system(system_prompt));

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        messages.push(Message::system(context_instruction(context)));
    }

    messages.extend(history);
    messages.push(Message::user(message));
    messages
}

use uchat_llm::{Message, Role};

use crate::chunker::estimate_tokens;

/// Estimated tokens of one message's text
pub fn estimate_message_tokens(message: &Message) -> usize {
    estimate_tokens(&message.text())
}

/// Drop the oldest non-system messages until the estimate fits `budget`
///
/// System messages and the final message are never removed, so the result
/// may still exceed the budget.
pub fn trim_to_budget(mut messages: Vec<Message>, budget: usize) -> Vec<Message> {
    let mut total: usize = messages.iter().map(estimate_message_tokens).sum();
    let mut dropped = 0;

    while total > budget {
        let last = messages.len().saturating_sub(1);
        let Some(oldest) = messages
            .iter()
            .take(last)
            .position(|message| message.role != Role::System)
        else {
            break;
        };

        total -= estimate_message_tokens(&messages.remove(oldest));
        dropped += 1;
    }

    if dropped > 0 {
        tracing::debug!(dropped, remaining_tokens = total, budget, "trimmed conversation history to fit budget");
    }

    messages
}

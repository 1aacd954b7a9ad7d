use uchat_llm::{Message, Role};

/// Whether a request looks like "continue the truncated answer"
///
/// True when the non-system messages hold exactly one user message and at
/// least one assistant message with text. A genuine two-message exchange
/// typed by hand looks the same.
pub fn is_continuation(messages: &[Message]) -> bool {
    let mut users = 0;
    let mut has_assistant_text = false;

    for message in messages {
        match message.role {
            Role::System => {}
            Role::User => users += 1,
            Role::Assistant => has_assistant_text |= !message.text().trim().is_empty(),
        }
    }

    users == 1 && has_assistant_text
}

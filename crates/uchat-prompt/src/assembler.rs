use uchat_core::{ClientInfo, Timestamp};
use uchat_llm::{Message, Role};
use uchat_realtime::Snippet;

use crate::templates::{
    ANTI_DISCLAIMER, CONTINUATION_DIRECTIVE, IMAGE_MODE_RULES, PERSONA, REALTIME_DIRECTIVE, REALTIME_FOOTER,
    REALTIME_HEADER,
};

/// Inputs of the system message for one request
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub snippets: &'a [Snippet],
    pub client: &'a ClientInfo,
    pub now: Timestamp,
    pub continuation: bool,
    /// Images were fetched up front for a pure image request
    pub image_mode: bool,
}

/// Build the system message text
///
/// Sections appear in a fixed order: persona, image-mode rules, realtime
/// block, user context, current time, continuation directive,
/// anti-disclaimer. Optional sections are omitted entirely.
pub fn assemble_system_prompt(context: &PromptContext<'_>) -> String {
    let mut sections: Vec<String> = vec![PERSONA.trim_end().to_owned()];

    if context.image_mode {
        sections.push(IMAGE_MODE_RULES.trim_end().to_owned());
    }

    if !context.snippets.is_empty() {
        let mut block = vec![REALTIME_HEADER.to_owned(), REALTIME_DIRECTIVE.trim_end().to_owned()];
        block.extend(context.snippets.iter().map(|snippet| format!("- {snippet}")));
        block.push(REALTIME_FOOTER.to_owned());
        sections.push(block.join("\n"));
    }

    sections.push(format!(
        "User context:\n- Device: {}\n- Operating system: {}\n- Browser: {}",
        context.client.device, context.client.os, context.client.browser
    ));

    sections.push(format!(
        "Current date and time (UTC): {}",
        context.now.strftime("%Y-%m-%dT%H:%M:%SZ")
    ));

    if context.continuation {
        sections.push(CONTINUATION_DIRECTIVE.trim_end().to_owned());
    }

    if !context.snippets.is_empty() {
        sections.push(ANTI_DISCLAIMER.trim_end().to_owned());
    }

    sections.join("\n\n")
}

/// Put `system_prompt` first, replacing any system messages the caller sent
pub fn apply_system_prompt(messages: Vec<Message>, system_prompt: String) -> Vec<Message> {
    std::iter::once(Message::system(system_prompt))
        .chain(messages.into_iter().filter(|message| message.role != Role::System))
        .collect()
}

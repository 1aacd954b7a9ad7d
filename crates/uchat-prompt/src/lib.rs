//! Prompt construction for chat requests
//!
//! Assembles the system message from the persona, realtime snippets, and
//! caller context, and holds the pure text helpers the chat pipeline needs:
//! image-intent routing, token estimation and chunking, continuation
//! detection and context-budget trimming.

#![allow(clippy::must_use_candidate)]

mod assembler;
mod budget;
mod chunker;
mod continuation;
mod image_intent;
mod templates;

pub use assembler::{PromptContext, apply_system_prompt, assemble_system_prompt};
pub use budget::{estimate_message_tokens, trim_to_budget};
pub use chunker::{Chunk, estimate_tokens, split_into_chunks};
pub use continuation::is_continuation;
pub use image_intent::{ImageIntent, classify_image_intent, image_search_query};

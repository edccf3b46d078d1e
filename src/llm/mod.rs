//! Prompt construction and the chat-completion client.

pub mod client;
pub mod prompt;

pub use client::{
    ChatClient, CompletionBackend, DESCRIPTION_RESPONSE_TOKENS, PromptRequest,
    SHORT_RESPONSE_TOKENS,
};
pub use prompt::{
    COMMIT_DIFF_LIMIT, PR_DIFF_LIMIT, TRUNCATION_SENTINEL, build_commit_prompt,
    build_description_prompt, build_title_prompt, truncate_diff,
};

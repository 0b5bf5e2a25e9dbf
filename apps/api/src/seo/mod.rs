pub mod handlers;
pub mod metadata;
pub mod prompts;

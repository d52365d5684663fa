pub mod config;
pub mod openai;
pub mod parse;
pub mod prompts;
pub mod sanitize;
pub mod telegram;
pub mod types;
pub mod webhook;

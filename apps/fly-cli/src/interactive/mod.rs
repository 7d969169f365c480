//! Shared helpers for interactive prompts

pub mod prompts;

pub use prompts::{is_interactive_terminal, prompt_confirm, require_interactive};

//! Resume intake: turns an uploaded resume into a `CareerInput`.
//!
//! Text extraction is local (`extract`); the mapping from free text to the
//! structured profile is one LLM call (`parser`).

pub mod extract;
pub mod handlers;
pub mod parser;
pub mod prompts;

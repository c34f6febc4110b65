pub mod ai;
pub mod document;
pub mod handlers;
pub mod prompts;
pub mod repo;

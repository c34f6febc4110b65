pub mod ai;
pub mod handlers;
pub mod prompts;
pub mod repo;

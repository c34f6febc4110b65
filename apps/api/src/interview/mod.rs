pub mod ai;
pub mod grading;
pub mod handlers;
pub mod prompts;
pub mod repo;

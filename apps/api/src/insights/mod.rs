pub mod handlers;
pub mod prompts;
pub mod refresh;
pub mod repo;
pub mod service;

//! Career tooling API: resumes, cover letters, interview quizzes and industry
//! insights, with database reads and LLM generations fronted by a cache-aside layer.

pub mod cache;
pub mod config;
pub mod cover_letter;
pub mod db;
pub mod errors;
pub mod insights;
pub mod interview;
pub mod llm_client;
pub mod models;
pub mod resume;
pub mod routes;
pub mod state;
pub mod users;

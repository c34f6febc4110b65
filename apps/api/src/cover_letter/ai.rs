//! AI operations on cover letters.

use serde::{Deserialize, Serialize};

use crate::cache::{keys, CacheAside, TtlTier};
use crate::cover_letter::document::{CoverLetterDocument, SectionKey};
use crate::cover_letter::prompts;
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, WRITER_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::DocumentAnalysis;
use crate::models::user::User;

/// Parts the model rewrote. Absent fields need no change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TailoredCoverLetter {
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub closing: Option<String>,
}

impl TailoredCoverLetter {
    /// Writes each rewritten part into its section of `doc`. Empty strings are
    /// treated as "no change", not as deletions.
    pub fn apply_to(&self, doc: &mut CoverLetterDocument) {
        let parts = [
            (SectionKey::Introduction, &self.introduction),
            (SectionKey::Body, &self.body),
            (SectionKey::Closing, &self.closing),
        ];
        for (key, text) in parts {
            if let Some(text) = text.as_deref().filter(|t| !t.trim().is_empty()) {
                doc.set(key, text);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateInput<'a> {
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub job_description: &'a str,
    /// Empty when the user has no saved resume.
    pub resume_content: &'a str,
}

pub async fn improve_part(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    part: SectionKey,
    current: &str,
) -> Result<String, AppError> {
    let key = keys::cover_letter_improve(user.id, part.as_str(), current);
    cache
        .get_or_compute(&key, TtlTier::Long, || async {
            let prompt = prompts::improve_prompt(part.as_str(), user.industry_label(), current);
            Ok::<_, AppError>(llm.complete_text(&prompt, WRITER_SYSTEM).await?)
        })
        .await
}

pub async fn analyze(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    content: &str,
) -> Result<DocumentAnalysis, AppError> {
    let key = keys::cover_letter_analyze(user.id, content);
    cache
        .get_or_compute(&key, TtlTier::Medium, || async {
            let prompt = prompts::analyze_prompt(user.industry_label(), content);
            let analysis = llm
                .call_json::<DocumentAnalysis>(&prompt, JSON_ONLY_SYSTEM)
                .await?;
            Ok::<_, AppError>(analysis)
        })
        .await
}

/// The letter and the job description are independent inputs; both feed the key.
pub async fn tailor(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    letter_content: &str,
    job_description: &str,
) -> Result<TailoredCoverLetter, AppError> {
    let key = keys::cover_letter_tailor(user.id, letter_content, job_description);
    cache
        .get_or_compute(&key, TtlTier::Medium, || async {
            let prompt = prompts::tailor_prompt(letter_content, job_description);
            let tailored = llm
                .call_json::<TailoredCoverLetter>(&prompt, JSON_ONLY_SYSTEM)
                .await?;
            Ok::<_, AppError>(tailored)
        })
        .await
}

pub async fn generate(
    cache: &CacheAside,
    llm: &LlmClient,
    user: &User,
    input: &GenerateInput<'_>,
) -> Result<String, AppError> {
    let key = keys::cover_letter_generate(
        user.id,
        input.job_title,
        input.company_name,
        input.job_description,
        input.resume_content,
    );
    cache
        .get_or_compute(&key, TtlTier::Long, || async {
            let prompt = prompts::generate_prompt(
                user,
                input.job_title,
                input.company_name,
                input.job_description,
                input.resume_content,
            );
            Ok::<_, AppError>(llm.complete_text(&prompt, WRITER_SYSTEM).await?)
        })
        .await
}
